//! Pointer event wiring for the globe canvas.
//!
//! Drag/click disambiguation lives in `input`; this module only translates
//! browser events into controller calls and runs the hit-tests.

use crate::camera::screen_to_world_ray;
use crate::constants::CAMERA_Z;
use crate::dom;
use crate::input::{MoveAction, PointerDragState};
use crate::scene::{pick_country, Registries, RootTransform, SceneGraph};
use crate::selection::{handle_country_click, SelectionState};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub drag: Rc<RefCell<PointerDragState>>,
    pub selection: Rc<RefCell<SelectionState>>,
    pub scene: Rc<RefCell<Option<SceneGraph>>>,
    pub regs: Rc<RefCell<Option<Registries>>>,
    pub root: Rc<RefCell<RootTransform>>,
    pub dirty: Rc<Cell<bool>>,
    pub alive: Rc<Cell<bool>>,
}

pub fn wire_pointer_handlers(w: InputWiring) {
    dom::set_cursor(&w.canvas, "grab");
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
}

/// Convert client (CSS px) coordinates to canvas backing-store pixels.
#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / rect.width() as f32) * canvas.width() as f32;
    let sy = (y_css / rect.height() as f32) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Hit-test the country meshes under a canvas pixel position.
fn country_under_pointer(w: &InputWiring, pos: Vec2) -> Option<String> {
    let scene = w.scene.borrow();
    let regs = w.regs.borrow();
    let (scene, regs) = (scene.as_ref()?, regs.as_ref()?);
    let (ro, rd) = screen_to_world_ray(
        w.canvas.width() as f32,
        w.canvas.height() as f32,
        pos.x,
        pos.y,
        CAMERA_Z,
    );
    pick_country(scene, regs, ro, rd, &w.root.borrow())
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.alive.get() {
            return;
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        w.drag.borrow_mut().pointer_down(pos.x, pos.y);
        dom::set_cursor(&w.canvas, "grabbing");
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.alive.get() {
            return;
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        match w.drag.borrow_mut().pointer_move(pos.x, pos.y) {
            MoveAction::Drag => {}
            MoveAction::Hover => {
                // Cursor affordance only; no state change on hover
                if country_under_pointer(&w, pos).is_some() {
                    dom::set_cursor(&w.canvas, "pointer");
                } else {
                    dom::set_cursor(&w.canvas, "grab");
                }
            }
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.alive.get() {
            return;
        }
        let was_click = w.drag.borrow_mut().pointer_up();
        if was_click {
            let pos = pointer_canvas_px(&ev, &w.canvas);
            if let Some(code) = country_under_pointer(&w, pos) {
                handle_country_click(&w.selection, &w.dirty, &w.alive, &code);
            }
        }
        dom::set_cursor(&w.canvas, "grab");
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if !w.alive.get() {
            return;
        }
        w.drag.borrow_mut().pointer_leave();
        dom::set_cursor(&w.canvas, "grab");
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}
