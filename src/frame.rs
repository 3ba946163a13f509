//! Frame loop: fixed per-tick order of rotation, float, reconciliation, and
//! rendering. State after a tick depends only on input accumulated up to it.

use crate::config::GlobeConfig;
use crate::dom;
use crate::input::PointerDragState;
use crate::overlay;
use crate::render;
use crate::scene::{
    self, float_offset, Registries, RootTransform, SceneGraph, WidgetPhase,
};
use crate::selection::SelectionState;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub drag: Rc<RefCell<PointerDragState>>,
    pub selection: Rc<RefCell<SelectionState>>,
    pub scene: Rc<RefCell<Option<SceneGraph>>>,
    pub regs: Rc<RefCell<Option<Registries>>>,
    pub root: Rc<RefCell<RootTransform>>,
    pub config: Rc<RefCell<GlobeConfig>>,
    pub config_ready: Rc<Cell<bool>>,
    pub phase: Rc<Cell<WidgetPhase>>,
    pub dirty: Rc<Cell<bool>>,
    /// Remaining forced reconciles after the scene graph attaches.
    pub defensive_frames: Rc<Cell<u32>>,
    pub alive: Rc<Cell<bool>>,

    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub elapsed_sec: f32,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.elapsed_sec += dt_sec;

        let config = *self.config.borrow();

        // 1. Rotation: accumulate drag velocity / inertia / auto-rotation
        self.drag.borrow_mut().step_frame(config.rotation_speed);
        {
            let drag = self.drag.borrow();
            let mut root = self.root.borrow_mut();
            root.yaw = drag.yaw;
            root.pitch = drag.pitch;
            // 2. Idle float, independent of interaction
            root.float_y = float_offset(self.elapsed_sec, &config);
        }

        // 3. Reconciliation: gated on config readiness and the registries,
        //    driven by state changes plus the bounded post-load window.
        self.maybe_promote_ready();
        if self.config_ready.get() && (self.dirty.get() || self.defensive_frames.get() > 0) {
            let mut scene = self.scene.borrow_mut();
            let regs = self.regs.borrow();
            if let (Some(scene), Some(regs)) = (scene.as_mut(), regs.as_ref()) {
                let highlight = self.selection.borrow().highlight();
                scene::reconcile(scene, regs, highlight.as_ref(), &config);
                self.dirty.set(false);
                let remaining = self.defensive_frames.get();
                if remaining > 0 {
                    self.defensive_frames.set(remaining - 1);
                }
            }
        }

        // 4. Present
        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Some(scene) = self.scene.borrow().as_ref() {
                if let Err(e) = gpu.render(scene, &self.root.borrow(), &config) {
                    log::error!("render error: {:?}", e);
                }
            }
        }
    }

    /// Ready once both the configuration promise settled and the scene graph
    /// is attached; hides the host page's loading placeholder.
    fn maybe_promote_ready(&self) {
        if self.phase.get() == WidgetPhase::Loading
            && self.config_ready.get()
            && self.scene.borrow().is_some()
        {
            self.phase.set(WidgetPhase::Ready);
            if let Some(doc) = dom::window_document() {
                overlay::hide_loading(&doc);
            }
            log::info!("[globe] ready");
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive the frame loop with requestAnimationFrame until the widget is
/// unmounted; the liveness flag is the single stop condition.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx_tick.borrow().alive.get() {
            // unmounted; stop rescheduling
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
