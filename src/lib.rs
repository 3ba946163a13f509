#![cfg(target_arch = "wasm32")]
//! Portfolio globe widget entry point.
//!
//! The host page provides a `#globe-canvas` element and optional
//! `#globe-loading` placeholder, then drives the widget through the exported
//! `set_language` / `notify_country_click` / `unmount` functions.

use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

// The pure modules below are `include!`d by the host-side tests, so their
// files start with items, never inner doc comments.
mod camera;
/// Fallback defaults plus the remote extrusion document; any load or parse
/// failure leaves the defaults in effect (silent degrade, never fatal).
mod config;
/// Interaction and reconciliation tuning constants.
mod constants;
mod dom;
mod events;
mod frame;
/// Pointer drag state: drag-vs-click disambiguation, rotation velocity with
/// inertia, and the per-frame decay/auto-rotation step.
mod input;
/// Scene-graph manifest: the named meshes and picking bounds the globe asset
/// exposes; the renderer keeps the geometry.
mod model;
mod overlay;
mod render;
/// Scene graph model and reconciliation. The widget keeps a derived index
/// over the renderer's meshes and re-applies expected material/visibility/
/// scale state so the upstream globe package cannot fight its visuals.
mod scene;
/// Combines the click signal with the active language to decide which single
/// country is highlighted and how.
mod selection;

use config::GlobeConfig;
use input::PointerDragState;
use scene::{Registries, RootTransform, SceneGraph, WidgetPhase};
use selection::{Language, SelectionState};

const CONFIG_URL: &str = "assets/models/atlas_ico_subdiv_7.config.json";
const MANIFEST_URL: &str = "assets/models/atlas_ico_subdiv_7.manifest.json";

/// Shared widget state handles reachable from the exported functions.
#[derive(Clone)]
struct WidgetHandles {
    selection: Rc<RefCell<SelectionState>>,
    dirty: Rc<Cell<bool>>,
    alive: Rc<Cell<bool>>,
    phase: Rc<Cell<WidgetPhase>>,
}

thread_local! {
    static WIDGET: RefCell<Option<WidgetHandles>> = const { RefCell::new(None) };
}

fn with_widget(f: impl FnOnce(&WidgetHandles)) {
    WIDGET.with(|w| {
        if let Some(handles) = w.borrow().as_ref() {
            f(handles);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Host language prop; may change at any time and re-derives highlighting.
#[wasm_bindgen]
pub fn set_language(tag: &str) {
    with_widget(|w| {
        w.selection.borrow_mut().set_language(Language::from_tag(tag));
        w.dirty.set(true);
    });
}

/// Renderer-driven integration variant: the opaque globe package performed
/// its own hit-test and reports the clicked identifier.
#[wasm_bindgen]
pub fn notify_country_click(country_id: &str) {
    with_widget(|w| {
        selection::handle_country_click(&w.selection, &w.dirty, &w.alive, country_id);
    });
}

/// Tear the widget down. In-flight fetch results are discarded afterwards
/// and the frame loop stops on its next tick.
#[wasm_bindgen]
pub fn unmount() {
    with_widget(|w| {
        w.alive.set(false);
        w.phase.set(WidgetPhase::Unmounted);
        log::info!("[globe] unmounted");
    });
    WIDGET.with(|w| w.borrow_mut().take());
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, alive: &Rc<Cell<bool>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let alive = alive.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if alive.get() {
            dom::sync_canvas_backing_size(&canvas_resize);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("globe-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #globe-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // ---------------- Shared widget state ----------------
    let alive = Rc::new(Cell::new(true));

    wire_canvas_resize(&canvas, &alive);
    let phase = Rc::new(Cell::new(WidgetPhase::Loading));
    let config = Rc::new(RefCell::new(GlobeConfig::default()));
    let config_ready = Rc::new(Cell::new(false));
    let drag = Rc::new(RefCell::new(PointerDragState::default()));
    let selection = Rc::new(RefCell::new(SelectionState {
        clicked_country: None,
        active_language: Some(Language::English),
    }));
    let scene_graph: Rc<RefCell<Option<SceneGraph>>> = Rc::new(RefCell::new(None));
    let regs: Rc<RefCell<Option<Registries>>> = Rc::new(RefCell::new(None));
    let root = Rc::new(RefCell::new(RootTransform::default()));
    let dirty = Rc::new(Cell::new(false));
    let defensive_frames = Rc::new(Cell::new(0u32));

    WIDGET.with(|w| {
        *w.borrow_mut() = Some(WidgetHandles {
            selection: selection.clone(),
            dirty: dirty.clone(),
            alive: alive.clone(),
            phase: phase.clone(),
        })
    });

    // Configuration fetch: any failure degrades silently to defaults, but
    // readiness flips either way so mesh mutation is only gated once.
    {
        let config = config.clone();
        let config_ready = config_ready.clone();
        let dirty = dirty.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let loaded = match dom::fetch_text(CONFIG_URL).await {
                Ok(body) => config::config_from_body(&body),
                Err(e) => {
                    log::warn!("[config] {e}; using defaults");
                    GlobeConfig::default()
                }
            };
            if !alive.get() {
                // widget was unmounted while the fetch was in flight
                return;
            }
            *config.borrow_mut() = loaded;
            config_ready.set(true);
            dirty.set(true);
        });
    }

    // Model manifest fetch: on failure no globe is rendered, never a crash.
    // The registries are built exactly once per load, right here.
    {
        let scene_graph = scene_graph.clone();
        let regs = regs.clone();
        let dirty = dirty.clone();
        let defensive_frames = defensive_frames.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let body = match dom::fetch_text(MANIFEST_URL).await {
                Ok(b) => b,
                Err(e) => {
                    log::warn!("[model] {e}; globe not rendered");
                    return;
                }
            };
            let graph = match model::parse_manifest(&body) {
                Ok(g) => g,
                Err(e) => {
                    log::warn!("[model] {e}; globe not rendered");
                    return;
                }
            };
            if !alive.get() {
                return;
            }
            log::info!("[model] scene graph attached ({} meshes)", graph.nodes.len());
            *regs.borrow_mut() = Some(Registries::build(&graph));
            *scene_graph.borrow_mut() = Some(graph);
            dirty.set(true);
            defensive_frames.set(constants::DEFENSIVE_RECONCILE_FRAMES);
        });
    }

    // Pointer handlers (down/move/up/leave)
    events::wire_pointer_handlers(events::InputWiring {
        canvas: canvas.clone(),
        drag: drag.clone(),
        selection: selection.clone(),
        scene: scene_graph.clone(),
        regs: regs.clone(),
        root: root.clone(),
        dirty: dirty.clone(),
        alive: alive.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        drag,
        selection,
        scene: scene_graph,
        regs,
        root,
        config,
        config_ready,
        phase,
        dirty,
        defensive_frames,
        alive,
        gpu,
        last_instant: Instant::now(),
        elapsed_sec: 0.0,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
