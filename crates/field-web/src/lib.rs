#![cfg(target_arch = "wasm32")]
use anyhow::anyhow;
use field_core::{Field, FieldSettings, FrameLoop, MotionPermission};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;
mod motion;

/// Canvas picked up automatically on start.
const DEFAULT_CANVAS_ID: &str = "stars";

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<FieldHandle>> = const { RefCell::new(None) };
}

/// A running field. Call `destroy()` (or let JS free it) to stop the frame
/// loop and unregister every listener.
#[wasm_bindgen]
pub struct FieldHandle {
    ctx: Rc<RefCell<frame::FrameContext>>,
    tick: frame::Tick,
    listeners: events::Listeners,
    prompt: Option<motion::PermissionPrompt>,
    destroyed: bool,
}

#[wasm_bindgen]
impl FieldHandle {
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        frame::stop_loop(&self.ctx, &self.tick);
        let removed = self.listeners.close();
        self.prompt = None;
        log::info!("[field] destroyed, {} listeners removed", removed);
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> f64 {
        self.ctx
            .try_borrow()
            .map(|c| c.frame_loop.frames() as f64)
            .unwrap_or(0.0)
    }

    #[wasm_bindgen(js_name = linkCount)]
    pub fn link_count(&self) -> usize {
        self.ctx
            .try_borrow()
            .map(|c| c.field.links().len())
            .unwrap_or(0)
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web starting");

    let present = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
        .is_some();
    if present {
        let handle = mount(DEFAULT_CANVAS_ID);
        AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = handle);
    }
    Ok(())
}

/// Mount a field on the canvas with `canvas_id`. Returns `undefined` (and
/// logs why) when the canvas or its 2D context is missing.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Option<FieldHandle> {
    match try_mount(canvas_id) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("[field] not mounted: {:?}", e);
            None
        }
    }
}

/// Tear down the field mounted automatically on `#stars`, if any.
#[wasm_bindgen]
pub fn unmount() {
    AUTO_MOUNTED.with(|slot| {
        if let Some(mut handle) = slot.borrow_mut().take() {
            handle.destroy();
        }
    });
}

fn load_settings(canvas: &web::HtmlCanvasElement) -> FieldSettings {
    let mut settings = FieldSettings::default();
    for (key, value) in dom::data_overrides(canvas) {
        if let Err(e) = settings.apply(&key, &value) {
            log::warn!("[settings] ignoring data-{}: {}", key, e);
        }
    }
    if let Err(e) = settings.validate() {
        log::warn!("[settings] {}; using defaults", e);
        return FieldSettings::default();
    }
    settings
}

fn try_mount(canvas_id: &str) -> anyhow::Result<FieldHandle> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("{:?}", e)))?;
    let ctx2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("{:?}", e))?;

    let settings = load_settings(&canvas);
    let size = dom::sync_canvas_backing_size(&window, &canvas);
    let mut field = Field::with_rng(settings, StdRng::from_entropy());
    field.resize(size.x, size.y);
    field.init(dom::client_size(&canvas));

    // Written by the listeners, read once per frame.
    let viewpoint = Rc::new(Cell::new(field.view.viewpoint));
    let listeners = events::Listeners::new();

    if !dom::is_touch_device(&window) {
        _ = listeners.push(events::wire_pointer(&document, viewpoint.clone())?);
    }

    let permission = MotionPermission::probe(
        dom::has_orientation_events(&window),
        dom::document_has_touch(&document),
        dom::orientation_permission_request(&window).is_some(),
    );
    let prompt = match permission {
        p if p.allows_listening() => {
            _ = listeners.push(events::wire_orientation(&window, viewpoint.clone())?);
            None
        }
        MotionPermission::Prompt => motion::PermissionPrompt::offer(
            &window,
            &document,
            listeners.handle(),
            viewpoint.clone(),
        )
        .map_err(|e| log::warn!("[motion] prompt unavailable: {:?}", e))
        .ok(),
        _ => None,
    };
    log::info!("[field] mounted on #{} motion={:?}", canvas_id, permission);

    let tick: frame::Tick = Rc::new(RefCell::new(None));
    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        field,
        surface: canvas::CanvasSurface::new(ctx2d),
        window: window.clone(),
        canvas,
        viewpoint,
        frame_loop: FrameLoop::new(frame::RafScheduler::new(window, tick.clone())),
    }));
    frame::start_loop(&ctx, &tick);

    Ok(FieldHandle {
        ctx,
        tick,
        listeners,
        prompt,
        destroyed: false,
    })
}
