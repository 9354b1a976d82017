use crate::canvas::CanvasSurface;
use crate::dom;
use field_core::{Field, FrameHandle, FrameLoop, FrameScheduler};
use glam::DVec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` behind the core scheduler trait. The callback slot
/// is filled by [`start_loop`] once the frame context exists.
pub struct RafScheduler {
    window: web::Window,
    tick: Tick,
}

impl RafScheduler {
    pub fn new(window: web::Window, tick: Tick) -> Self {
        Self { window, tick }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let tick = self.tick.borrow();
        let cb = tick.as_ref()?;
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        _ = self.window.cancel_animation_frame(handle.0);
    }
}

pub struct FrameContext {
    pub field: Field,
    pub surface: CanvasSurface,
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub viewpoint: Rc<Cell<DVec2>>,
    pub frame_loop: FrameLoop<RafScheduler>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let size = dom::sync_canvas_backing_size(&self.window, &self.canvas);
        self.field.set_viewpoint(self.viewpoint.get());
        self.frame_loop
            .tick(&mut self.field, &mut self.surface, size.x, size.y);
    }
}

pub fn start_loop(frame_ctx: &Rc<RefCell<FrameContext>>, tick: &Tick) {
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Ok(mut ctx) = frame_ctx_tick.try_borrow_mut() {
            ctx.frame();
        }
    }) as Box<dyn FnMut()>));
    frame_ctx.borrow_mut().frame_loop.start();
}

/// Cancel the pending frame and drop the callback, breaking the
/// callback → context → scheduler → callback cycle.
pub fn stop_loop(frame_ctx: &Rc<RefCell<FrameContext>>, tick: &Tick) {
    if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
        ctx.frame_loop.stop();
    }
    tick.borrow_mut().take();
}
