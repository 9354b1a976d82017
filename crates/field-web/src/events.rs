use anyhow::anyhow;
use field_core::{tilt_to_viewpoint, Registry, RegistryHandle};
use glam::DVec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Listeners = Registry<EventListener>;
pub type ListenerHandle = RegistryHandle<EventListener>;

/// A registered DOM listener. Dropping it unregisters the callback.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback_and_bool(
                kind,
                closure.as_ref().unchecked_ref(),
                capture,
            )
            .map_err(|e| anyhow!("add {} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Desktop pointer: the viewpoint follows the raw client coordinates.
pub fn wire_pointer(
    document: &web::Document,
    viewpoint: Rc<Cell<DVec2>>,
) -> anyhow::Result<EventListener> {
    let body = document.body().ok_or_else(|| anyhow!("no document body"))?;
    EventListener::new(&body, "mousemove", false, move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            viewpoint.set(DVec2::new(ev.client_x() as f64, ev.client_y() as f64));
        }
    })
}

/// Touch devices: tilt steers the viewpoint across the viewport.
pub fn wire_orientation(
    window: &web::Window,
    viewpoint: Rc<Cell<DVec2>>,
) -> anyhow::Result<EventListener> {
    let window_for_size = window.clone();
    EventListener::new(window, "deviceorientation", true, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::DeviceOrientationEvent>() else {
            return;
        };
        if let (Some(gamma), Some(beta)) = (ev.gamma(), ev.beta()) {
            let screen = crate::dom::viewport_size(&window_for_size);
            viewpoint.set(tilt_to_viewpoint(gamma, beta, screen));
        }
    })
}
