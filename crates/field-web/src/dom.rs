use field_core::backing_size;
use glam::DVec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
fn has_property(target: &wasm_bindgen::JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &name.into()).unwrap_or(false)
}

/// Resize the canvas backing store to the viewport width in device pixels,
/// keeping its on-screen aspect ratio. Returns the new size.
pub fn sync_canvas_backing_size(window: &web::Window, canvas: &web::HtmlCanvasElement) -> DVec2 {
    let inner_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let size = backing_size(
        inner_width,
        window.device_pixel_ratio(),
        canvas.client_width() as f64,
        canvas.client_height() as f64,
    );
    let (w_px, h_px) = (size.x as u32, size.y as u32);
    // Assigning width/height clears the canvas, so only do it on change.
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    DVec2::new(canvas.width() as f64, canvas.height() as f64)
}

pub fn client_size(canvas: &web::HtmlCanvasElement) -> DVec2 {
    DVec2::new(canvas.client_width() as f64, canvas.client_height() as f64)
}

pub fn viewport_size(window: &web::Window) -> DVec2 {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    DVec2::new(read(window.inner_width()), read(window.inner_height()))
}

/// `'ontouchstart' in window || navigator.maxTouchPoints > 0`
pub fn is_touch_device(window: &web::Window) -> bool {
    has_property(window, "ontouchstart") || window.navigator().max_touch_points() > 0
}

pub fn has_orientation_events(window: &web::Window) -> bool {
    has_property(window, "DeviceOrientationEvent")
}

pub fn document_has_touch(document: &web::Document) -> bool {
    document
        .document_element()
        .map(|el| has_property(&el, "ontouchstart"))
        .unwrap_or(false)
}

/// `DeviceOrientationEvent.requestPermission`, when the platform gates
/// motion sensors behind a user gesture.
pub fn orientation_permission_request(window: &web::Window) -> Option<(js_sys::Function, wasm_bindgen::JsValue)> {
    let ctor = js_sys::Reflect::get(window, &"DeviceOrientationEvent".into()).ok()?;
    let request = js_sys::Reflect::get(&ctor, &"requestPermission".into()).ok()?;
    let request = request.dyn_into::<js_sys::Function>().ok()?;
    Some((request, ctor))
}

/// All `data-*` attributes of `el` as `(camelCaseKey, value)` pairs.
pub fn data_overrides(el: &web::HtmlElement) -> Vec<(String, String)> {
    let dataset = el.dataset();
    let obj: &js_sys::Object = dataset.unchecked_ref();
    js_sys::Object::keys(obj)
        .iter()
        .filter_map(|k| k.as_string())
        .filter_map(|k| dataset.get(&k).map(|v| (k, v)))
        .collect()
}
