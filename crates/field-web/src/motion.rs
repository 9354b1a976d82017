//! On-surface "Enable Motion Controls" button for platforms that gate
//! device orientation behind a user gesture.

use crate::dom;
use crate::events::{self, EventListener, ListenerHandle};
use anyhow::anyhow;
use field_core::constants::MOTION_PROMPT_TIMEOUT_MS;
use field_core::MotionPermission;
use glam::DVec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const BUTTON_LABEL: &str = "Enable Motion Controls";
const BUTTON_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 1000; \
background: rgba(255, 238, 212, 0.9); color: #31102F; border: 2px solid #FFEED4; \
border-radius: 8px; padding: 8px 16px; font-size: 12px; cursor: pointer; \
backdrop-filter: blur(10px); transition: all 0.3s ease;";

/// Live prompt. Dropping it cancels the auto-hide timer and removes the
/// button together with its click listener.
pub struct PermissionPrompt {
    window: web::Window,
    button: web::HtmlButtonElement,
    _click: EventListener,
    timeout_id: Option<i32>,
    _timeout: Closure<dyn FnMut()>,
}

impl PermissionPrompt {
    pub fn offer(
        window: &web::Window,
        document: &web::Document,
        listeners: ListenerHandle,
        viewpoint: Rc<Cell<DVec2>>,
    ) -> anyhow::Result<Self> {
        let body = document.body().ok_or_else(|| anyhow!("no document body"))?;
        let button = document
            .create_element("button")
            .map_err(|e| anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlButtonElement>()
            .map_err(|e| anyhow!("{:?}", e))?;
        button.set_text_content(Some(BUTTON_LABEL));
        button.style().set_css_text(BUTTON_STYLE);

        let window_click = window.clone();
        let button_click = button.clone();
        let click = EventListener::new(&button, "click", false, move |_ev| {
            let window = window_click.clone();
            let button = button_click.clone();
            let listeners = listeners.clone();
            let viewpoint = viewpoint.clone();
            spawn_local(async move {
                match request_permission(&window).await {
                    Ok(p) if p.allows_listening() => {
                        button.remove();
                        enable_orientation(&window, &listeners, viewpoint);
                    }
                    Ok(other) => log::info!("[motion] permission {:?}", other),
                    Err(e) => log::warn!("[motion] device orientation permission denied: {:?}", e),
                }
            });
        })?;

        body.append_child(&button).map_err(|e| anyhow!("{:?}", e))?;

        let button_timeout = button.clone();
        let timeout: Closure<dyn FnMut()> = Closure::once(move || button_timeout.remove());
        let timeout_id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                timeout.as_ref().unchecked_ref(),
                MOTION_PROMPT_TIMEOUT_MS,
            )
            .map_err(|e| log::warn!("[motion] auto-hide timer: {:?}", e))
            .ok();

        Ok(Self {
            window: window.clone(),
            button,
            _click: click,
            timeout_id,
            _timeout: timeout,
        })
    }
}

impl Drop for PermissionPrompt {
    fn drop(&mut self) {
        if let Some(id) = self.timeout_id.take() {
            self.window.clear_timeout_with_handle(id);
        }
        self.button.remove();
    }
}

async fn request_permission(window: &web::Window) -> anyhow::Result<MotionPermission> {
    let (request, ctor) = dom::orientation_permission_request(window)
        .ok_or_else(|| anyhow!("requestPermission unavailable"))?;
    let promise = request
        .call0(&ctor)
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|e| anyhow!("{:?}", e))?;
    let response = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(MotionPermission::from_response(
        &response.as_string().unwrap_or_default(),
    ))
}

/// Register the orientation listener unless the field was torn down while
/// the prompt was pending.
fn enable_orientation(window: &web::Window, listeners: &ListenerHandle, viewpoint: Rc<Cell<DVec2>>) {
    if !listeners.is_live() {
        log::debug!("[motion] permission granted after teardown; ignoring");
        return;
    }
    match events::wire_orientation(window, viewpoint) {
        // A refused push hands the listener back; dropping it unregisters it.
        Ok(l) => match listeners.push(l) {
            Ok(()) => log::info!("[motion] device orientation enabled"),
            Err(_late) => log::debug!("[motion] field closed while wiring orientation"),
        },
        Err(e) => log::warn!("[motion] {:?}", e),
    }
}
