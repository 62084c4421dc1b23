//! Browser bindings (wasm32 only).
//!
//! `WebHost` reads layout through `getBoundingClientRect` and writes inline
//! styles with `style.setProperty`; `AnimationFrameScheduler` wraps
//! `requestAnimationFrame`. The exported functions are the JS surface:
//!
//! ```js
//! import init, { mount, mountWithConfig, unmount } from "./scroll_reveal.js";
//! await init();                         // auto-mounts with default ids
//! unmount();                            // stop the auto-mounted loop
//! const handle = mountWithConfig('{"ids": {"text": "headline"}}');
//! handle.stop();
//! ```

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, HtmlElement, Window};

use crate::config::RevealConfig;
use crate::driver::ScrollReveal;
use crate::frame_loop::{FrameLoop, LoopHandle};
use crate::host::{
    ElementRect, FrameCallback, FrameId, FrameScheduler, RevealHost, StyleProperty,
};
use crate::result::{RevealError, RevealResult};

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<LoopHandle>> = const { RefCell::new(None) };
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{value:?}"),
    }
}

fn to_js_error(err: &RevealError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// The live document
#[derive(Debug, Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global window and its document
    pub fn new() -> RevealResult<Self> {
        let window = web_sys::window().ok_or_else(|| RevealError::host("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| RevealError::host("window has no document"))?;
        Ok(Self { window, document })
    }

    /// The bound window
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }
}

impl RevealHost for WebHost {
    type Element = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn bounding_rect(&self, element: &HtmlElement) -> ElementRect {
        let rect = element.get_bounding_client_rect();
        ElementRect::new(rect.top(), rect.height())
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn set_style(
        &self,
        element: &HtmlElement,
        property: StyleProperty,
        value: &str,
    ) -> RevealResult<()> {
        element
            .style()
            .set_property(property.css_name(), value)
            .map_err(|e| RevealError::host(js_error_message(&e)))
    }
}

/// `requestAnimationFrame` scheduler
#[derive(Debug, Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    /// Schedule on `window`
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> RevealResult<FrameId> {
        // Freed by wasm-bindgen when the browser invokes it
        let closure = Closure::once_into_js(move || callback());
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(|id| FrameId(i64::from(id)))
            .map_err(|e| RevealError::host(js_error_message(&e)))
    }

    fn cancel_frame(&self, id: FrameId) {
        // A cancelled closure is never invoked, so it is leaked; this only
        // happens once per stop.
        let _ = self.window.cancel_animation_frame(id.0 as i32);
    }
}

/// Mount on the live document and start the loop.
///
/// A missing element is reported on the console (the page keeps working,
/// just without the effect) and returned as the error.
pub fn mount_on_document(config: RevealConfig) -> RevealResult<LoopHandle> {
    let host = WebHost::new()?;
    let scheduler = AnimationFrameScheduler::new(host.window().clone());

    let reveal = match ScrollReveal::mount(host, config) {
        Ok(reveal) => reveal,
        Err(err) => {
            web_sys::console::error_1(&err.to_string().into());
            return Err(err);
        }
    };
    FrameLoop::start(reveal, scheduler)
}

/// JS handle for a running reveal
#[wasm_bindgen]
#[derive(Debug)]
pub struct RevealHandle {
    handle: LoopHandle,
}

#[wasm_bindgen]
impl RevealHandle {
    /// Stop the loop; styles keep their last values
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Whether the loop is still running
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.handle.is_running()
    }

    /// Displayed (smoothed) progress
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.handle.state().displayed
    }

    /// Target progress from the latest measurement
    #[wasm_bindgen(getter, js_name = targetProgress)]
    pub fn target_progress(&self) -> f64 {
        self.handle.state().target
    }

    /// Frame counters as JSON
    pub fn stats(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.handle.stats())
            .map_err(|e| to_js_error(&RevealError::from(e)))
    }
}

/// Mount with the default ids and constants
#[wasm_bindgen]
pub fn mount() -> Result<RevealHandle, JsValue> {
    mount_on_document(RevealConfig::default())
        .map(|handle| RevealHandle { handle })
        .map_err(|e| to_js_error(&e))
}

/// Mount with a JSON config; omitted fields take their defaults
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(json: &str) -> Result<RevealHandle, JsValue> {
    let config = RevealConfig::from_json(json).map_err(|e| to_js_error(&e))?;
    mount_on_document(config)
        .map(|handle| RevealHandle { handle })
        .map_err(|e| to_js_error(&e))
}

/// Stop the reveal mounted automatically at startup, if any
#[wasm_bindgen]
pub fn unmount() {
    AUTO_MOUNTED.with(|slot| {
        if let Some(handle) = slot.borrow_mut().take() {
            handle.stop();
        }
    });
}

fn auto_mount() {
    // Errors were already reported to the console by mount_on_document
    if let Ok(handle) = mount_on_document(RevealConfig::default()) {
        AUTO_MOUNTED.with(|slot| {
            if let Some(previous) = slot.borrow_mut().replace(handle) {
                previous.stop();
            }
        });
    }
}

/// Module start: install the panic hook and, with `auto-start`, mount once
/// the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if !cfg!(feature = "auto-start") {
        return Ok(());
    }

    let document = WebHost::new().map_err(|e| to_js_error(&e))?.document;
    if document.ready_state() == "loading" {
        let listener = Closure::once(auto_mount);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            listener.as_ref().unchecked_ref(),
            &options,
        )?;
        listener.forget();
    } else {
        auto_mount();
    }
    Ok(())
}
