//! Browser tests: run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]

use scroll_reveal::web::{mount_on_document, WebHost};
use scroll_reveal::{ElementIds, RevealConfig, RevealHost, StyleProperty};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn append(id: &str, style: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    element.set_id(id);
    element.style().set_css_text(style);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn mount_fails_without_elements() {
    let config = RevealConfig::default().with_element_ids(ElementIds::new(
        "absent-container",
        "absent-text",
        "absent-window",
    ));
    let err = mount_on_document(config).unwrap_err();
    assert!(err.is_missing_element());
}

#[wasm_bindgen_test]
fn mount_sets_hints_and_first_frame() {
    append("wb-container", "height: 5000px;");
    let text = append("wb-text", "");
    let window = append("wb-window", "");

    let config = RevealConfig::default()
        .with_element_ids(ElementIds::new("wb-container", "wb-text", "wb-window"));
    let handle = mount_on_document(config).unwrap();

    assert_eq!(
        text.style().get_property_value("will-change").unwrap(),
        "transform, opacity"
    );
    assert_eq!(
        window.style().get_property_value("will-change").unwrap(),
        "transform, opacity"
    );
    assert!(handle.is_running());
    assert_eq!(handle.stats().frames, 1);
    handle.stop();
    assert!(!handle.is_running());
}

#[wasm_bindgen_test]
fn web_host_writes_inline_style() {
    let element = append("wb-style-target", "");
    let host = WebHost::new().unwrap();
    let found = host.element_by_id("wb-style-target").unwrap();
    host.set_style(&found, StyleProperty::Opacity, "0.25").unwrap();
    assert_eq!(element.style().get_property_value("opacity").unwrap(), "0.25");
    assert!(host.viewport_height() > 0.0);
}
