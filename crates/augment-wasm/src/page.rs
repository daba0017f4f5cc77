//! Static page text.

use augment_core::render;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Page title shown in the header
#[wasm_bindgen]
pub fn page_title() -> String {
    render::PAGE_TITLE.to_string()
}

/// Footer lines, top to bottom
#[wasm_bindgen]
pub fn footer_lines() -> Vec<String> {
    render::FOOTER_LINES.iter().map(|line| line.to_string()).collect()
}

#[derive(Serialize)]
struct PageText {
    title: &'static str,
    sidebar_header: &'static str,
    selector_label: &'static str,
    upload_label: &'static str,
    original_caption: &'static str,
    download_label: &'static str,
    footer: [&'static str; 4],
}

impl PageText {
    fn current() -> Self {
        Self {
            title: render::PAGE_TITLE,
            sidebar_header: render::SIDEBAR_HEADER,
            selector_label: render::SELECTOR_LABEL,
            upload_label: render::UPLOAD_LABEL,
            original_caption: render::ORIGINAL_CAPTION,
            download_label: render::DOWNLOAD_LABEL,
            footer: render::FOOTER_LINES,
        }
    }
}

/// All fixed labels as one object, for building the page in one go.
#[wasm_bindgen]
pub fn page_text() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PageText::current())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize page text: {}", e)))
}
