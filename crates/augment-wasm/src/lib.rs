//! Augment WASM - WebAssembly bindings for the Image Augmentation Explorer
//!
//! This crate exposes augment-core to the browser page in `web/`.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for image data
//! - `upload` - File-type filter and decoding of uploads
//! - `controls` - Augmentation selector and control descriptors
//! - `render` - One render pass: transformed image, caption and code
//! - `encode` - PNG and JPEG encoding
//! - `page` - Static page text
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_upload, controls_for, render } from '@augment/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(file.name, bytes);
//! const controls = controls_for("Random Rotation", image.width, image.height);
//! const result = render(image, "Random Rotation", { degrees: 90 });
//! console.log(result.code); // transforms.RandomRotation(degrees=90)
//! ```

use wasm_bindgen::prelude::*;

mod controls;
mod encode;
mod page;
mod render;
mod types;
mod upload;

// Re-export public types
pub use controls::{augmentation_kinds, controls_for};
pub use encode::{encode_jpeg, encode_png};
pub use page::{footer_lines, page_text, page_title};
pub use render::{render, JsRenderResult};
pub use types::JsDecodedImage;
pub use upload::{accepted_extensions, decode_upload, is_accepted_file};

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::info!("augment-wasm {} ready", version());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
