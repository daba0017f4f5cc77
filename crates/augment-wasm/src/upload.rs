//! Upload WASM bindings: file-type filter and decode.
//!
//! # Example
//!
//! ```typescript
//! import { is_accepted_file, decode_upload } from '@augment/wasm';
//!
//! if (is_accepted_file(file.name)) {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const image = decode_upload(file.name, bytes);
//! }
//! ```

use crate::types::JsDecodedImage;
use augment_core::upload;
use wasm_bindgen::prelude::*;

/// Extensions the file input accepts, lowercase and without the dot.
#[wasm_bindgen]
pub fn accepted_extensions() -> Vec<String> {
    upload::ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Check a file name against the accepted extensions (case-insensitive).
#[wasm_bindgen]
pub fn is_accepted_file(file_name: &str) -> bool {
    upload::is_accepted_file(file_name)
}

/// Decode an uploaded file to an RGB image.
///
/// # Errors
///
/// Returns an error if the extension is not accepted or the bytes are not a
/// readable JPEG or PNG.
#[wasm_bindgen]
pub fn decode_upload(file_name: &str, bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    upload::accept_upload(file_name, bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
