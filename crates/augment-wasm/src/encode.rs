//! Image encoding WASM bindings.
//!
//! - [`encode_png`] - lossless encoding for on-page display
//! - [`encode_jpeg`] - JPEG encoding for downloading a result
//!
//! # Example
//!
//! ```typescript
//! const png = encode_png(result.image());
//! const jpeg = encode_jpeg(result.image(), 90);
//! ```

use crate::types::JsDecodedImage;
use augment_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to PNG bytes, keeping 1-channel images grayscale.
///
/// # Errors
///
/// Returns an error if the image has zero width or height, or encoding fails.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_decoded()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
///
/// # Errors
///
/// Returns an error if the image has zero width or height, or encoding fails.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_decoded(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsDecodedImage::new(20, 20, 3, vec![64u8; 20 * 20 * 3]).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let img = JsDecodedImage::new(50, 50, 3, vec![128u8; 50 * 50 * 3]).unwrap();
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_dimensions() {
        let img = JsDecodedImage::new(0, 10, 3, vec![]).unwrap();
        assert!(encode_png(&img).is_err());
        assert!(encode_jpeg(&img, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_quality_range() {
        let img = JsDecodedImage::new(50, 50, 3, vec![128u8; 50 * 50 * 3]).unwrap();
        let low = encode_jpeg(&img, 20).unwrap();
        let high = encode_jpeg(&img, 95).unwrap();
        assert_eq!(&low[0..2], &[0xFF, 0xD8]);
        assert_eq!(&high[0..2], &[0xFF, 0xD8]);
    }
}
