//! Render pass binding.
//!
//! Runs one augmentation on the uploaded image and returns everything the
//! page shows for it: the transformed image, its PNG encoding, the caption
//! and the torchvision code string.
//!
//! # Example
//!
//! ```typescript
//! const result = render(image, "Gaussian Blur", { kernel_size: 7, sigma: 2.0 });
//! codeBlock.textContent = result.code; // transforms.GaussianBlur(kernel_size=7, sigma=2.0)
//! img.src = URL.createObjectURL(new Blob([result.png()], { type: 'image/png' }));
//! const jpeg = encode_jpeg(result.image(), 90); // download
//! ```

use crate::controls::parse_kind;
use crate::types::JsDecodedImage;
use augment_core::controls::ParamValues;
use augment_core::encode::encode_png;
use augment_core::render::{render as core_render, ORIGINAL_CAPTION};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// Output of one render pass.
#[wasm_bindgen]
pub struct JsRenderResult {
    caption: String,
    code: String,
    image: JsDecodedImage,
    png: Vec<u8>,
}

#[wasm_bindgen]
impl JsRenderResult {
    /// Caption for the transformed image, e.g. "Image after Grayscale"
    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> String {
        self.caption.clone()
    }

    /// Caption for the uploaded image
    #[wasm_bindgen(getter)]
    pub fn original_caption(&self) -> String {
        ORIGINAL_CAPTION.to_string()
    }

    /// torchvision call expression for the applied augmentation
    #[wasm_bindgen(getter)]
    pub fn code(&self) -> String {
        self.code.clone()
    }

    /// The transformed image (copied).
    pub fn image(&self) -> JsDecodedImage {
        self.image.clone()
    }

    /// PNG encoding of the transformed image.
    pub fn png(&self) -> Vec<u8> {
        self.png.clone()
    }
}

/// Apply the selected augmentation once.
///
/// # Arguments
/// * `image` - The uploaded image
/// * `kind` - Selector label, e.g. "Random Rotation"
/// * `values` - Object of control values keyed by control name; missing or
///   `undefined` entries use the control defaults
/// * `seed` - Optional seed for a reproducible result; drawn from
///   `Math.random()` when omitted
///
/// # Errors
/// Returns error if the kind is unknown, the values cannot be deserialized,
/// or the transform or PNG encoding fails.
#[wasm_bindgen]
pub fn render(
    image: &JsDecodedImage,
    kind: &str,
    values: JsValue,
    seed: Option<f64>,
) -> Result<JsRenderResult, JsValue> {
    let values: ParamValues = if values.is_undefined() || values.is_null() {
        ParamValues::default()
    } else {
        serde_wasm_bindgen::from_value(values)
            .map_err(|e| JsValue::from_str(&format!("Invalid control values: {}", e)))?
    };
    let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;

    render_seeded(image, kind, &values, seed).map_err(|e| JsValue::from_str(&e))
}

fn render_seeded(
    image: &JsDecodedImage,
    kind: &str,
    values: &ParamValues,
    seed: u64,
) -> Result<JsRenderResult, String> {
    let kind = parse_kind(kind)?;
    let upload = image.to_decoded();
    let mut rng = StdRng::seed_from_u64(seed);

    let page = core_render(Some(&upload), kind, values, &mut rng).map_err(|e| e.to_string())?;
    let Some(result) = page.result else {
        return Err("Render produced no result".to_string());
    };

    let png = encode_png(&result.image).map_err(|e| e.to_string())?;
    Ok(JsRenderResult {
        caption: result.caption,
        code: result.code,
        image: JsDecodedImage::from_decoded(result.image),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(width: u32, height: u32) -> JsDecodedImage {
        let pixels = (0..width * height * 3).map(|i| (i % 253) as u8).collect();
        JsDecodedImage::checked(width, height, 3, pixels).unwrap()
    }

    #[test]
    fn test_render_grayscale_three_channels() {
        let values = ParamValues::new().with("num_output_channels", 3i64);
        let result = render_seeded(&upload(200, 200), "Grayscale", &values, 1).unwrap();

        assert_eq!(result.caption(), "Image after Grayscale");
        assert_eq!(result.original_caption(), "Original Image");
        assert_eq!(result.code(), "transforms.Grayscale(num_output_channels=3)");
        assert_eq!(result.image().channels(), 3);
        assert_eq!(&result.png()[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_render_gaussian_blur_code() {
        let values = ParamValues::new()
            .with("kernel_size", 7i64)
            .with("sigma", 2.0);
        let result = render_seeded(&upload(40, 30), "Gaussian Blur", &values, 1).unwrap();
        assert_eq!(
            result.code(),
            "transforms.GaussianBlur(kernel_size=7, sigma=2.0)"
        );
    }

    #[test]
    fn test_render_same_seed_same_pixels() {
        let img = upload(50, 40);
        let values = ParamValues::new().with("degrees", 120i64);
        let a = render_seeded(&img, "Random Rotation", &values, 77).unwrap();
        let b = render_seeded(&img, "Random Rotation", &values, 77).unwrap();
        assert_eq!(a.image().pixels(), b.image().pixels());
        assert_eq!(a.png(), b.png());
    }

    #[test]
    fn test_rendered_image_downloads_as_jpeg() {
        let values = ParamValues::new().with("size", 60i64);
        let result = render_seeded(&upload(80, 70), "Center Crop", &values, 3).unwrap();

        let jpeg = augment_core::encode::encode_jpeg(&result.image().to_decoded(), 90).unwrap();
        let back = augment_core::decode::decode_image(&jpeg).unwrap();
        assert_eq!(back.dimensions(), (60, 60));
    }

    #[test]
    fn test_render_unknown_kind() {
        let err = render_seeded(&upload(4, 4), "Posterize", &ParamValues::new(), 0)
            .err()
            .unwrap();
        assert_eq!(err, "Unknown augmentation kind: Posterize");
    }
}
