//! Augmentation selector and control descriptor bindings.
//!
//! Control descriptors are serialized with `serde_wasm_bindgen` as plain
//! objects, e.g.
//!
//! ```typescript
//! { name: "sigma", label: "Sigma",
//!   widget: { type: "slider", min: 0.1, max: 5.0, step: 0.01, default: 1.0, integer: false } }
//! ```

use augment_core::augmentation::AugmentationKind;
use augment_core::controls;
use wasm_bindgen::prelude::*;

/// Selector labels for every augmentation, in display order.
#[wasm_bindgen]
pub fn augmentation_kinds() -> Vec<String> {
    AugmentationKind::ALL
        .iter()
        .map(|kind| kind.label().to_string())
        .collect()
}

/// Control descriptors for `kind` on an image of `width x height`.
///
/// # Errors
/// Returns error if `kind` is not one of the selector labels.
#[wasm_bindgen]
pub fn controls_for(kind: &str, width: u32, height: u32) -> Result<JsValue, JsValue> {
    let kind = parse_kind(kind).map_err(|e| JsValue::from_str(&e))?;
    let controls = controls::controls_for(kind, (width, height));
    serde_wasm_bindgen::to_value(&controls)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize controls: {}", e)))
}

pub(crate) fn parse_kind(label: &str) -> Result<AugmentationKind, String> {
    label.parse::<AugmentationKind>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augmentation_kinds() {
        let kinds = augmentation_kinds();
        assert_eq!(kinds.len(), 8);
        assert_eq!(kinds[0], "Horizontal Flip");
        assert_eq!(kinds[7], "Gaussian Blur");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Color Jitter"), Ok(AugmentationKind::ColorJitter));
        assert_eq!(
            parse_kind("color jitter"),
            Err("Unknown augmentation kind: color jitter".to_string())
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_controls_for_serializes_array() {
        let value = controls_for("Random Resized Crop", 640, 480).unwrap();
        let array = js_sys::Array::from(&value);
        assert_eq!(array.length(), 3);

        let first = array.get(0);
        let name = js_sys::Reflect::get(&first, &"name".into()).unwrap();
        assert_eq!(name.as_string().as_deref(), Some("size"));
    }

    #[wasm_bindgen_test]
    fn test_controls_for_flip_is_empty() {
        let value = controls_for("Vertical Flip", 100, 100).unwrap();
        assert_eq!(js_sys::Array::from(&value).length(), 0);
    }

    #[wasm_bindgen_test]
    fn test_controls_for_unknown_kind() {
        assert!(controls_for("Sharpen", 100, 100).is_err());
    }
}
