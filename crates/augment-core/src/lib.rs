//! Augment Core - image augmentation explorer
//!
//! This crate holds everything behind the explorer page: decoding uploads,
//! the eight torchvision-style augmentations, the controls each one exposes,
//! and the render pass that ties them together. It has no UI of its own;
//! `augment-wasm` exposes it to the browser.

pub mod augmentation;
pub mod controls;
pub mod decode;
pub mod encode;
pub mod render;
pub mod transform;
pub mod upload;

pub use augmentation::{Augmentation, AugmentationKind, ParamError};
pub use controls::{controls_for, ParamControl, ParamValue, ParamValues, Widget};
pub use decode::{decode_image, ColorLayout, DecodeError, DecodedImage};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use render::{render, Page, TransformResult};
pub use transform::TransformError;
pub use upload::{accept_upload, is_accepted_file, UploadError, ACCEPTED_EXTENSIONS};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn upload_png(width: u32, height: u32) -> Vec<u8> {
        let pixels = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, (i / 7 % 256) as u8, 200])
            .collect();
        encode_png(&DecodedImage::new(width, height, pixels)).unwrap()
    }

    #[test]
    fn test_upload_render_encode() {
        let bytes = upload_png(60, 40);
        let image = accept_upload("sample.png", &bytes).unwrap();

        let values = ParamValues::new().with("degrees", 30i64);
        let mut rng = StdRng::seed_from_u64(7);
        let page = render(Some(&image), AugmentationKind::RandomRotation, &values, &mut rng).unwrap();

        let result = page.result.unwrap();
        assert_eq!(result.code, "transforms.RandomRotation(degrees=30)");
        assert_eq!(result.image.dimensions(), (60, 40));

        let png = encode_png(&result.image).unwrap();
        assert_eq!(decode_image(&png).unwrap().dimensions(), (60, 40));
    }

    #[test]
    fn test_grayscale_single_channel_stays_single_channel_in_png() {
        let image = decode_image(&upload_png(16, 16)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let page = render(
            Some(&image),
            AugmentationKind::Grayscale,
            &ParamValues::new(),
            &mut rng,
        )
        .unwrap();

        let result = page.result.unwrap();
        assert_eq!(result.image.layout, ColorLayout::Luma);
        let png = encode_png(&result.image).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
    }

    #[test]
    fn test_every_kind_renders_on_small_upload() {
        let image = decode_image(&upload_png(20, 35)).unwrap();
        for kind in AugmentationKind::ALL {
            let mut rng = StdRng::seed_from_u64(3);
            let page = render(Some(&image), kind, &ParamValues::new(), &mut rng).unwrap();
            let result = page.result.unwrap();
            assert!(!result.image.is_empty(), "{kind} produced an empty image");
            assert!(result.code.starts_with("transforms."));
        }
    }
}
