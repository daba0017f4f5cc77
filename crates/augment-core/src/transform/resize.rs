//! Image resizing using the `image` crate's resamplers.

use image::imageops::{self, FilterType};

use super::TransformError;
use crate::decode::{ColorLayout, DecodedImage};

/// Scale `image` to exactly `width` x `height`, keeping its color layout.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for a zero target dimension and
/// `TransformError::Resize` if the pixel buffer does not match the dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameter {
            name: "size",
            reason: format!("target dimensions must be positive (got {width}x{height})"),
        });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let mismatch = || TransformError::Resize("pixel buffer does not match dimensions".to_string());

    match image.layout {
        ColorLayout::Rgb => {
            let src = image::RgbImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            let resized = imageops::resize(&src, width, height, filter);
            Ok(DecodedImage::from_rgb_image(resized))
        }
        ColorLayout::Luma => {
            let src = image::GrayImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            let resized = imageops::resize(&src, width, height, filter);
            Ok(DecodedImage::from_gray_image(resized))
        }
    }
}
