//! JPEG encoding for downloading results.

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use super::{validate, EncodeError};
use crate::decode::DecodedImage;

/// Encode a grayscale or RGB image as JPEG. `quality` is clamped to 1..=100.
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let color = validate(image)?;
    let quality = quality.clamp(1, 100);

    let mut out = Vec::with_capacity(image.pixels.len() / 4);
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(&image.pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out)
}
