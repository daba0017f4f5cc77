//! PNG encoding for on-page display.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use super::{validate, EncodeError};
use crate::decode::DecodedImage;

/// Encode an image as PNG, keeping its channel layout.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or
/// `EncodeError::InvalidPixelData` for malformed images and
/// `EncodeError::EncodingFailed` if the encoder fails.
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let color = validate(image)?;

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
