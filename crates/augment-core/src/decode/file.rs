//! Decoding of uploaded JPEG and PNG files.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage};

/// Decode a JPEG or PNG image from bytes into RGB pixel data.
///
/// The format is guessed from the content, not from the file name. Any
/// alpha channel is dropped and grayscale sources are expanded to RGB, so
/// the result is always a 3-channel image.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are neither JPEG nor PNG.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let corrupted = |e: std::io::Error| DecodeError::CorruptedFile(e.to_string());
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(corrupted)?;

    match reader.format() {
        Some(ImageFormat::Jpeg) | Some(ImageFormat::Png) => {}
        _ => return Err(DecodeError::InvalidFormat),
    }

    let rgb = match reader.decode() {
        Ok(img) => img.into_rgb8(),
        Err(e) => return Err(DecodeError::CorruptedFile(e.to_string())),
    };
    Ok(DecodedImage::from_rgb_image(rgb))
}
