//! Image encoding for display and download.
//!
//! This module provides functionality for:
//! - Encoding images to PNG for lossless on-page display
//! - Encoding images to JPEG with configurable quality for download
//!
//! Both encoders accept single-channel and RGB images.
//!
//! # Examples
//!
//! ```ignore
//! use augment_core::decode::DecodedImage;
//! use augment_core::encode::encode_png;
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
//! let png_bytes = encode_png(&image).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod jpeg;
mod png;

use image::ExtendedColorType;
use thiserror::Error;

use crate::decode::{ColorLayout, DecodedImage};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check dimensions and buffer length, returning the encoder color type.
fn validate(image: &DecodedImage) -> Result<ExtendedColorType, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * image.channels();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(match image.layout {
        ColorLayout::Luma => ExtendedColorType::L8,
        ColorLayout::Rgb => ExtendedColorType::Rgb8,
    })
}
