//! Grayscale conversion.

use super::TransformError;
use crate::decode::{ColorLayout, DecodedImage};

/// ITU-R 601-2 luma in 16-bit fixed point (`0.299 R + 0.587 G + 0.114 B`),
/// rounded to nearest the way PIL's `convert("L")` does.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Convert an image to grayscale with 1 or 3 output channels.
///
/// With 3 channels the luma value is replicated into R, G and B.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` unless
/// `num_output_channels` is 1 or 3.
pub fn grayscale(
    image: &DecodedImage,
    num_output_channels: u8,
) -> Result<DecodedImage, TransformError> {
    let layout = ColorLayout::from_channels(num_output_channels as usize).ok_or_else(|| {
        TransformError::InvalidParameter {
            name: "num_output_channels",
            reason: format!("must be 1 or 3 (got {num_output_channels})"),
        }
    })?;

    let values: Vec<u8> = match image.layout {
        ColorLayout::Luma => image.pixels.clone(),
        ColorLayout::Rgb => image
            .pixels
            .chunks_exact(3)
            .map(|p| luma(p[0], p[1], p[2]))
            .collect(),
    };

    let pixels = match layout {
        ColorLayout::Luma => values,
        ColorLayout::Rgb => values.iter().flat_map(|&v| [v, v, v]).collect(),
    };

    Ok(DecodedImage::with_layout(image.width, image.height, layout, pixels))
}
