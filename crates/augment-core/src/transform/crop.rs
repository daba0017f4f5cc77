//! Cropping operations: plain, centred and random resized crops.
//!
//! Crop regions are in pixel coordinates with the origin at the top-left
//! corner.

use image::imageops::FilterType;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{resize, TransformError};
use crate::decode::DecodedImage;

/// Attempts made to sample a fitting region before falling back.
const RESIZED_CROP_ATTEMPTS: usize = 10;

/// A rectangular region of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Apply a pixel-coordinate crop.
///
/// # Behavior
///
/// - A region extending beyond the image is clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - A region covering the whole image returns a copy of the original
pub fn apply_crop(image: &DecodedImage, region: CropRegion) -> DecodedImage {
    if image.is_empty() {
        return image.clone();
    }

    let left = region.left.min(image.width - 1);
    let top = region.top.min(image.height - 1);
    let right = left.saturating_add(region.width).min(image.width);
    let bottom = top.saturating_add(region.height).min(image.height);

    // Ensure minimum dimensions
    let out_width = (right - left).max(1);
    let out_height = (bottom - top).max(1);

    if out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let channels = image.channels();
    let row_bytes = out_width as usize * channels;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in top..top + out_height {
        let start = image.index(left, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    DecodedImage::with_layout(out_width, out_height, image.layout, output)
}

/// Crop a `size x size` square from the centre of the image.
///
/// Offsets are `round((dim - size) / 2)` with ties to even. When `size`
/// exceeds a dimension the missing border is filled with black.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for a zero size and
/// `TransformError::EmptyImage` for an empty source.
pub fn center_crop(image: &DecodedImage, size: u32) -> Result<DecodedImage, TransformError> {
    if size == 0 {
        return Err(TransformError::InvalidParameter {
            name: "size",
            reason: "crop size must be positive".to_string(),
        });
    }
    if image.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    let top = centered_offset(image.height, size);
    let left = centered_offset(image.width, size);
    Ok(crop_with_fill(image, left, top, size, size))
}

/// Crop `region` out of the image and resize it to `size x size`.
pub fn resized_crop(
    image: &DecodedImage,
    region: CropRegion,
    size: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    let cropped = apply_crop(image, region);
    resize(&cropped, size, size, filter)
}

/// Pick a crop region covering a random fraction of the area with a random
/// aspect ratio.
///
/// `scale` bounds the fraction of the source area, `ratio` bounds the
/// width / height aspect (sampled log-uniformly). After
/// `RESIZED_CROP_ATTEMPTS` misses the whole image is used, trimmed to the
/// nearest allowed aspect ratio.
pub fn sample_resized_crop_region<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    scale: (f64, f64),
    ratio: (f64, f64),
    rng: &mut R,
) -> CropRegion {
    let area = width as f64 * height as f64;
    let (log_lo, log_hi) = (ratio.0.ln(), ratio.1.ln());

    for _ in 0..RESIZED_CROP_ATTEMPTS {
        let target_area = area * rng.random_range(scale.0..=scale.1);
        let aspect = rng.random_range(log_lo..=log_hi).exp();

        let w = (target_area * aspect).sqrt().round() as u32;
        let h = (target_area / aspect).sqrt().round() as u32;

        if w > 0 && w <= width && h > 0 && h <= height {
            let top = rng.random_range(0..=height - h);
            let left = rng.random_range(0..=width - w);
            return CropRegion::new(left, top, w, h);
        }
    }

    // Fallback to a central crop
    let in_ratio = width as f64 / height as f64;
    let (w, h) = if in_ratio < ratio.0 {
        (width, ((width as f64 / ratio.0).round() as u32).clamp(1, height))
    } else if in_ratio > ratio.1 {
        (((height as f64 * ratio.1).round() as u32).clamp(1, width), height)
    } else {
        (width, height)
    };
    debug!("resized crop fell back to central {w}x{h} region of {width}x{height}");

    CropRegion::new((width - w) / 2, (height - h) / 2, w, h)
}

/// Crop a random region (see [`sample_resized_crop_region`]) and resize it
/// to `size x size` with bilinear filtering.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` when the ranges are not
/// `0 < lo <= hi` (scale additionally `hi <= 1`) or the size is zero.
pub fn random_resized_crop<R: Rng + ?Sized>(
    image: &DecodedImage,
    size: u32,
    scale: (f64, f64),
    ratio: (f64, f64),
    rng: &mut R,
) -> Result<DecodedImage, TransformError> {
    if !(0.0 < scale.0 && scale.0 <= scale.1 && scale.1 <= 1.0) {
        return Err(TransformError::InvalidParameter {
            name: "scale",
            reason: format!(
                "range must satisfy 0 < min <= max <= 1 (got [{}, {}])",
                scale.0, scale.1
            ),
        });
    }
    if !(0.0 < ratio.0 && ratio.0 <= ratio.1) {
        return Err(TransformError::InvalidParameter {
            name: "ratio",
            reason: format!(
                "range must satisfy 0 < min <= max (got [{}, {}])",
                ratio.0, ratio.1
            ),
        });
    }
    if image.is_empty() {
        return Err(TransformError::EmptyImage);
    }

    let region = sample_resized_crop_region(image.width, image.height, scale, ratio, rng);
    resized_crop(image, region, size, FilterType::Triangle)
}

/// `round((dim - size) / 2)` with ties to even; negative when `size > dim`.
fn centered_offset(dim: u32, size: u32) -> i64 {
    ((dim as f64 - size as f64) / 2.0).round_ties_even() as i64
}

/// Crop a region that may extend past the image, filling the outside black.
fn crop_with_fill(
    image: &DecodedImage,
    left: i64,
    top: i64,
    width: u32,
    height: u32,
) -> DecodedImage {
    let channels = image.channels();
    let mut output = DecodedImage::blank(width, height, image.layout);

    for y in 0..height as i64 {
        let src_y = top + y;
        if src_y < 0 || src_y >= image.height as i64 {
            continue;
        }
        // Overlap of this output row with the source row
        let x_start = (-left).max(0);
        let x_end = (image.width as i64 - left).min(width as i64);
        if x_start >= x_end {
            continue;
        }

        let src = image.index((left + x_start) as u32, src_y as u32);
        let dst = (y as usize * width as usize + x_start as usize) * channels;
        let len = (x_end - x_start) as usize * channels;
        output.pixels[dst..dst + len].copy_from_slice(&image.pixels[src..src + len]);
    }

    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
