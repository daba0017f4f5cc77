//! Image rotation about the centre with nearest or bilinear sampling.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel centre in the output
//! image, we calculate where it lands in the source and sample there.
//!
//! For rotation by angle θ, with the y axis pointing down, the inverse
//! transform is:
//! ```text
//! src_x = (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + src_cx
//! src_y = (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + src_cy
//! ```
//!
//! Output pixels that map outside the source are filled with black.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// How rotated output pixels are sampled from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest source pixel, no blending.
    #[default]
    Nearest,
    /// Weighted blend of the 4 nearest source pixels.
    Bilinear,
}

/// Canvas size that holds a `width` x `height` image turned by `angle_degrees`.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let abs_angle = (angle_degrees % 360.0).abs();

    // Fast paths: multiples of 90 degrees either keep or swap dimensions
    if abs_angle < 0.001 || (abs_angle - 180.0).abs() < 0.001 || (360.0 - abs_angle) < 0.001 {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();
    let (w, h) = (width as f64, height as f64);

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate `image` counter-clockwise by `angle_degrees` about its centre.
///
/// With `expand` the canvas grows to fit the whole rotated image. Otherwise
/// the source dimensions are kept and the corners are clipped.
pub fn apply_rotation(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
    expand: bool,
) -> DecodedImage {
    if angle_degrees.abs() < 0.001 || image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = if expand {
        compute_rotated_bounds(image.width, image.height, angle_degrees)
    } else {
        (image.width, image.height)
    };

    // With the y axis pointing down, sampling at +θ turns the content
    // counter-clockwise on screen
    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let channels = image.channels();
    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];
    let mut pixel = [0u8; 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Source position in pixel-index space (pixel centres at integers)
            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let inside = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, &mut pixel),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, &mut pixel),
            };

            if inside {
                let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
                output[dst_idx..dst_idx + channels].copy_from_slice(&pixel[..channels]);
            }
        }
    }

    DecodedImage::with_layout(dst_w, dst_h, image.layout, output)
}

/// Rotate by an angle drawn uniformly from `[-degrees, degrees]`.
pub fn random_rotation<R: Rng + ?Sized>(
    image: &DecodedImage,
    degrees: f64,
    filter: InterpolationFilter,
    expand: bool,
    rng: &mut R,
) -> DecodedImage {
    let limit = degrees.abs();
    let angle = rng.random_range(-limit..=limit);
    debug!("random rotation: {angle:.2} degrees (limit {limit})");
    apply_rotation(image, angle, filter, expand)
}

/// Copy the nearest source pixel into `out`. Returns false when outside.
fn sample_nearest(image: &DecodedImage, x: f64, y: f64, out: &mut [u8; 3]) -> bool {
    let px = x.round();
    let py = y.round();
    if px < 0.0 || py < 0.0 || px >= image.width as f64 || py >= image.height as f64 {
        return false;
    }

    let idx = image.index(px as u32, py as u32);
    let channels = image.channels();
    out[..channels].copy_from_slice(&image.pixels[idx..idx + channels]);
    true
}

/// Bilinear sample into `out`. Returns false when outside.
///
/// Points within half a pixel of the border are sampled with the
/// neighbours clamped to the edge.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64, out: &mut [u8; 3]) -> bool {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < -0.5 || y < -0.5 || x >= w - 0.5 || y >= h - 0.5 {
        return false;
    }

    let x = x.clamp(0.0, w - 1.0);
    let y = y.clamp(0.0, h - 1.0);
    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let i00 = image.index(x0, y0);
    let i10 = image.index(x1, y0);
    let i01 = image.index(x0, y1);
    let i11 = image.index(x1, y1);

    for c in 0..image.channels() {
        let v = image.pixels[i00 + c] as f64 * (1.0 - fx) * (1.0 - fy)
            + image.pixels[i10 + c] as f64 * fx * (1.0 - fy)
            + image.pixels[i01 + c] as f64 * (1.0 - fx) * fy
            + image.pixels[i11 + c] as f64 * fx * fy;
        out[c] = v.clamp(0.0, 255.0).round() as u8;
    }

    true
}
