//! Separable Gaussian blur with reflect padding.

use super::TransformError;
use crate::decode::DecodedImage;

/// Build a normalised 1-D Gaussian kernel of `kernel_size` taps.
///
/// Taps sit at integer offsets from the centre, `-(k-1)/2 ..= (k-1)/2`.
pub fn gaussian_kernel(kernel_size: u32, sigma: f64) -> Vec<f64> {
    let half = (kernel_size as f64 - 1.0) / 2.0;
    let weights: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Blur an image with a `kernel_size x kernel_size` Gaussian.
///
/// Borders are reflected without repeating the edge pixel
/// (`dcb|abcd|cba`).
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for an even or zero kernel
/// size, or a sigma that is not strictly positive.
pub fn gaussian_blur(
    image: &DecodedImage,
    kernel_size: u32,
    sigma: f64,
) -> Result<DecodedImage, TransformError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(TransformError::InvalidParameter {
            name: "kernel_size",
            reason: format!("must be an odd positive integer (got {kernel_size})"),
        });
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(TransformError::InvalidParameter {
            name: "sigma",
            reason: format!("must be positive (got {sigma})"),
        });
    }
    if image.is_empty() || kernel_size == 1 {
        return Ok(image.clone());
    }

    let kernel = gaussian_kernel(kernel_size, sigma);
    let radius = (kernel_size / 2) as i64;
    let (w, h) = (image.width as usize, image.height as usize);
    let channels = image.channels();

    // Horizontal pass into a float buffer
    let mut horizontal = vec![0.0f64; image.pixels.len()];
    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sx = reflect(x as i64 + k as i64 - radius, w);
                    acc += image.pixels[(y * w + sx) * channels + c] as f64 * weight;
                }
                horizontal[(y * w + x) * channels + c] = acc;
            }
        }
    }

    // Vertical pass back to u8
    let mut output = vec![0u8; image.pixels.len()];
    for y in 0..h {
        for x in 0..w {
            for c in 0..channels {
                let mut acc = 0.0;
                for (k, weight) in kernel.iter().enumerate() {
                    let sy = reflect(y as i64 + k as i64 - radius, h);
                    acc += horizontal[(sy * w + x) * channels + c] * weight;
                }
                output[(y * w + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(DecodedImage::with_layout(
        image.width,
        image.height,
        image.layout,
        output,
    ))
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge.
fn reflect(mut i: i64, len: usize) -> usize {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    // Kernels wider than the image may need several bounces
    loop {
        if i < 0 {
            i = -i;
        } else if i >= len {
            i = 2 * (len - 1) - i;
        } else {
            return i as usize;
        }
    }
}
