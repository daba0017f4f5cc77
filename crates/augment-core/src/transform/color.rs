//! Color jitter: random brightness, contrast, saturation and hue.
//!
//! Brightness, contrast and saturation blend the image with a degenerate
//! version of itself:
//! ```text
//! out = degenerate + factor * (image - degenerate)
//! ```
//! where the degenerate image is black (brightness), the mean gray level
//! (contrast) or the per-pixel gray level (saturation). Hue rotates the HSV
//! hue by a fraction of a full turn.

use rand::seq::SliceRandom;
use rand::Rng;

use super::grayscale::luma;
use super::TransformError;
use crate::decode::{ColorLayout, DecodedImage};

/// Concrete factors for one jitter pass.
///
/// `None` skips the adjustment. `order` lists the adjustments to run as
/// indices 0 = brightness, 1 = contrast, 2 = saturation, 3 = hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorJitterFactors {
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub saturation: Option<f64>,
    pub hue: Option<f64>,
    pub order: [usize; 4],
}

impl ColorJitterFactors {
    /// Draw factors for the given jitter strengths.
    ///
    /// Brightness, contrast and saturation factors come from
    /// `[max(0, 1 - v), 1 + v]`, the hue shift from `[-|h|, |h|]`. A zero
    /// strength leaves that adjustment out. The order is shuffled.
    pub fn sample<R: Rng + ?Sized>(
        brightness: f64,
        contrast: f64,
        saturation: f64,
        hue: f64,
        rng: &mut R,
    ) -> Self {
        let mut factor = |v: f64| {
            (v > 0.0).then(|| rng.random_range((1.0 - v).max(0.0)..=1.0 + v))
        };
        let brightness = factor(brightness);
        let contrast = factor(contrast);
        let saturation = factor(saturation);

        let h = hue.abs();
        let hue = (h > 0.0).then(|| rng.random_range(-h..=h));

        let mut order = [0, 1, 2, 3];
        order.shuffle(rng);

        Self {
            brightness,
            contrast,
            saturation,
            hue,
            order,
        }
    }

    /// Apply the adjustments in `order`.
    pub fn apply(&self, image: &DecodedImage) -> DecodedImage {
        let mut output = image.clone();
        for step in self.order {
            output = match step {
                0 => self.brightness.map(|f| adjust_brightness(&output, f)),
                1 => self.contrast.map(|f| adjust_contrast(&output, f)),
                2 => self.saturation.map(|f| adjust_saturation(&output, f)),
                _ => self.hue.map(|f| adjust_hue(&output, f)),
            }
            .unwrap_or(output);
        }
        output
    }
}

/// Randomly jitter brightness, contrast, saturation and hue.
///
/// A negative `hue` is treated as its magnitude; torchvision rejects it.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` for negative brightness,
/// contrast or saturation, or a hue magnitude above 0.5.
pub fn color_jitter<R: Rng + ?Sized>(
    image: &DecodedImage,
    brightness: f64,
    contrast: f64,
    saturation: f64,
    hue: f64,
    rng: &mut R,
) -> Result<DecodedImage, TransformError> {
    for (name, value) in [
        ("brightness", brightness),
        ("contrast", contrast),
        ("saturation", saturation),
    ] {
        if !(value >= 0.0) {
            return Err(TransformError::InvalidParameter {
                name,
                reason: format!("must be non negative (got {value})"),
            });
        }
    }
    if !(hue.abs() <= 0.5) {
        return Err(TransformError::InvalidParameter {
            name: "hue",
            reason: format!("must lie in [-0.5, 0.5] (got {hue})"),
        });
    }

    let factors = ColorJitterFactors::sample(brightness, contrast, saturation, hue, rng);
    log::debug!("color jitter factors: {factors:?}");
    Ok(factors.apply(image))
}

/// Scale all channels by `factor`.
pub fn adjust_brightness(image: &DecodedImage, factor: f64) -> DecodedImage {
    map_pixels(image, |_, v| v * factor)
}

/// Blend with the image's mean gray level.
pub fn adjust_contrast(image: &DecodedImage, factor: f64) -> DecodedImage {
    let mean = mean_luma(image).round();
    map_pixels(image, |_, v| mean + factor * (v - mean))
}

/// Blend each pixel with its own gray level. Single-channel images are
/// returned unchanged.
pub fn adjust_saturation(image: &DecodedImage, factor: f64) -> DecodedImage {
    if image.layout == ColorLayout::Luma {
        return image.clone();
    }
    map_pixels(image, |rgb, v| {
        let gray = luma(rgb[0], rgb[1], rgb[2]) as f64;
        gray + factor * (v - gray)
    })
}

/// Rotate the hue by `shift` turns (`-0.5..=0.5`). Single-channel images
/// are returned unchanged.
pub fn adjust_hue(image: &DecodedImage, shift: f64) -> DecodedImage {
    if image.layout == ColorLayout::Luma || shift == 0.0 {
        return image.clone();
    }

    let mut pixels = Vec::with_capacity(image.pixels.len());
    for rgb in image.pixels.chunks_exact(3) {
        let (h, s, v) = rgb_to_hsv(rgb[0], rgb[1], rgb[2]);
        let h = (h + shift).rem_euclid(1.0);
        pixels.extend_from_slice(&hsv_to_rgb(h, s, v));
    }

    DecodedImage::with_layout(image.width, image.height, image.layout, pixels)
}

/// Apply `f(pixel, channel_value)` to every channel value, clamping to u8.
fn map_pixels(image: &DecodedImage, f: impl Fn(&[u8], f64) -> f64) -> DecodedImage {
    let channels = image.channels();
    let mut pixels = Vec::with_capacity(image.pixels.len());
    for px in image.pixels.chunks_exact(channels) {
        for &v in px {
            pixels.push(f(px, v as f64).round().clamp(0.0, 255.0) as u8);
        }
    }
    DecodedImage::with_layout(image.width, image.height, image.layout, pixels)
}

fn mean_luma(image: &DecodedImage) -> f64 {
    let count = image.pixel_count() as f64;
    if count == 0.0 {
        return 0.0;
    }
    let sum: u64 = match image.layout {
        ColorLayout::Luma => image.pixels.iter().map(|&v| v as u64).sum(),
        ColorLayout::Rgb => image
            .pixels
            .chunks_exact(3)
            .map(|p| luma(p[0], p[1], p[2]) as u64)
            .sum(),
    };
    sum as f64 / count
}

/// RGB to HSV with all components in `0.0..=1.0`.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta == 0.0 {
        return (0.0, s, max);
    }

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h / 6.0, s, max)
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let sector = (h * 6.0).rem_euclid(6.0);
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn colorful() -> DecodedImage {
        DecodedImage::new(
            4,
            1,
            vec![200, 40, 40, 40, 200, 40, 40, 40, 200, 90, 120, 150],
        )
    }

    #[test]
    fn test_zero_strength_is_identity() {
        let img = colorful();
        let mut rng = StdRng::seed_from_u64(5);
        let result = color_jitter(&img, 0.0, 0.0, 0.0, 0.0, &mut rng).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_sampled_factors_within_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let f = ColorJitterFactors::sample(0.5, 2.0, 1.0, -0.25, &mut rng);
            let b = f.brightness.unwrap();
            assert!((0.5..=1.5).contains(&b));
            let c = f.contrast.unwrap();
            assert!((0.0..=3.0).contains(&c));
            let h = f.hue.unwrap();
            assert!((-0.25..=0.25).contains(&h));

            let mut order = f.order;
            order.sort();
            assert_eq!(order, [0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_brightness() {
        let img = DecodedImage::new_luma(3, 1, vec![0, 100, 200]);
        assert_eq!(adjust_brightness(&img, 0.5).pixels, vec![0, 50, 100]);
        assert_eq!(adjust_brightness(&img, 2.0).pixels, vec![0, 200, 255]);
        assert_eq!(adjust_brightness(&img, 0.0).pixels, vec![0, 0, 0]);
    }

    #[test]
    fn test_contrast_zero_gives_mean() {
        let img = DecodedImage::new_luma(2, 1, vec![100, 200]);
        assert_eq!(adjust_contrast(&img, 0.0).pixels, vec![150, 150]);
        assert_eq!(adjust_contrast(&img, 1.0), img);
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let img = colorful();
        let result = adjust_saturation(&img, 0.0);
        for (px, src) in result.pixels.chunks_exact(3).zip(img.pixels.chunks_exact(3)) {
            let gray = luma(src[0], src[1], src[2]);
            assert_eq!(px, &[gray, gray, gray]);
        }
    }

    #[test]
    fn test_saturation_and_hue_skip_luma() {
        let img = DecodedImage::new_luma(2, 1, vec![10, 20]);
        assert_eq!(adjust_saturation(&img, 0.0), img);
        assert_eq!(adjust_hue(&img, 0.3), img);
    }

    #[test]
    fn test_hue_third_turn_cycles_primaries() {
        let img = DecodedImage::new(1, 1, vec![255, 0, 0]);
        let shifted = adjust_hue(&img, 1.0 / 3.0);
        assert_eq!(shifted.pixels, vec![0, 255, 0]);

        let back = adjust_hue(&img, -1.0 / 3.0);
        assert_eq!(back.pixels, vec![0, 0, 255]);
    }

    #[test]
    fn test_hsv_roundtrip_gray() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert_eq!(hsv_to_rgb(h, s, v), [128, 128, 128]);
    }

    #[test]
    fn test_negative_hue_acts_as_magnitude() {
        let img = colorful();
        let neg = color_jitter(&img, 0.0, 0.0, 0.0, -0.3, &mut StdRng::seed_from_u64(8)).unwrap();
        let pos = color_jitter(&img, 0.0, 0.0, 0.0, 0.3, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(neg, pos);
    }

    #[test]
    fn test_invalid_strengths() {
        let img = colorful();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(color_jitter(&img, -0.1, 0.0, 0.0, 0.0, &mut rng).is_err());
        assert!(color_jitter(&img, 0.0, 0.0, 0.0, 0.6, &mut rng).is_err());
        assert!(color_jitter(&img, 0.0, 0.0, f64::NAN, 0.0, &mut rng).is_err());
    }
}
