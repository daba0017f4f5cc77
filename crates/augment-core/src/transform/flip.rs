//! Horizontal and vertical mirroring.

use rand::Rng;

use crate::decode::DecodedImage;

/// Mirror an image left to right.
pub fn flip_horizontal(image: &DecodedImage) -> DecodedImage {
    let channels = image.channels();
    let row_len = image.width as usize * channels;
    let mut output = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_len.max(1)) {
        for pixel in row.chunks_exact(channels).rev() {
            output.extend_from_slice(pixel);
        }
    }

    DecodedImage::with_layout(image.width, image.height, image.layout, output)
}

/// Mirror an image top to bottom.
pub fn flip_vertical(image: &DecodedImage) -> DecodedImage {
    let row_len = image.width as usize * image.channels();
    let mut output = Vec::with_capacity(image.pixels.len());

    for row in image.pixels.chunks_exact(row_len.max(1)).rev() {
        output.extend_from_slice(row);
    }

    DecodedImage::with_layout(image.width, image.height, image.layout, output)
}

/// Flip horizontally when a uniform draw falls below `p`.
///
/// `p >= 1.0` always flips, `p <= 0.0` never does.
pub fn random_horizontal_flip<R: Rng + ?Sized>(
    image: &DecodedImage,
    p: f64,
    rng: &mut R,
) -> DecodedImage {
    if rng.random::<f64>() < p {
        flip_horizontal(image)
    } else {
        image.clone()
    }
}

/// Flip vertically when a uniform draw falls below `p`.
pub fn random_vertical_flip<R: Rng + ?Sized>(
    image: &DecodedImage,
    p: f64,
    rng: &mut R,
) -> DecodedImage {
    if rng.random::<f64>() < p {
        flip_vertical(image)
    } else {
        image.clone()
    }
}
