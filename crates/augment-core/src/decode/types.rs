//! In-memory image model shared by decoding, transforms and encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an uploaded file could not be turned into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Neither a JPEG nor a PNG signature was found.
    #[error("Unsupported image format (expected JPEG or PNG)")]
    InvalidFormat,

    /// The signature matched but the data could not be decoded.
    #[error("Could not decode image data: {0}")]
    CorruptedFile(String),
}

/// Channel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorLayout {
    /// Single luminance channel.
    Luma,
    /// Interleaved red, green, blue.
    #[default]
    Rgb,
}

impl ColorLayout {
    /// Number of interleaved channels per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorLayout::Luma => 1,
            ColorLayout::Rgb => 3,
        }
    }

    /// Layout for a channel count, if supported.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ColorLayout::Luma),
            3 => Some(ColorLayout::Rgb),
            _ => None,
        }
    }
}

/// 8-bit image, either grayscale or RGB, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: ColorLayout,
    /// Pixel data in row-major order, `layout.channels()` bytes per pixel.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// RGB image from interleaved bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, ColorLayout::Rgb, pixels)
    }

    /// Grayscale image, one byte per pixel.
    pub fn new_luma(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, ColorLayout::Luma, pixels)
    }

    /// Create an image with an explicit channel layout.
    pub fn with_layout(width: u32, height: u32, layout: ColorLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "{width}x{height} {layout:?} image needs a matching buffer"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a black image of the given size and layout.
    pub fn blank(width: u32, height: u32, layout: ColorLayout) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self::with_layout(width, height, layout, vec![0u8; len])
    }

    /// Take ownership of an `image` crate RGB buffer.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Take ownership of an `image` crate grayscale buffer.
    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new_luma(width, height, img.into_raw())
    }

    /// Number of interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Number of pixels (not bytes).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when there is nothing to transform.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
