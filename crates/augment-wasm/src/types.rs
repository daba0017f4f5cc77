//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core augment types,
//! handling the conversion between Rust and JavaScript data representations.

use augment_core::decode::{ColorLayout, DecodedImage};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// Holds either RGB (3 channels) or grayscale (1 channel) pixel data. A
/// single-channel image only appears as the output of `Grayscale` with
/// `num_output_channels=1`; uploads are always RGB.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions, channel count (1 or 3) and pixel data.
    ///
    /// # Errors
    /// Returns an error if the channel count is unsupported or the buffer
    /// length doesn't match `width * height * channels`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsDecodedImage, JsValue> {
        Self::checked(width, height, channels, pixels).map_err(|e| JsValue::from_str(&e))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved channels per pixel: 1 (grayscale) or 3 (RGB)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Pixel data expanded to RGBA, ready for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        match self.channels {
            1 => {
                for &v in &self.pixels {
                    rgba.extend_from_slice(&[v, v, v, 255]);
                }
            }
            _ => {
                for px in self.pixels.chunks_exact(3) {
                    rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
        }
        rgba
    }
}

impl JsDecodedImage {
    /// Validating constructor shared by the JS constructor and tests.
    pub(crate) fn checked(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, String> {
        let layout = ColorLayout::from_channels(channels as usize)
            .ok_or_else(|| format!("Unsupported channel count: {channels} (expected 1 or 3)"))?;
        let expected = width as usize * height as usize * layout.channels();
        if pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {expected} bytes, got {}",
                pixels.len()
            ));
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Create a JsDecodedImage from a core DecodedImage.
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            channels: img.channels() as u8,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        let layout = match self.channels {
            1 => ColorLayout::Luma,
            _ => ColorLayout::Rgb,
        };
        DecodedImage::with_layout(self.width, self.height, layout, self.pixels.clone())
    }
}
