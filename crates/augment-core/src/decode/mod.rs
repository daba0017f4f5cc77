//! Image decoding for uploaded files.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG uploads into RGB bitmaps
//! - The in-memory image type shared by every transform
//!
//! # Examples
//!
//! ```ignore
//! use augment_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod types;

pub use file::decode_image;
pub use types::{ColorLayout, DecodeError, DecodedImage};
