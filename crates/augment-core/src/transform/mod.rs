//! Image augmentation primitives.
//!
//! Each primitive takes a source image and returns a new one; the source is
//! never modified. All primitives accept both single-channel and RGB images.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop coordinates are in pixels
//! - Origin is top-left corner

mod blur;
mod color;
mod crop;
mod flip;
mod grayscale;
mod resize;
mod rotation;

use thiserror::Error;

pub use blur::{gaussian_blur, gaussian_kernel};
pub use color::{
    adjust_brightness, adjust_contrast, adjust_hue, adjust_saturation, color_jitter,
    ColorJitterFactors,
};
pub use crop::{
    apply_crop, center_crop, random_resized_crop, resized_crop, sample_resized_crop_region,
    CropRegion,
};
pub use flip::{flip_horizontal, flip_vertical, random_horizontal_flip, random_vertical_flip};
pub use grayscale::{grayscale, luma};
pub use resize::resize;
pub use rotation::{apply_rotation, compute_rotated_bounds, random_rotation, InterpolationFilter};

/// Errors raised by augmentation primitives.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A parameter is outside the range the primitive accepts.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The source image has no pixels.
    #[error("Cannot transform an empty image")]
    EmptyImage,

    /// The resampler rejected the image.
    #[error("Resize failed: {0}")]
    Resize(String),
}
