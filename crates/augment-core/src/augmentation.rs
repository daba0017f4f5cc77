//! Augmentation kinds, their parameters and the matching torchvision call.
//!
//! Every kind carries its own parameter struct, so dispatch is an exhaustive
//! match over [`Augmentation`]. The [`Display`](fmt::Display) output of an
//! augmentation is the torchvision expression that would produce it, e.g.
//! `transforms.GaussianBlur(kernel_size=7, sigma=2.0)`.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::transform::{
    center_crop, color_jitter, gaussian_blur, grayscale, random_horizontal_flip,
    random_resized_crop, random_rotation, random_vertical_flip, InterpolationFilter,
    TransformError,
};

/// Errors raised while interpreting UI selections.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    /// The selector sent a label that names no augmentation.
    #[error("Unknown augmentation kind: {0}")]
    UnknownKind(String),
}

/// The eight selectable augmentation kinds, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AugmentationKind {
    HorizontalFlip,
    VerticalFlip,
    RandomRotation,
    ColorJitter,
    Grayscale,
    CenterCrop,
    RandomResizedCrop,
    GaussianBlur,
}

impl AugmentationKind {
    /// All kinds in the order the selector lists them.
    pub const ALL: [AugmentationKind; 8] = [
        AugmentationKind::HorizontalFlip,
        AugmentationKind::VerticalFlip,
        AugmentationKind::RandomRotation,
        AugmentationKind::ColorJitter,
        AugmentationKind::Grayscale,
        AugmentationKind::CenterCrop,
        AugmentationKind::RandomResizedCrop,
        AugmentationKind::GaussianBlur,
    ];

    /// Label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            AugmentationKind::HorizontalFlip => "Horizontal Flip",
            AugmentationKind::VerticalFlip => "Vertical Flip",
            AugmentationKind::RandomRotation => "Random Rotation",
            AugmentationKind::ColorJitter => "Color Jitter",
            AugmentationKind::Grayscale => "Grayscale",
            AugmentationKind::CenterCrop => "Center Crop",
            AugmentationKind::RandomResizedCrop => "Random Resized Crop",
            AugmentationKind::GaussianBlur => "Gaussian Blur",
        }
    }

    /// Name of the torchvision transform class.
    pub fn class_name(self) -> &'static str {
        match self {
            AugmentationKind::HorizontalFlip => "RandomHorizontalFlip",
            AugmentationKind::VerticalFlip => "RandomVerticalFlip",
            AugmentationKind::RandomRotation => "RandomRotation",
            AugmentationKind::ColorJitter => "ColorJitter",
            AugmentationKind::Grayscale => "Grayscale",
            AugmentationKind::CenterCrop => "CenterCrop",
            AugmentationKind::RandomResizedCrop => "RandomResizedCrop",
            AugmentationKind::GaussianBlur => "GaussianBlur",
        }
    }
}

impl fmt::Display for AugmentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AugmentationKind {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AugmentationKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| ParamError::UnknownKind(s.to_string()))
    }
}

/// Probability of applying a flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipParams {
    pub p: f64,
}

impl Default for FlipParams {
    fn default() -> Self {
        Self { p: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationParams {
    /// The angle is drawn from `[-degrees, degrees]`.
    pub degrees: u32,
    pub filter: InterpolationFilter,
    pub expand: bool,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            degrees: 45,
            filter: InterpolationFilter::Nearest,
            expand: false,
        }
    }
}

/// Jitter strengths; see [`crate::transform::color_jitter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorJitterParams {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub hue: f64,
}

impl Default for ColorJitterParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            hue: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrayscaleParams {
    pub num_output_channels: u8,
}

impl Default for GrayscaleParams {
    fn default() -> Self {
        Self {
            num_output_channels: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterCropParams {
    pub size: u32,
}

impl Default for CenterCropParams {
    fn default() -> Self {
        Self { size: 100 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomResizedCropParams {
    /// Output edge length.
    pub size: u32,
    /// Fraction of the source area, `(min, max)`.
    pub scale: (f64, f64),
    /// Width / height aspect, `(min, max)`.
    pub ratio: (f64, f64),
}

impl Default for RandomResizedCropParams {
    fn default() -> Self {
        Self {
            size: 100,
            scale: (0.5, 1.0),
            ratio: (0.75, 1.33),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianBlurParams {
    pub kernel_size: u32,
    pub sigma: f64,
}

impl Default for GaussianBlurParams {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 1.0,
        }
    }
}

/// One augmentation with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params")]
pub enum Augmentation {
    HorizontalFlip(FlipParams),
    VerticalFlip(FlipParams),
    RandomRotation(RotationParams),
    ColorJitter(ColorJitterParams),
    Grayscale(GrayscaleParams),
    CenterCrop(CenterCropParams),
    RandomResizedCrop(RandomResizedCropParams),
    GaussianBlur(GaussianBlurParams),
}

impl Augmentation {
    pub fn kind(&self) -> AugmentationKind {
        match self {
            Augmentation::HorizontalFlip(_) => AugmentationKind::HorizontalFlip,
            Augmentation::VerticalFlip(_) => AugmentationKind::VerticalFlip,
            Augmentation::RandomRotation(_) => AugmentationKind::RandomRotation,
            Augmentation::ColorJitter(_) => AugmentationKind::ColorJitter,
            Augmentation::Grayscale(_) => AugmentationKind::Grayscale,
            Augmentation::CenterCrop(_) => AugmentationKind::CenterCrop,
            Augmentation::RandomResizedCrop(_) => AugmentationKind::RandomResizedCrop,
            Augmentation::GaussianBlur(_) => AugmentationKind::GaussianBlur,
        }
    }

    /// The torchvision call expression for this augmentation.
    pub fn code_expression(&self) -> String {
        self.to_string()
    }

    /// Apply the augmentation once.
    ///
    /// Random kinds draw from `rng`; a seeded generator gives repeatable
    /// output.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        image: &DecodedImage,
        rng: &mut R,
    ) -> Result<DecodedImage, TransformError> {
        if image.is_empty() {
            return Err(TransformError::EmptyImage);
        }

        match *self {
            Augmentation::HorizontalFlip(FlipParams { p }) => {
                Ok(random_horizontal_flip(image, p, rng))
            }
            Augmentation::VerticalFlip(FlipParams { p }) => {
                Ok(random_vertical_flip(image, p, rng))
            }
            Augmentation::RandomRotation(params) => Ok(random_rotation(
                image,
                params.degrees as f64,
                params.filter,
                params.expand,
                rng,
            )),
            Augmentation::ColorJitter(params) => color_jitter(
                image,
                params.brightness,
                params.contrast,
                params.saturation,
                params.hue,
                rng,
            ),
            Augmentation::Grayscale(params) => grayscale(image, params.num_output_channels),
            Augmentation::CenterCrop(params) => center_crop(image, params.size),
            Augmentation::RandomResizedCrop(params) => {
                random_resized_crop(image, params.size, params.scale, params.ratio, rng)
            }
            Augmentation::GaussianBlur(params) => {
                gaussian_blur(image, params.kernel_size, params.sigma)
            }
        }
    }
}

impl fmt::Display for Augmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transforms.{}(", self.kind().class_name())?;
        match self {
            Augmentation::HorizontalFlip(params) | Augmentation::VerticalFlip(params) => {
                write!(f, "p={}", PyFloat(params.p))?;
            }
            Augmentation::RandomRotation(params) => {
                write!(f, "degrees={}", params.degrees)?;
                if params.filter != InterpolationFilter::Nearest {
                    f.write_str(", interpolation=InterpolationMode.BILINEAR")?;
                }
                if params.expand {
                    f.write_str(", expand=True")?;
                }
            }
            Augmentation::ColorJitter(params) => {
                write!(
                    f,
                    "brightness={}, contrast={}, saturation={}, hue={}",
                    PyFloat(params.brightness),
                    PyFloat(params.contrast),
                    PyFloat(params.saturation),
                    PyFloat(params.hue)
                )?;
            }
            Augmentation::Grayscale(params) => {
                write!(f, "num_output_channels={}", params.num_output_channels)?;
            }
            Augmentation::CenterCrop(params) => {
                write!(f, "size={}", params.size)?;
            }
            Augmentation::RandomResizedCrop(params) => {
                write!(
                    f,
                    "size={}, scale=({}, {}), ratio=({}, {})",
                    params.size,
                    PyFloat(params.scale.0),
                    PyFloat(params.scale.1),
                    PyFloat(params.ratio.0),
                    PyFloat(params.ratio.1)
                )?;
            }
            Augmentation::GaussianBlur(params) => {
                write!(
                    f,
                    "kernel_size={}, sigma={}",
                    params.kernel_size,
                    PyFloat(params.sigma)
                )?;
            }
        }
        f.write_str(")")
    }
}

/// Formats a float the way Python's `repr` does for slider values:
/// shortest round-trip digits with at least one decimal (`1.0`, `0.25`).
struct PyFloat(f64);

impl fmt::Display for PyFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
