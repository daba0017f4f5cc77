//! One render pass of the explorer page.
//!
//! [`render`] is a pure function of the upload, the selected kind, the
//! submitted control values and the random source. Nothing is kept between
//! passes.

use rand::Rng;

use crate::augmentation::{Augmentation, AugmentationKind};
use crate::controls::{controls_for, ParamControl, ParamValues};
use crate::decode::DecodedImage;
use crate::transform::TransformError;

pub const PAGE_TITLE: &str = "Image Augmentation Explorer";
pub const SIDEBAR_HEADER: &str = "Select Augmentation";
pub const SELECTOR_LABEL: &str = "Choose an augmentation technique:";
pub const UPLOAD_LABEL: &str = "Upload an image";
pub const ORIGINAL_CAPTION: &str = "Original Image";
pub const DOWNLOAD_LABEL: &str = "Download transformed image (JPEG)";

/// Static footer, one entry per line.
pub const FOOTER_LINES: [&str; 4] = [
    "Created for CSE 366",
    "Faculty: Mohammad Rifat Ahmmad Rashid",
    "Associate Professor",
    "East West University",
];

/// Caption under the transformed image.
pub fn result_caption(kind: AugmentationKind) -> String {
    format!("Image after {}", kind.label())
}

/// The transformed image and what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub image: DecodedImage,
    pub caption: String,
    pub code: String,
    pub augmentation: Augmentation,
}

/// Everything the page shows after one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub title: &'static str,
    pub kinds: [AugmentationKind; 8],
    pub selected: AugmentationKind,
    /// Empty until an image is uploaded.
    pub controls: Vec<ParamControl>,
    pub original: Option<&'a DecodedImage>,
    pub result: Option<TransformResult>,
    pub footer: [&'static str; 4],
}

impl Page<'_> {
    pub fn original_caption(&self) -> Option<&'static str> {
        self.original.map(|_| ORIGINAL_CAPTION)
    }
}

/// Evaluate one pass.
///
/// Without an upload the page has the selector and footer only: no
/// controls, no images, no code. With one, the selected augmentation is
/// built from `values` (clamped to the controls) and applied exactly once.
///
/// # Errors
///
/// Propagates `TransformError` from the primitive.
pub fn render<'a, R: Rng + ?Sized>(
    upload: Option<&'a DecodedImage>,
    kind: AugmentationKind,
    values: &ParamValues,
    rng: &mut R,
) -> Result<Page<'a>, TransformError> {
    let mut page = Page {
        title: PAGE_TITLE,
        kinds: AugmentationKind::ALL,
        selected: kind,
        controls: Vec::new(),
        original: upload,
        result: None,
        footer: FOOTER_LINES,
    };

    let Some(image) = upload else {
        return Ok(page);
    };

    let dimensions = image.dimensions();
    page.controls = controls_for(kind, dimensions);

    let augmentation = Augmentation::from_values(kind, values, dimensions);
    log::debug!("render pass: {augmentation} on {}x{}", dimensions.0, dimensions.1);
    let transformed = augmentation.apply(image, rng)?;

    page.result = Some(TransformResult {
        image: transformed,
        caption: result_caption(kind),
        code: augmentation.code_expression(),
        augmentation,
    });

    Ok(page)
}
