//! Parameter controls per augmentation kind, and building an
//! [`Augmentation`] from the values the UI sends back.
//!
//! Control descriptors are plain data; the UI renders them however it likes.
//! Values arriving from the UI are untrusted: out-of-range numbers are
//! clamped, missing ones fall back to the control's default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::augmentation::{
    Augmentation, AugmentationKind, CenterCropParams, ColorJitterParams, FlipParams,
    GaussianBlurParams, GrayscaleParams, RandomResizedCropParams, RotationParams,
};

/// Smallest crop size offered, unless the image itself is smaller.
pub const MIN_CROP_SIZE: u32 = 50;

/// Default crop size, clamped into the slider range.
pub const DEFAULT_CROP_SIZE: u32 = 100;

/// How a parameter is edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    /// A single value. Integer sliders snap to `min + n * step`.
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
        integer: bool,
    },
    /// An ordered `(low, high)` pair.
    RangeSlider {
        min: f64,
        max: f64,
        step: f64,
        default: (f64, f64),
    },
    /// One of a fixed set of integers.
    Radio {
        options: Vec<i64>,
        default_index: usize,
    },
}

/// One labeled control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamControl {
    /// Parameter name, also the key in [`ParamValues`].
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

impl ParamControl {
    fn slider(
        name: &'static str,
        label: &'static str,
        (min, max, step): (f64, f64, f64),
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::Slider {
                min,
                max,
                step,
                default,
                integer: false,
            },
        }
    }

    fn int_slider(
        name: &'static str,
        label: &'static str,
        min: u32,
        max: u32,
        step: u32,
        default: u32,
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::Slider {
                min: min as f64,
                max: max as f64,
                step: step as f64,
                default: default as f64,
                integer: true,
            },
        }
    }

    fn range(
        name: &'static str,
        label: &'static str,
        (min, max, step): (f64, f64, f64),
        default: (f64, f64),
    ) -> Self {
        Self {
            name,
            label,
            widget: Widget::RangeSlider {
                min,
                max,
                step,
                default,
            },
        }
    }

    /// Resolve a submitted value against this control.
    ///
    /// Returns `None` for range sliders; use [`ParamControl::resolve_pair`].
    fn resolve(&self, value: Option<&ParamValue>) -> Option<f64> {
        match &self.widget {
            Widget::Slider {
                min,
                max,
                step,
                default,
                integer,
            } => {
                let v = value
                    .and_then(ParamValue::as_f64)
                    .filter(|v| v.is_finite())
                    .unwrap_or(*default)
                    .clamp(*min, *max);
                if *integer {
                    Some((min + ((v - min) / step).round() * step).min(*max))
                } else {
                    Some(v)
                }
            }
            Widget::Radio {
                options,
                default_index,
            } => {
                let fallback = options.get(*default_index).copied().unwrap_or_default();
                let chosen = value
                    .and_then(ParamValue::as_f64)
                    .filter(|v| v.fract() == 0.0)
                    .map(|v| v as i64)
                    .filter(|v| options.contains(v))
                    .unwrap_or(fallback);
                Some(chosen as f64)
            }
            Widget::RangeSlider { .. } => None,
        }
    }

    fn resolve_pair(&self, value: Option<&ParamValue>) -> Option<(f64, f64)> {
        let Widget::RangeSlider {
            min, max, default, ..
        } = &self.widget
        else {
            return None;
        };

        let (a, b) = value
            .and_then(ParamValue::as_pair)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .unwrap_or(*default);
        let (a, b) = (a.clamp(*min, *max), b.clamp(*min, *max));
        Some(if a <= b { (a, b) } else { (b, a) })
    }
}

/// Controls for `kind` on an image of `dimensions`.
///
/// Crop size sliders run from `min(50, min_side)` to the image's shorter
/// side, so a crop never exceeds the image.
pub fn controls_for(kind: AugmentationKind, dimensions: (u32, u32)) -> Vec<ParamControl> {
    match kind {
        AugmentationKind::HorizontalFlip | AugmentationKind::VerticalFlip => Vec::new(),
        AugmentationKind::RandomRotation => vec![ParamControl::int_slider(
            "degrees",
            "Rotation degrees",
            0,
            360,
            1,
            45,
        )],
        AugmentationKind::ColorJitter => vec![
            ParamControl::slider("brightness", "Brightness", (0.0, 2.0, 0.01), 1.0),
            ParamControl::slider("contrast", "Contrast", (0.0, 2.0, 0.01), 1.0),
            ParamControl::slider("saturation", "Saturation", (0.0, 2.0, 0.01), 1.0),
            ParamControl::slider("hue", "Hue", (-0.5, 0.5, 0.01), 0.0),
        ],
        AugmentationKind::Grayscale => vec![ParamControl {
            name: "num_output_channels",
            label: "Number of output channels",
            widget: Widget::Radio {
                options: vec![1, 3],
                default_index: 0,
            },
        }],
        AugmentationKind::CenterCrop => vec![crop_size_control(dimensions, "Crop size")],
        AugmentationKind::RandomResizedCrop => vec![
            crop_size_control(dimensions, "Crop size"),
            ParamControl::range("scale", "Scale range", (0.1, 1.0, 0.01), (0.5, 1.0)),
            ParamControl::range("ratio", "Aspect ratio range", (0.5, 2.0, 0.01), (0.75, 1.33)),
        ],
        AugmentationKind::GaussianBlur => vec![
            ParamControl::int_slider("kernel_size", "Kernel size", 3, 21, 2, 5),
            ParamControl::slider("sigma", "Sigma", (0.1, 5.0, 0.01), 1.0),
        ],
    }
}

fn crop_size_control((width, height): (u32, u32), label: &'static str) -> ParamControl {
    let max = width.min(height);
    let min = MIN_CROP_SIZE.min(max);
    ParamControl::int_slider("size", label, min, max, 1, DEFAULT_CROP_SIZE.clamp(min, max))
}

/// A value submitted for one control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Pair(f64, f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Float(v) => Some(v),
            ParamValue::Pair(..) => None,
        }
    }

    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match *self {
            ParamValue::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<(f64, f64)> for ParamValue {
    fn from((a, b): (f64, f64)) -> Self {
        ParamValue::Pair(a, b)
    }
}

/// Submitted control values keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, ParamValue>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Looks up resolved values by control name.
struct Resolver<'a> {
    controls: Vec<ParamControl>,
    values: &'a ParamValues,
}

impl Resolver<'_> {
    fn control(&self, name: &str) -> Option<&ParamControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    fn number(&self, name: &str) -> f64 {
        self.control(name)
            .and_then(|c| c.resolve(self.values.get(name)))
            .unwrap_or_default()
    }

    fn pair(&self, name: &str) -> (f64, f64) {
        self.control(name)
            .and_then(|c| c.resolve_pair(self.values.get(name)))
            .unwrap_or_default()
    }
}

impl Augmentation {
    /// Build the augmentation for `kind` from submitted control values.
    ///
    /// Keys that belong to other kinds are ignored.
    pub fn from_values(
        kind: AugmentationKind,
        values: &ParamValues,
        dimensions: (u32, u32),
    ) -> Augmentation {
        let r = Resolver {
            controls: controls_for(kind, dimensions),
            values,
        };

        match kind {
            AugmentationKind::HorizontalFlip => Augmentation::HorizontalFlip(FlipParams::default()),
            AugmentationKind::VerticalFlip => Augmentation::VerticalFlip(FlipParams::default()),
            AugmentationKind::RandomRotation => Augmentation::RandomRotation(RotationParams {
                degrees: r.number("degrees") as u32,
                ..RotationParams::default()
            }),
            AugmentationKind::ColorJitter => Augmentation::ColorJitter(ColorJitterParams {
                brightness: r.number("brightness"),
                contrast: r.number("contrast"),
                saturation: r.number("saturation"),
                hue: r.number("hue"),
            }),
            AugmentationKind::Grayscale => Augmentation::Grayscale(GrayscaleParams {
                num_output_channels: r.number("num_output_channels") as u8,
            }),
            AugmentationKind::CenterCrop => Augmentation::CenterCrop(CenterCropParams {
                size: r.number("size") as u32,
            }),
            AugmentationKind::RandomResizedCrop => {
                Augmentation::RandomResizedCrop(RandomResizedCropParams {
                    size: r.number("size") as u32,
                    scale: r.pair("scale"),
                    ratio: r.pair("ratio"),
                })
            }
            AugmentationKind::GaussianBlur => Augmentation::GaussianBlur(GaussianBlurParams {
                kernel_size: r.number("kernel_size") as u32,
                sigma: r.number("sigma"),
            }),
        }
    }

    /// The augmentation with every control at its default.
    pub fn default_for(kind: AugmentationKind, dimensions: (u32, u32)) -> Augmentation {
        Augmentation::from_values(kind, &ParamValues::default(), dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(kind: AugmentationKind) -> Vec<&'static str> {
        controls_for(kind, (640, 480))
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_control_sets_per_kind() {
        assert!(names(AugmentationKind::HorizontalFlip).is_empty());
        assert!(names(AugmentationKind::VerticalFlip).is_empty());
        assert_eq!(names(AugmentationKind::RandomRotation), vec!["degrees"]);
        assert_eq!(
            names(AugmentationKind::ColorJitter),
            vec!["brightness", "contrast", "saturation", "hue"]
        );
        assert_eq!(names(AugmentationKind::Grayscale), vec!["num_output_channels"]);
        assert_eq!(names(AugmentationKind::CenterCrop), vec!["size"]);
        assert_eq!(
            names(AugmentationKind::RandomResizedCrop),
            vec!["size", "scale", "ratio"]
        );
        assert_eq!(
            names(AugmentationKind::GaussianBlur),
            vec!["kernel_size", "sigma"]
        );
    }

    #[test]
    fn test_crop_slider_bounded_by_min_side() {
        let controls = controls_for(AugmentationKind::CenterCrop, (640, 480));
        assert_eq!(
            controls[0].widget,
            Widget::Slider {
                min: 50.0,
                max: 480.0,
                step: 1.0,
                default: 100.0,
                integer: true,
            }
        );
    }

    #[test]
    fn test_crop_slider_on_tiny_image() {
        let controls = controls_for(AugmentationKind::RandomResizedCrop, (30, 40));
        let Widget::Slider {
            min, max, default, ..
        } = controls[0].widget
        else {
            panic!("expected a slider");
        };
        assert_eq!((min, max, default), (30.0, 30.0, 30.0));
    }

    #[test]
    fn test_crop_default_clamped_to_small_side() {
        let aug = Augmentation::default_for(AugmentationKind::CenterCrop, (80, 200));
        assert_eq!(aug, Augmentation::CenterCrop(CenterCropParams { size: 80 }));
    }

    #[test]
    fn test_defaults_match_param_defaults() {
        let dims = (640, 480);
        assert_eq!(
            Augmentation::default_for(AugmentationKind::HorizontalFlip, dims),
            Augmentation::HorizontalFlip(FlipParams::default())
        );
        assert_eq!(
            Augmentation::default_for(AugmentationKind::RandomRotation, dims),
            Augmentation::RandomRotation(RotationParams::default())
        );
        assert_eq!(
            Augmentation::default_for(AugmentationKind::ColorJitter, dims),
            Augmentation::ColorJitter(ColorJitterParams::default())
        );
        assert_eq!(
            Augmentation::default_for(AugmentationKind::Grayscale, dims),
            Augmentation::Grayscale(GrayscaleParams::default())
        );
        assert_eq!(
            Augmentation::default_for(AugmentationKind::RandomResizedCrop, dims),
            Augmentation::RandomResizedCrop(RandomResizedCropParams::default())
        );
        assert_eq!(
            Augmentation::default_for(AugmentationKind::GaussianBlur, dims),
            Augmentation::GaussianBlur(GaussianBlurParams::default())
        );
    }

    #[test]
    fn test_rotation_value_reflected_in_code() {
        let values = ParamValues::new().with("degrees", 90i64);
        let aug = Augmentation::from_values(AugmentationKind::RandomRotation, &values, (100, 100));
        assert_eq!(aug.code_expression(), "transforms.RandomRotation(degrees=90)");
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let values = ParamValues::new()
            .with("degrees", 1000i64)
            .with("brightness", -3.0)
            .with("hue", 0.9);

        let rotation =
            Augmentation::from_values(AugmentationKind::RandomRotation, &values, (100, 100));
        assert_eq!(
            rotation,
            Augmentation::RandomRotation(RotationParams {
                degrees: 360,
                ..RotationParams::default()
            })
        );

        let jitter = Augmentation::from_values(AugmentationKind::ColorJitter, &values, (100, 100));
        assert_eq!(
            jitter,
            Augmentation::ColorJitter(ColorJitterParams {
                brightness: 0.0,
                contrast: 1.0,
                saturation: 1.0,
                hue: 0.5,
            })
        );
    }

    #[test]
    fn test_even_kernel_snaps_to_odd() {
        for (submitted, expected) in [(4i64, 5u32), (6, 7), (7, 7), (2, 3), (40, 21)] {
            let values = ParamValues::new().with("kernel_size", submitted);
            let aug = Augmentation::from_values(AugmentationKind::GaussianBlur, &values, (64, 64));
            let Augmentation::GaussianBlur(params) = aug else {
                panic!("expected gaussian blur");
            };
            assert_eq!(params.kernel_size, expected, "submitted {submitted}");
        }
    }

    #[test]
    fn test_float_values_kept_verbatim() {
        let values = ParamValues::new()
            .with("kernel_size", 7i64)
            .with("sigma", 2.0);
        let aug = Augmentation::from_values(AugmentationKind::GaussianBlur, &values, (64, 64));
        assert_eq!(
            aug.code_expression(),
            "transforms.GaussianBlur(kernel_size=7, sigma=2.0)"
        );
    }

    #[test]
    fn test_radio_rejects_unknown_option() {
        let values = ParamValues::new().with("num_output_channels", 2i64);
        let aug = Augmentation::from_values(AugmentationKind::Grayscale, &values, (64, 64));
        assert_eq!(aug, Augmentation::Grayscale(GrayscaleParams::default()));

        let values = ParamValues::new().with("num_output_channels", 3.0);
        let aug = Augmentation::from_values(AugmentationKind::Grayscale, &values, (64, 64));
        assert_eq!(
            aug,
            Augmentation::Grayscale(GrayscaleParams {
                num_output_channels: 3
            })
        );
    }

    #[test]
    fn test_reversed_pair_is_ordered() {
        let values = ParamValues::new()
            .with("scale", (0.9, 0.2))
            .with("ratio", (3.0, 0.1))
            .with("size", 120i64);
        let aug =
            Augmentation::from_values(AugmentationKind::RandomResizedCrop, &values, (300, 200));
        assert_eq!(
            aug,
            Augmentation::RandomResizedCrop(RandomResizedCropParams {
                size: 120,
                scale: (0.2, 0.9),
                ratio: (0.5, 2.0),
            })
        );
    }

    #[test]
    fn test_wrong_value_shape_falls_back() {
        let values = ParamValues::new()
            .with("scale", 0.3)
            .with("size", (1.0, 2.0));
        let aug =
            Augmentation::from_values(AugmentationKind::RandomResizedCrop, &values, (300, 200));
        assert_eq!(
            aug,
            Augmentation::RandomResizedCrop(RandomResizedCropParams::default())
        );
    }

    #[test]
    fn test_values_for_other_kinds_ignored() {
        let values = ParamValues::new().with("sigma", 4.0).with("degrees", 10i64);
        let aug = Augmentation::from_values(AugmentationKind::CenterCrop, &values, (300, 200));
        assert_eq!(aug, Augmentation::CenterCrop(CenterCropParams::default()));
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let values = ParamValues::new().with("sigma", f64::NAN);
        let aug = Augmentation::from_values(AugmentationKind::GaussianBlur, &values, (64, 64));
        assert_eq!(aug, Augmentation::GaussianBlur(GaussianBlurParams::default()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn crop_size_never_exceeds_min_side(
            width in 1u32..1000,
            height in 1u32..1000,
            submitted in -100i64..5000,
        ) {
            let values = ParamValues::new().with("size", submitted);
            let aug = Augmentation::from_values(AugmentationKind::CenterCrop, &values, (width, height));
            let Augmentation::CenterCrop(params) = aug else {
                panic!("expected center crop");
            };
            prop_assert!(params.size <= width.min(height));
            prop_assert!(params.size >= 1);
        }

        #[test]
        fn kernel_size_always_odd_in_range(submitted in -50i64..100) {
            let values = ParamValues::new().with("kernel_size", submitted);
            let aug = Augmentation::from_values(AugmentationKind::GaussianBlur, &values, (64, 64));
            let Augmentation::GaussianBlur(params) = aug else {
                panic!("expected gaussian blur");
            };
            prop_assert_eq!(params.kernel_size % 2, 1);
            prop_assert!((3..=21).contains(&params.kernel_size));
        }

        #[test]
        fn jitter_values_inside_slider_ranges(
            b in -10.0f64..10.0,
            c in -10.0f64..10.0,
            s in -10.0f64..10.0,
            h in -10.0f64..10.0,
        ) {
            let values = ParamValues::new()
                .with("brightness", b)
                .with("contrast", c)
                .with("saturation", s)
                .with("hue", h);
            let aug = Augmentation::from_values(AugmentationKind::ColorJitter, &values, (64, 64));
            let Augmentation::ColorJitter(p) = aug else {
                panic!("expected color jitter");
            };
            prop_assert!((0.0..=2.0).contains(&p.brightness));
            prop_assert!((0.0..=2.0).contains(&p.contrast));
            prop_assert!((0.0..=2.0).contains(&p.saturation));
            prop_assert!((-0.5..=0.5).contains(&p.hue));
        }
    }
}
