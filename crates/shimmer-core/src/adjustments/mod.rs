//! The adjustment engine: four independent, pure color transforms.
//!
//! Each transform takes a buffer and a single parameter and returns a new
//! buffer. None of them fail: out-of-range parameters are clamped to the
//! ranges exported here, which the host also uses to configure its sliders.
//!
//! ## Transforms
//! 1. Brightness: additive shift in 8-bit steps
//! 2. Contrast: distance from mid-gray scaled by `1 + delta`
//! 3. Hue: rotation in degrees, HSL space
//! 4. Saturation: HSL saturation scaled by `1 + delta`
//!
//! Transforms never compose. The session always applies exactly one of them
//! to the unedited preview.

pub mod color;
mod chroma;
mod tone;

pub use chroma::{hue, saturation};
pub use tone::{brightness, contrast};

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// Inclusive bounds for an adjustment parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into range. NaN maps to 0, the identity for every transform.
    #[inline]
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Brightness delta in 8-bit steps.
pub const BRIGHTNESS_RANGE: ParamRange = ParamRange::new(-255.0, 255.0);
/// Contrast delta; the factor applied is `1 + delta`.
pub const CONTRAST_RANGE: ParamRange = ParamRange::new(-1.0, 1.0);
/// Suggested hue slider bounds. Any integer is accepted and wrapped.
pub const HUE_RANGE: ParamRange = ParamRange::new(-360.0, 360.0);
/// Saturation delta; the factor applied is `1 + delta`.
pub const SATURATION_RANGE: ParamRange = ParamRange::new(-1.0, 1.0);

/// Which transform an adjustment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Brightness,
    Contrast,
    Hue,
    Saturation,
}

impl AdjustmentKind {
    pub const ALL: [AdjustmentKind; 4] = [
        AdjustmentKind::Brightness,
        AdjustmentKind::Contrast,
        AdjustmentKind::Hue,
        AdjustmentKind::Saturation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AdjustmentKind::Brightness => "brightness",
            AdjustmentKind::Contrast => "contrast",
            AdjustmentKind::Hue => "hue",
            AdjustmentKind::Saturation => "saturation",
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            AdjustmentKind::Brightness => BRIGHTNESS_RANGE,
            AdjustmentKind::Contrast => CONTRAST_RANGE,
            AdjustmentKind::Hue => HUE_RANGE,
            AdjustmentKind::Saturation => SATURATION_RANGE,
        }
    }
}

/// One adjustment request: a transform and its parameter, as read from the
/// originating control when the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Adjustment {
    Brightness(f64),
    Contrast(f64),
    Hue(i32),
    Saturation(f64),
}

impl Adjustment {
    pub fn kind(&self) -> AdjustmentKind {
        match self {
            Adjustment::Brightness(_) => AdjustmentKind::Brightness,
            Adjustment::Contrast(_) => AdjustmentKind::Contrast,
            Adjustment::Hue(_) => AdjustmentKind::Hue,
            Adjustment::Saturation(_) => AdjustmentKind::Saturation,
        }
    }

    /// Run the transform against `image`, returning a new buffer.
    pub fn apply(&self, image: &PixelBuffer) -> PixelBuffer {
        match *self {
            Adjustment::Brightness(delta) => brightness(image, delta),
            Adjustment::Contrast(delta) => contrast(image, delta),
            Adjustment::Hue(degrees) => hue(image, degrees),
            Adjustment::Saturation(delta) => saturation(image, delta),
        }
    }
}
