//! Brightness and contrast.
//!
//! Both are pure per-channel curves, so each call builds a 256-entry lookup
//! table once and maps every R/G/B byte through it. Alpha is left alone.

use super::{BRIGHTNESS_RANGE, CONTRAST_RANGE};
use crate::buffer::PixelBuffer;

/// Mid-gray pivot for contrast.
const MIDPOINT: f64 = 128.0;

/// Shift R, G and B by `delta` 8-bit steps.
///
/// `delta` is clamped to [`BRIGHTNESS_RANGE`]; positive lightens, negative
/// darkens, 0 is identity.
pub fn brightness(image: &PixelBuffer, delta: f64) -> PixelBuffer {
    let delta = BRIGHTNESS_RANGE.clamp(delta);
    image.map_rgb_lut(&build_lut(|v| v + delta))
}

/// Scale each channel's distance from mid-gray by `1 + delta`.
///
/// `delta` is clamped to [`CONTRAST_RANGE`]: -1 flattens to gray, 0 is
/// identity, 1 doubles the distance.
pub fn contrast(image: &PixelBuffer, delta: f64) -> PixelBuffer {
    let factor = 1.0 + CONTRAST_RANGE.clamp(delta);
    image.map_rgb_lut(&build_lut(|v| (v - MIDPOINT) * factor + MIDPOINT))
}

fn build_lut(curve: impl Fn(f64) -> f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        *out = curve(i as f64).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
