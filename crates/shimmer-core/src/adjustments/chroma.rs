//! Hue rotation and saturation scaling in HSL space.

use super::color::{from_unit, hsl_to_rgb, rgb_to_hsl, to_unit};
use super::SATURATION_RANGE;
use crate::buffer::PixelBuffer;

/// Rotate every pixel's hue by `degrees`.
///
/// The rotation is reduced modulo 360 with a Euclidean remainder before any
/// float math, so `360` is exactly `0` and `-30` is exactly `330`.
pub fn hue(image: &PixelBuffer, degrees: i32) -> PixelBuffer {
    let shift = degrees.rem_euclid(360) as f64;
    image.map_pixels(|[r, g, b, a]| {
        let (h, s, l) = rgb_to_hsl(to_unit(r), to_unit(g), to_unit(b));
        let (r, g, b) = hsl_to_rgb((h + shift) % 360.0, s, l);
        [from_unit(r), from_unit(g), from_unit(b), a]
    })
}

/// Scale every pixel's HSL saturation by `1 + delta`.
///
/// `delta` is clamped to [`SATURATION_RANGE`]; the scaled saturation is
/// clamped to 0..=1. -1 yields grayscale.
pub fn saturation(image: &PixelBuffer, delta: f64) -> PixelBuffer {
    let factor = 1.0 + SATURATION_RANGE.clamp(delta);
    image.map_pixels(|[r, g, b, a]| {
        let (h, s, l) = rgb_to_hsl(to_unit(r), to_unit(g), to_unit(b));
        let (r, g, b) = hsl_to_rgb(h, (s * factor).clamp(0.0, 1.0), l);
        [from_unit(r), from_unit(g), from_unit(b), a]
    })
}
