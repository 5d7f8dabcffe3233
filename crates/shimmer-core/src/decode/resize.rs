//! Fixed-width preview resampling with bilinear interpolation.
//!
//! The destination is mapped back into the source by pixel centre, so a
//! same-width resize lands exactly on source pixels and reproduces the
//! input. Samples outside the source are clamped to the nearest edge pixel.

use super::DecodeError;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::encode::MAX_JPEG_DIMENSION;

/// Height of a preview `target_width` pixels wide that keeps the source
/// aspect ratio, rounded up.
///
/// Integer arithmetic, so `400x300 -> 300` is exactly 225.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if any input is zero or the
/// preview would be larger than a JPEG can hold in either dimension.
pub fn preview_height(
    source_width: u32,
    source_height: u32,
    target_width: u32,
) -> Result<u32, DecodeError> {
    let height = (u64::from(target_width) * u64::from(source_height))
        .div_ceil(u64::from(source_width.max(1)));
    let invalid = DecodeError::InvalidDimensions {
        width: target_width.into(),
        height,
    };
    if source_width == 0 || source_height == 0 || target_width == 0 {
        return Err(invalid);
    }
    if target_width > MAX_JPEG_DIMENSION || height > u64::from(MAX_JPEG_DIMENSION) {
        return Err(invalid);
    }
    u32::try_from(height).map_err(|_| invalid)
}

/// Resample `image` to `target_width`, preserving its aspect ratio.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` for a zero target width.
pub fn resize_to_width(image: &PixelBuffer, target_width: u32) -> Result<PixelBuffer, DecodeError> {
    let target_height = preview_height(image.width(), image.height(), target_width)?;
    resize(image, target_width, target_height)
}

/// Resample `image` to exact dimensions with bilinear interpolation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either dimension is zero.
pub fn resize(image: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer, DecodeError> {
    let invalid = || DecodeError::InvalidDimensions {
        width: width.into(),
        height: height.into(),
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    let columns = axis_samples(image.width(), width);
    let rows = axis_samples(image.height(), height);
    let src = image.as_bytes();
    let stride = image.width() as usize * CHANNELS;

    let mut output = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for row in &rows {
        let top = row.lo * stride;
        let bottom = row.hi * stride;
        for col in &columns {
            let left = col.lo * CHANNELS;
            let right = col.hi * CHANNELS;
            for c in 0..CHANNELS {
                let p00 = src[top + left + c] as f64;
                let p10 = src[top + right + c] as f64;
                let p01 = src[bottom + left + c] as f64;
                let p11 = src[bottom + right + c] as f64;

                let v = p00 * (1.0 - col.frac) * (1.0 - row.frac)
                    + p10 * col.frac * (1.0 - row.frac)
                    + p01 * (1.0 - col.frac) * row.frac
                    + p11 * col.frac * row.frac;
                output.push(v.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::from_raw(width, height, output).ok_or_else(invalid)
}

/// The two neighbouring source indices and the blend weight of the second
/// one, for a single destination coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSample {
    lo: usize,
    hi: usize,
    frac: f64,
}

fn axis_samples(src_len: u32, dst_len: u32) -> Vec<AxisSample> {
    let scale = src_len as f64 / dst_len as f64;
    let max = (src_len - 1) as f64;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f64 + 0.5) * scale - 0.5).clamp(0.0, max);
            let lo = s.floor();
            let hi = (lo + 1.0).min(max);
            AxisSample {
                lo: lo as usize,
                hi: hi as usize,
                frac: s - lo,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        PixelBuffer::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_preview_height_landscape() {
        assert_eq!(preview_height(400, 300, 300).unwrap(), 225);
    }

    #[test]
    fn test_preview_height_portrait() {
        assert_eq!(preview_height(300, 400, 300).unwrap(), 400);
    }

    #[test]
    fn test_preview_height_single_pixel() {
        assert_eq!(preview_height(1, 1, 300).unwrap(), 300);
    }

    #[test]
    fn test_preview_height_rounds_up() {
        // 300 * 200 / 7 = 8571.43
        assert_eq!(preview_height(7, 200, 300).unwrap(), 8572);
        // 300 * 1 / 1000 = 0.3
        assert_eq!(preview_height(1000, 1, 300).unwrap(), 1);
    }

    #[test]
    fn test_preview_height_beyond_jpeg_limit() {
        assert!(matches!(
            preview_height(1, 1_000, 300),
            Err(DecodeError::InvalidDimensions { width: 300, height: 300_000 })
        ));
        assert!(preview_height(1, 2_000_000, 300).is_err());
        assert!(preview_height(10, 10, MAX_JPEG_DIMENSION + 1).is_err());
        // 300 * 2184 / 10 = 65520 still fits.
        assert_eq!(preview_height(10, 2_184, 300).unwrap(), 65_520);
    }

    #[test]
    fn test_preview_height_zero_inputs() {
        assert!(preview_height(0, 10, 300).is_err());
        assert!(preview_height(10, 0, 300).is_err());
        assert!(preview_height(10, 10, 0).is_err());
    }

    #[test]
    fn test_resize_to_width_dimensions() {
        for (w, h, expected) in [(400, 300, 225), (300, 400, 400), (1, 1, 300)] {
            let img = create_test_image(w, h);
            let out = resize_to_width(&img, 300).unwrap();
            assert_eq!(out.dimensions(), (300, expected));
            assert_eq!(out.as_bytes().len(), 300 * expected as usize * 4);
        }
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let img = create_test_image(37, 23);
        let out = resize(&img, 37, 23).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(10, 10);
        assert!(resize(&img, 0, 5).is_err());
        assert!(resize(&img, 5, 0).is_err());
        assert!(resize_to_width(&img, 0).is_err());
    }

    #[test]
    fn test_resize_flat_color_stays_flat() {
        let img = PixelBuffer::filled(97, 61, [12, 34, 56, 255]).unwrap();
        let out = resize_to_width(&img, 30).unwrap();
        assert!(out
            .as_bytes()
            .chunks_exact(4)
            .all(|px| px == [12, 34, 56, 255]));
    }

    #[test]
    fn test_resize_upscale_single_pixel() {
        let img = PixelBuffer::filled(1, 1, [1, 2, 3, 4]).unwrap();
        let out = resize(&img, 5, 5).unwrap();
        assert!(out.as_bytes().chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
    }

    #[test]
    fn test_resize_downscale_averages_neighbours() {
        // 2x1 black/white halved to 1x1 samples the midpoint.
        let img = PixelBuffer::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let out = resize(&img, 1, 1).unwrap();
        assert_eq!(out.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_resize_preserves_horizontal_gradient_order() {
        let img = create_test_image(200, 10);
        let out = resize(&img, 50, 10).unwrap();
        for x in 1..50 {
            assert!(out.pixel(x, 5)[0] >= out.pixel(x - 1, 5)[0]);
        }
    }

    #[test]
    fn test_resize_does_not_modify_input() {
        let img = create_test_image(40, 30);
        let before = img.clone();
        let _ = resize_to_width(&img, 300).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_axis_samples_identity() {
        let samples = axis_samples(4, 4);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.lo, i);
            assert_eq!(s.frac, 0.0);
        }
    }

    proptest! {
        /// Property: output width is the target and height is ceil(T*H/W).
        #[test]
        fn prop_resize_dimensions(
            (w, h) in (1u32..=64, 1u32..=64),
            target in 1u32..=64,
        ) {
            let img = create_test_image(w, h);
            let out = resize_to_width(&img, target).unwrap();
            let expected_h = (target as u64 * h as u64).div_ceil(w as u64) as u32;
            prop_assert_eq!(out.width(), target);
            prop_assert_eq!(out.height(), expected_h);
        }

        /// Property: resampling is deterministic.
        #[test]
        fn prop_resize_deterministic(
            (w, h) in (1u32..=32, 1u32..=32),
            target in 1u32..=48,
        ) {
            let img = create_test_image(w, h);
            let a = resize_to_width(&img, target).unwrap();
            let b = resize_to_width(&img, target).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
