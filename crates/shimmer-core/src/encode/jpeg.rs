//! JPEG encoding for published renders.
//!
//! Uses the `image` crate's baseline JPEG encoder. Alpha is dropped: JPEG has
//! no alpha channel and the editing pipeline keeps pixels opaque.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Quality every render is published at.
pub const JPEG_QUALITY: u8 = 90;

/// Largest width or height a baseline JPEG frame header can carry.
pub const MAX_JPEG_DIMENSION: u32 = 65_535;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a pixel buffer to JPEG bytes.
///
/// `quality` is clamped to 1..=100.
///
/// # Errors
///
/// Returns `EncodeError::EncodingFailed` if the encoder rejects the image.
pub fn encode_jpeg(image: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);
    let rgb = image.to_rgb_bytes();

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
