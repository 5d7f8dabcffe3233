//! Render encoding for Shimmer.
//!
//! Every published render is a JPEG at [`JPEG_QUALITY`], regardless of the
//! container the source was uploaded in. [`EncodedPayload`] pairs the bytes
//! with their container tag and renders the data URL handed to the display.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, JPEG_QUALITY, MAX_JPEG_DIMENSION};

use crate::buffer::PixelBuffer;
use crate::decode::{to_data_url, ImageFormat};

/// Compressed image bytes ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl EncodedPayload {
    /// Encode a buffer as JPEG.
    pub fn jpeg(image: &PixelBuffer, quality: u8) -> Result<Self, EncodeError> {
        Ok(Self {
            format: ImageFormat::Jpeg,
            bytes: encode_jpeg(image, quality)?,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:image/jpeg;base64,...`
    pub fn to_data_url(&self) -> String {
        to_data_url(self.format, &self.bytes)
    }
}
