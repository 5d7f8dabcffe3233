//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for decoding and resampling an upload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The base64 payload after the data URL prefix is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidPayload(String),

    /// The bytes are not a valid image of the declared container.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Decoding or resampling would produce an image without pixels.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u64, height: u64 },
}

/// The two containers an upload may declare.
///
/// Resolved once from the data URL prefix and carried through the pipeline;
/// nothing downstream re-inspects the bytes to guess a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Every recognized container, in prefix-matching order.
    pub const ALL: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

    /// The MIME type used in data URLs.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// The literal data URL prefix, e.g. `data:image/png;base64,`.
    pub fn data_url_prefix(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "data:image/jpeg;base64,",
            ImageFormat::Png => "data:image/png;base64,",
        }
    }

    /// Convert to the image crate's format for a pinned decoder.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
