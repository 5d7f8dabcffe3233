//! Session configuration.
//!
//! Read once when the session starts and fixed for its lifetime. The preview
//! width in particular never changes mid-session, so the stored preview is
//! always the one every adjustment expects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::JPEG_QUALITY;

/// Width of the editing preview when none is configured.
pub const DEFAULT_PREVIEW_WIDTH: u32 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("preview width must be positive")]
    ZeroPreviewWidth,

    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Width in pixels of the downscaled preview all edits run against.
    pub preview_width: u32,
    /// Quality (1-100) of every published JPEG.
    pub jpeg_quality: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_width: DEFAULT_PREVIEW_WIDTH,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_width == 0 {
            return Err(ConfigError::ZeroPreviewWidth);
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.jpeg_quality));
        }
        Ok(())
    }
}
