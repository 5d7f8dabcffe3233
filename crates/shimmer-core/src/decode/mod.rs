//! Upload decoding for Shimmer.
//!
//! This module provides functionality for:
//! - Resolving the container of an upload from its data URL prefix
//! - Decoding JPEG and PNG payloads into RGBA pixel buffers
//! - Resampling the decoded source to the fixed-width editing preview
//!
//! # Architecture
//!
//! The container is resolved exactly once, at the data URL boundary, into an
//! [`ImageFormat`]. The decoder is then pinned to that format. All operations
//! are synchronous and return new buffers.
//!
//! # Examples
//!
//! ```ignore
//! use shimmer_core::decode::{decode_data_url, resize_to_width};
//!
//! let source = decode_data_url(&data_url)?;
//! let preview = resize_to_width(&source, 300)?;
//! ```

mod container;
mod data_url;
mod resize;
mod types;

pub use container::{decode_image, extract_orientation};
pub use data_url::{parse_data_url, split_data_url, to_data_url};
pub use resize::{preview_height, resize, resize_to_width};
pub use types::{DecodeError, ImageFormat, Orientation};

use crate::buffer::PixelBuffer;
use crate::Error;

/// Decode a `<prefix><base64>` upload into a full-resolution buffer.
///
/// # Errors
///
/// `Error::UnsupportedFormat` for an unknown prefix (no decode is
/// attempted), `Error::Decode` for a bad payload.
pub fn decode_data_url(data_url: &str) -> Result<PixelBuffer, Error> {
    let (format, bytes) = parse_data_url(data_url)?;
    Ok(decode_image(&bytes, format)?)
}
