//! The `<prefix><base64>` wire format used for uploads and published renders.

use base64::{engine::general_purpose, Engine as _};

use super::{DecodeError, ImageFormat};
use crate::Error;

/// Split a data URL into its declared container and the base64 remainder.
///
/// Only the two literal prefixes in [`ImageFormat::data_url_prefix`] are
/// accepted. Anything else is `UnsupportedFormat`, without looking at the
/// payload.
pub fn split_data_url(data_url: &str) -> Result<(ImageFormat, &str), Error> {
    ImageFormat::ALL
        .into_iter()
        .find_map(|format| {
            data_url
                .strip_prefix(format.data_url_prefix())
                .map(|payload| (format, payload))
        })
        .ok_or(Error::UnsupportedFormat)
}

/// Resolve the container and base64-decode the payload of a data URL.
pub fn parse_data_url(data_url: &str) -> Result<(ImageFormat, Vec<u8>), Error> {
    let (format, payload) = split_data_url(data_url)?;
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;
    Ok((format, bytes))
}

/// Render encoded bytes as a data URL for the given container.
pub fn to_data_url(format: ImageFormat, bytes: &[u8]) -> String {
    let prefix = format.data_url_prefix();
    let mut out = String::with_capacity(prefix.len() + bytes.len().div_ceil(3) * 4);
    out.push_str(prefix);
    general_purpose::STANDARD.encode_string(bytes, &mut out);
    out
}
