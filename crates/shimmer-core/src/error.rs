//! Error taxonomy for the editing pipeline.
//!
//! Every variant is local to one request: it aborts that request, leaves the
//! session state as it was, and is reported through the status slot.

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

#[derive(Debug, Error)]
pub enum Error {
    /// The upload did not start with a recognized JPEG or PNG data URL prefix.
    #[error("unrecognized image format")]
    UnsupportedFormat,

    /// The payload is malformed for its declared container.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Producing the JPEG render failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
