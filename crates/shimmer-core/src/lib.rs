//! Shimmer Core - Image pipeline for the Shimmer editor
//!
//! This crate provides the platform-independent half of Shimmer: decoding
//! uploads, resizing them to the editing preview, the four color
//! adjustments, JPEG encoding, and the session controller that ties them
//! together. The browser bindings live in `shimmer-wasm`.

pub mod adjustments;
pub mod buffer;
pub mod config;
pub mod controls;
pub mod decode;
pub mod encode;
pub mod error;
pub mod publish;
pub mod session;

pub use adjustments::{Adjustment, AdjustmentKind, ParamRange};
pub use buffer::PixelBuffer;
pub use config::{ConfigError, SessionConfig, DEFAULT_PREVIEW_WIDTH};
pub use controls::{ControlEvent, ControlId, HandlerRegistry, ListenerHost};
pub use decode::{decode_data_url, resize_to_width, DecodeError, ImageFormat};
pub use encode::{EncodeError, EncodedPayload, JPEG_QUALITY};
pub use error::{Error, Result};
pub use publish::{MemoryPublisher, Publisher, Slot};
pub use session::{Completion, Flow, RenderJob, RenderOutcome, Session, SessionState};
