//! Shimmer WASM - WebAssembly bindings for Shimmer
//!
//! This crate exposes the shimmer-core pipeline to JavaScript and wires a
//! session to the page's controls.
//!
//! # Module Structure
//!
//! - `editor` - The `Editor` session bound to page elements
//! - `dom` - DOM publisher and listener host
//! - `config` - Editor configuration read from JavaScript
//! - `logger` - `log` output to the browser console
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` / `adjustments` / `encode` - Individual pipeline stages
//!
//! # Usage
//!
//! ```typescript
//! import init, { Editor } from '@shimmer/wasm';
//!
//! await init();
//! new Editor().start();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod config;
mod decode;
mod dom;
mod editor;
mod encode;
mod logger;
mod types;

pub use adjustments::{
    adjust_brightness, adjust_contrast, adjust_hue, adjust_saturation, adjustment_range,
    apply_adjustment,
};
pub use config::{EditorConfig, ElementIds};
pub use decode::{decode_data_url, resize_to_width};
pub use editor::Editor;
pub use encode::{encode_jpeg, encode_jpeg_data_url};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
