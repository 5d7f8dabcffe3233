//! Upload decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_data_url`] - Decode a JPEG or PNG data URL
//! - [`resize_to_width`] - Resample to a fixed width, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_data_url, resize_to_width } from '@shimmer/wasm';
//!
//! const source = decode_data_url(reader.result as string);
//! const preview = resize_to_width(source, 300);
//! console.log(`Preview: ${preview.width}x${preview.height}`);
//! ```

use crate::types::JsPixelBuffer;
use shimmer_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a `data:image/jpeg;base64,...` or `data:image/png;base64,...`
/// string into an RGBA image.
///
/// JPEG input is turned upright according to its EXIF orientation.
///
/// # Errors
///
/// "unrecognized image format" for any other prefix; a decode error if the
/// payload is not valid base64 or not a valid image of the declared type.
#[wasm_bindgen]
pub fn decode_data_url(data_url: &str) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_data_url(data_url)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resample an image to `target_width`, with the height scaled to keep the
/// aspect ratio (rounded up).
#[wasm_bindgen]
pub fn resize_to_width(image: &JsPixelBuffer, target_width: u32) -> Result<JsPixelBuffer, JsValue> {
    decode::resize_to_width(image.buffer(), target_width)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
