//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Shimmer
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use shimmer_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image held in WASM memory.
///
/// # Memory Management
///
/// The pixel data stays in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`, so keep images in WASM between pipeline stages and only
/// extract pixels when JavaScript actually needs them.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from RGBA pixel data (4 bytes per pixel, row-major).
    ///
    /// Fails if either dimension is zero or the data length does not match.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_raw(width, height, pixels)
            .map(JsPixelBuffer::from_buffer)
            .ok_or_else(|| {
                JsValue::from_str(&format!(
                    "pixel data does not match {}x{} RGBA",
                    width, height
                ))
            })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_bytes().len()
    }

    /// Returns RGBA pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}
