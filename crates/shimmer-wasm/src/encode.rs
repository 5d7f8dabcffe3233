//! Render encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_data_url } from '@shimmer/wasm';
//!
//! targetImg.src = encode_jpeg_data_url(adjusted, 90);
//! ```

use crate::types::JsPixelBuffer;
use shimmer_core::encode::{self, EncodedPayload};
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes. Alpha is dropped.
///
/// `quality` is clamped to 1-100; 90 is what the editor publishes with.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.buffer(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image to a `data:image/jpeg;base64,...` string, ready to assign
/// to an `<img>` element.
#[wasm_bindgen]
pub fn encode_jpeg_data_url(image: &JsPixelBuffer, quality: u8) -> Result<String, JsValue> {
    EncodedPayload::jpeg(image.buffer(), quality)
        .map(|payload| payload.to_data_url())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let img = JsPixelBuffer::new(8, 8, vec![200; 8 * 8 * 4]).unwrap();
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_data_url() {
        let img = JsPixelBuffer::new(8, 8, vec![200; 8 * 8 * 4]).unwrap();
        let url = encode_jpeg_data_url(&img, 90).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }
}
