//! Adjustment WASM bindings.
//!
//! Each function takes an image and one parameter and returns a new image;
//! the input is never modified. Out-of-range parameters are clamped.

use crate::types::JsPixelBuffer;
use shimmer_core::adjustments::{self, Adjustment, AdjustmentKind};
use wasm_bindgen::prelude::*;

/// Shift every color channel by `delta` 8-bit steps (-255 to 255).
#[wasm_bindgen]
pub fn adjust_brightness(image: &JsPixelBuffer, delta: f64) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(adjustments::brightness(image.buffer(), delta))
}

/// Scale each channel's distance from mid-gray by `1 + delta` (-1 to 1).
#[wasm_bindgen]
pub fn adjust_contrast(image: &JsPixelBuffer, delta: f64) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(adjustments::contrast(image.buffer(), delta))
}

/// Rotate hue by whole degrees. Any value is accepted and wrapped.
#[wasm_bindgen]
pub fn adjust_hue(image: &JsPixelBuffer, degrees: i32) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(adjustments::hue(image.buffer(), degrees))
}

/// Scale saturation by `1 + delta` (-1 to 1).
#[wasm_bindgen]
pub fn adjust_saturation(image: &JsPixelBuffer, delta: f64) -> JsPixelBuffer {
    JsPixelBuffer::from_buffer(adjustments::saturation(image.buffer(), delta))
}

/// Apply an adjustment given as `{ kind: "hue", value: 30 }`.
#[wasm_bindgen]
pub fn apply_adjustment(image: &JsPixelBuffer, adjustment: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let adjustment: Adjustment = serde_wasm_bindgen::from_value(adjustment)
        .map_err(|e| JsValue::from_str(&format!("Invalid adjustment: {}", e)))?;
    Ok(JsPixelBuffer::from_buffer(adjustment.apply(image.buffer())))
}

/// Slider bounds for an adjustment kind, as `{ min, max }`.
///
/// Used by the page to configure its range inputs.
#[wasm_bindgen]
pub fn adjustment_range(kind: &str) -> Result<JsValue, JsValue> {
    let kind = AdjustmentKind::ALL
        .into_iter()
        .find(|k| k.name() == kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown adjustment: {}", kind)))?;
    serde_wasm_bindgen::to_value(&kind.range()).map_err(|e| JsValue::from_str(&e.to_string()))
}
