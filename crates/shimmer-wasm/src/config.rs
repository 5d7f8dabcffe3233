//! Editor configuration read from JavaScript.
//!
//! ```typescript
//! new Editor({ previewWidth: 400, ids: { status: "messages" } });
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use shimmer_core::{ControlId, SessionConfig, Slot};
use wasm_bindgen::JsValue;

/// DOM element ids for every control and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub uploader: String,
    pub brightness: String,
    pub contrast: String,
    pub hue: String,
    pub saturation: String,
    pub close: String,
    pub preview: String,
    pub target: String,
    pub status: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            uploader: "uploader".into(),
            brightness: "brightness".into(),
            contrast: "contrast".into(),
            hue: "hue".into(),
            saturation: "sat".into(),
            close: "close".into(),
            preview: "previewImg".into(),
            target: "targetImg".into(),
            status: "status".into(),
        }
    }
}

impl ElementIds {
    pub fn control(&self, control: ControlId) -> &str {
        match control {
            ControlId::Upload => &self.uploader,
            ControlId::Brightness => &self.brightness,
            ControlId::Contrast => &self.contrast,
            ControlId::Hue => &self.hue,
            ControlId::Saturation => &self.saturation,
            ControlId::Close => &self.close,
        }
    }

    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::Preview => &self.preview,
            Slot::Target => &self.target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub preview_width: u32,
    pub jpeg_quality: u8,
    pub ids: ElementIds,
    /// Console log level name: "error", "warn", "info", "debug" or "trace".
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            preview_width: session.preview_width,
            jpeg_quality: session.jpeg_quality,
            ids: ElementIds::default(),
            log_level: "info".into(),
        }
    }
}

impl EditorConfig {
    /// Read from a JS object. `undefined` and `null` give the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))
    }

    /// The part the core session consumes.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            preview_width: self.preview_width,
            jpeg_quality: self.jpeg_quality,
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_undefined() {
        assert_eq!(
            EditorConfig::from_js(JsValue::UNDEFINED).unwrap(),
            EditorConfig::default()
        );
    }

    #[wasm_bindgen_test]
    fn test_partial_object() {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"previewWidth".into(), &JsValue::from(400)).unwrap();
        let ids = js_sys::Object::new();
        js_sys::Reflect::set(&ids, &"status".into(), &"messages".into()).unwrap();
        js_sys::Reflect::set(&obj, &"ids".into(), &ids).unwrap();

        let config = EditorConfig::from_js(obj.into()).unwrap();
        assert_eq!(config.preview_width, 400);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.ids.status, "messages");
        assert_eq!(config.ids.hue, "hue");
    }
}
