//! Image encoding bindings for export.
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@retouch/wasm';
//!
//! const png = encode_png(image);
//! const jpeg = encode_jpeg(image, 90);
//! ```

use crate::types::{js_error, JsBitmap};
use retouch_core::encode::{self, ExportFormat};
use wasm_bindgen::prelude::*;

/// Encode a bitmap as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_bitmap()).map_err(js_error)
}

/// Encode a bitmap as JPEG bytes.
///
/// `quality` is clamped to 1-100; 90 is what file exports use.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    ExportFormat::Jpeg { quality }
        .encode(&image.to_bitmap())
        .map_err(js_error)
}
