//! Image decoding and resizing bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const thumb = resize_to_fit(image, 256, 256, 2);
//! ```

use crate::types::{filter_from_u8, js_error, JsBitmap};
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG into an RGB bitmap.
///
/// # Errors
///
/// Fails if the format is unrecognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Resize to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Lanczos3.
#[wasm_bindgen]
pub fn resize(image: &JsBitmap, width: u32, height: u32, filter: u8) -> Result<JsBitmap, JsValue> {
    decode::resize(&image.to_bitmap(), width, height, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}

/// Shrink to fit inside `max_width` x `max_height`, preserving aspect ratio.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsBitmap,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    decode::resize_to_fit(&image.to_bitmap(), max_width, max_height, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(js_error)
}
