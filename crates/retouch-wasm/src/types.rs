//! WASM-compatible wrapper types for image data.
//!
//! Bitmaps cross the boundary as [`JsBitmap`]; pixel data is copied into a
//! `Uint8Array` only when JavaScript asks for it.

use retouch_core::decode::{Bitmap, FilterType};
use wasm_bindgen::prelude::*;

/// An RGB bitmap handed to JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`; `free()` releases the WASM side early, otherwise the
/// wasm-bindgen finalizer does it.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGB pixel data (3 bytes per
    /// pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGB pixel data as a `Uint8Array` (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Copy back into a core bitmap. The buffer is not checked here; core
    /// functions reject inconsistent bitmaps themselves.
    pub(crate) fn to_bitmap(&self) -> Bitmap {
        Bitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Map the numeric filter code used on the JS side.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3; anything else is Lanczos3, the
/// filter the resize stage uses.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}

/// Turn any displayable error into a JS exception value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_bitmap_getters() {
        let img = JsBitmap::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_bitmap_conversion_keeps_pixels() {
        let bitmap = Bitmap::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        let js = JsBitmap::from_bitmap(bitmap.clone());
        assert_eq!(js.pixels(), bitmap.pixels);
        assert_eq!(js.to_bitmap(), bitmap);
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::Lanczos3);
        assert_eq!(filter_from_u8(255), FilterType::Lanczos3);
    }
}
