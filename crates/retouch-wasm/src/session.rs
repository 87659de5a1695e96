//! Editing session bindings.
//!
//! [`JsImageSession`] wraps the core [`ImageSession`] and adds the preview
//! zoom the host canvas needs.
//!
//! ```typescript
//! const session = new JsImageSession();
//! session.set_on_bitmap_ready((bitmap) => draw(session.preview(800, 600)));
//! session.load_bytes(bytes);
//! session.set_rotation(90);
//! session.set_parameters({ brightness: 1.2, blurKernel: 'gaussian', blurRadius: 2 });
//! const png = session.export_png();
//! ```

use crate::types::{js_error, JsBitmap};
use retouch_core::encode::ExportFormat;
use retouch_core::{
    fit_for_display, ImageSession, SessionError, TransformParameters, ZoomLevel,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Default)]
pub struct JsImageSession {
    inner: ImageSession,
    zoom: ZoomLevel,
}

#[wasm_bindgen]
impl JsImageSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode PNG or JPEG bytes and make them the original.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_bytes(bytes).map_err(js_error)?;
        self.zoom.reset();
        Ok(())
    }

    /// Load raw RGB pixels as the original.
    pub fn load_bitmap(&mut self, image: &JsBitmap) -> Result<(), JsValue> {
        self.inner.load(image.to_bitmap()).map_err(js_error)?;
        self.zoom.reset();
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset().map_err(js_error)?;
        self.zoom.reset();
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    // ===== Setters =====

    pub fn set_rotation(&mut self, degrees: i32) -> Result<(), JsValue> {
        self.inner.set_rotation(degrees).map_err(js_error)
    }

    pub fn set_flip_horizontal(&mut self, flipped: bool) -> Result<(), JsValue> {
        self.inner.set_flip_horizontal(flipped).map_err(js_error)
    }

    pub fn set_flip_vertical(&mut self, flipped: bool) -> Result<(), JsValue> {
        self.inner.set_flip_vertical(flipped).map_err(js_error)
    }

    pub fn toggle_flip_horizontal(&mut self) -> Result<(), JsValue> {
        self.inner.toggle_flip_horizontal().map_err(js_error)
    }

    pub fn toggle_flip_vertical(&mut self) -> Result<(), JsValue> {
        self.inner.toggle_flip_vertical().map_err(js_error)
    }

    /// Set the resize target; pass `undefined` to clear a dimension.
    pub fn set_resize(&mut self, width: Option<u32>, height: Option<u32>) -> Result<(), JsValue> {
        self.inner.set_resize(width, height).map_err(js_error)
    }

    pub fn set_brightness(&mut self, factor: f32) -> Result<(), JsValue> {
        self.inner.set_brightness(factor).map_err(js_error)
    }

    pub fn set_contrast(&mut self, factor: f32) -> Result<(), JsValue> {
        self.inner.set_contrast(factor).map_err(js_error)
    }

    pub fn set_saturation(&mut self, factor: f32) -> Result<(), JsValue> {
        self.inner.set_saturation(factor).map_err(js_error)
    }

    pub fn set_sharpen(&mut self, amount: f32) -> Result<(), JsValue> {
        self.inner.set_sharpen(amount).map_err(js_error)
    }

    pub fn set_blur_radius(&mut self, radius: f32) -> Result<(), JsValue> {
        self.inner.set_blur_radius(radius).map_err(js_error)
    }

    /// Select the blur kernel by name: `"average"` or `"gaussian"`.
    pub fn set_blur_kernel(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.set_blur_kernel_named(name).map_err(js_error)
    }

    /// Apply a (possibly partial) parameter object. Missing keys take their
    /// default values.
    pub fn set_parameters(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: TransformParameters = serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("Invalid parameters: {}", e)))?;
        self.inner.set_parameters(params).map_err(js_error)
    }

    /// Current parameters as a plain object with camelCase keys.
    pub fn parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.parameters()).map_err(js_error)
    }

    // ===== Output =====

    /// Full-size copy of the current image.
    pub fn current(&self) -> Result<JsBitmap, JsValue> {
        self.inner
            .export_bitmap()
            .map(JsBitmap::from_bitmap)
            .map_err(js_error)
    }

    /// Current image shrunk to the display area, scaled by the zoom level.
    pub fn preview(&self, max_width: u32, max_height: u32) -> Result<JsBitmap, JsValue> {
        let current = self
            .inner
            .current()
            .ok_or(SessionError::NoImageLoaded)
            .map_err(js_error)?;
        fit_for_display(current, max_width, max_height, &self.zoom)
            .map(JsBitmap::from_bitmap)
            .map_err(js_error)
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f32 {
        self.zoom.factor()
    }

    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_encoded(ExportFormat::Png)
            .map_err(js_error)
    }

    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_encoded(ExportFormat::Jpeg { quality })
            .map_err(js_error)
    }

    /// Register a callback invoked with a `JsBitmap` of the new image after
    /// every successful change. Exceptions it throws are logged to the
    /// console and otherwise ignored.
    pub fn set_on_bitmap_ready(&mut self, callback: js_sys::Function) {
        self.inner.on_bitmap_ready(move |bitmap| {
            let arg = JsValue::from(JsBitmap::from_bitmap(bitmap.clone()));
            if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                log::warn!(
                    "bitmap ready callback threw: {}",
                    err.as_string().unwrap_or_else(|| format!("{err:?}"))
                );
                web_sys::console::error_1(&err);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::encode::encode_png;
    use retouch_core::{Bitmap, BlurKernel};

    fn checker(width: u32, height: u32) -> Bitmap {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x + y) % 2))
            .flat_map(|on| if on == 1 { [240, 240, 240] } else { [20, 60, 100] })
            .collect();
        Bitmap::new(width, height, pixels)
    }

    fn loaded(width: u32, height: u32) -> JsImageSession {
        let mut session = JsImageSession::new();
        let png = encode_png(&checker(width, height)).unwrap();
        assert!(session.load_bytes(&png).is_ok());
        session
    }

    #[test]
    fn test_load_and_export() {
        let session = loaded(20, 10);
        assert!(session.has_image());

        let current = session.current().unwrap_or_else(|_| panic!("no image"));
        assert_eq!((current.width(), current.height()), (20, 10));

        let png = session.export_png().unwrap_or_else(|_| panic!("export failed"));
        assert_eq!(png[..8], retouch_core::encode::PNG_SIGNATURE);
        let jpeg = session.export_jpeg(80).unwrap_or_else(|_| panic!("export failed"));
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_setters_reach_core_session() {
        let mut session = loaded(10, 10);
        assert!(session.set_rotation(90).is_ok());
        assert!(session.toggle_flip_vertical().is_ok());
        assert!(session.set_resize(Some(4), Some(6)).is_ok());
        assert!(session.set_blur_kernel("gaussian").is_ok());
        assert!(session.set_blur_radius(1.0).is_ok());

        let params = session.inner.parameters();
        assert_eq!(params.rotation_degrees, 90);
        assert!(params.flipped_vertically);
        assert_eq!(params.blur_kernel, BlurKernel::Gaussian);

        let current = session.current().unwrap_or_else(|_| panic!("no image"));
        assert_eq!((current.width(), current.height()), (4, 6));
    }

    #[test]
    fn test_preview_follows_zoom() {
        let mut session = loaded(400, 200);
        let fitted = session.preview(100, 100).unwrap_or_else(|_| panic!("preview failed"));
        assert_eq!((fitted.width(), fitted.height()), (100, 50));

        session.zoom_in();
        let zoomed = session.preview(100, 100).unwrap_or_else(|_| panic!("preview failed"));
        assert_eq!((zoomed.width(), zoomed.height()), (110, 55));

        assert!(session.reset().is_ok());
        assert_eq!(session.zoom(), 1.0);
    }

    #[test]
    fn test_load_bitmap() {
        let mut session = JsImageSession::new();
        let image = JsBitmap::from_bitmap(checker(3, 3));
        assert!(session.load_bitmap(&image).is_ok());
        assert_eq!(session.inner.original(), Some(&checker(3, 3)));
    }
}
