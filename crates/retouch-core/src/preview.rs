//! Display-side sizing of the current image.
//!
//! The host shows `current` scaled down to its canvas area, times a zoom
//! factor driven by the mouse wheel. Rendering stays with the host; this
//! module only produces the pixels to draw.

use serde::{Deserialize, Serialize};

use crate::decode::{resize_to_fit, Bitmap, DecodeError, FilterType};

/// Multiplier applied per zoom step.
pub const ZOOM_STEP: f32 = 1.1;

/// Preview zoom factor. Starts at 1.0 (fit to the display area).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevel {
    factor: f32,
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl ZoomLevel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// One wheel notch towards the viewer.
    pub fn zoom_in(&mut self) {
        self.factor *= ZOOM_STEP;
    }

    /// One wheel notch away from the viewer.
    pub fn zoom_out(&mut self) {
        self.factor /= ZOOM_STEP;
    }

    pub fn reset(&mut self) {
        self.factor = 1.0;
    }

    /// Scale a display bound by the zoom factor, never below one pixel.
    fn scale(&self, bound: u32) -> u32 {
        ((bound as f32 * self.factor).round() as u32).max(1)
    }
}

/// Shrink `image` to fit `max_width` x `max_height` scaled by `zoom`.
///
/// Aspect ratio is preserved and the image is never enlarged, so a zoom
/// beyond the image's own size shows it at 1:1.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either display bound is zero.
pub fn fit_for_display(
    image: &Bitmap,
    max_width: u32,
    max_height: u32,
    zoom: &ZoomLevel,
) -> Result<Bitmap, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidFormat);
    }
    resize_to_fit(
        image,
        zoom.scale(max_width),
        zoom.scale(max_height),
        FilterType::Lanczos3,
    )
}
