//! Stateful editing session.
//!
//! An [`ImageSession`] owns the loaded original, the current
//! [`TransformParameters`] and the derived image. Every successful change
//! re-runs [`recompute`] from the original, so `current` is always
//! `recompute(original, parameters)`.
//!
//! Failed operations leave the session exactly as it was.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::convolve::{BlurKernel, UnknownKernel};
use crate::decode::{decode_image, open_bitmap_file, Bitmap};
use crate::encode::{EncodeError, ExportFormat};
use crate::pipeline::recompute;
use crate::{
    check_dimension, check_non_negative, check_positive, check_rotation, TransformParameters,
};

/// Errors returned by [`ImageSession`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The source could not be decoded or has a malformed pixel buffer
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The operation needs an image and none has been loaded
    #[error("No image loaded")]
    NoImageLoaded,

    /// A parameter value is outside its domain
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Encoding or writing the current image failed
    #[error("Export failed: {0}")]
    Export(#[from] EncodeError),
}

impl SessionError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SessionError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

type BitmapObserver = Box<dyn FnMut(&Bitmap)>;

/// Original image, parameters and the derived current image.
#[derive(Default)]
pub struct ImageSession {
    original: Option<Bitmap>,
    current: Option<Bitmap>,
    params: TransformParameters,
    on_ready: Option<BitmapObserver>,
}

impl fmt::Debug for ImageSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = |b: &Option<Bitmap>| b.as_ref().map(|b| (b.width, b.height));
        f.debug_struct("ImageSession")
            .field("original", &dims(&self.original))
            .field("current", &dims(&self.current))
            .field("params", &self.params)
            .field("on_ready", &self.on_ready.is_some())
            .finish()
    }
}

impl ImageSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Loading =====

    /// Load `bitmap` as the new original.
    ///
    /// Parameters are reset to their defaults, so `current` becomes an
    /// exact copy of the original.
    pub fn load(&mut self, bitmap: Bitmap) -> Result<(), SessionError> {
        if bitmap.is_empty() {
            return Err(SessionError::InvalidImage(format!(
                "{}x{} image has no pixels",
                bitmap.width, bitmap.height
            )));
        }
        if !bitmap.is_consistent() {
            return Err(SessionError::InvalidImage(format!(
                "{} bytes do not describe a {}x{} RGB image",
                bitmap.pixels.len(),
                bitmap.width,
                bitmap.height
            )));
        }

        log::info!("Loaded {}x{} image", bitmap.width, bitmap.height);
        self.original = Some(bitmap);
        self.params = TransformParameters::default();
        self.refresh()
    }

    /// Decode an encoded PNG or JPEG and load it.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let bitmap = decode_image(bytes).map_err(|e| SessionError::InvalidImage(e.to_string()))?;
        self.load(bitmap)
    }

    /// Read an image file and load it.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let bitmap =
            open_bitmap_file(path).map_err(|e| SessionError::InvalidImage(e.to_string()))?;
        self.load(bitmap)
    }

    /// Restore default parameters.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.require_image()?;
        log::info!("Reset parameters");
        self.params = TransformParameters::default();
        self.refresh()
    }

    // ===== Setters =====

    /// Set the clockwise rotation in degrees (0 to 360).
    pub fn set_rotation(&mut self, degrees: i32) -> Result<(), SessionError> {
        self.update("rotationDegrees", |p| {
            check_rotation(degrees)?;
            p.rotation_degrees = degrees;
            Ok(())
        })
    }

    pub fn set_flip_horizontal(&mut self, flipped: bool) -> Result<(), SessionError> {
        self.update("flippedHorizontally", |p| {
            p.flipped_horizontally = flipped;
            Ok(())
        })
    }

    pub fn set_flip_vertical(&mut self, flipped: bool) -> Result<(), SessionError> {
        self.update("flippedVertically", |p| {
            p.flipped_vertically = flipped;
            Ok(())
        })
    }

    pub fn toggle_flip_horizontal(&mut self) -> Result<(), SessionError> {
        let flipped = !self.params.flipped_horizontally;
        self.set_flip_horizontal(flipped)
    }

    pub fn toggle_flip_vertical(&mut self) -> Result<(), SessionError> {
        let flipped = !self.params.flipped_vertically;
        self.set_flip_vertical(flipped)
    }

    /// Set the resize target. The image is only resized once both
    /// dimensions are present.
    pub fn set_resize(
        &mut self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<(), SessionError> {
        self.update("resize", |p| {
            check_dimension("targetWidth", width)?;
            check_dimension("targetHeight", height)?;
            p.target_width = width;
            p.target_height = height;
            Ok(())
        })
    }

    pub fn set_brightness(&mut self, factor: f32) -> Result<(), SessionError> {
        self.update("brightness", |p| {
            check_positive("brightness", factor)?;
            p.brightness = factor;
            Ok(())
        })
    }

    pub fn set_contrast(&mut self, factor: f32) -> Result<(), SessionError> {
        self.update("contrast", |p| {
            check_positive("contrast", factor)?;
            p.contrast = factor;
            Ok(())
        })
    }

    pub fn set_saturation(&mut self, factor: f32) -> Result<(), SessionError> {
        self.update("saturation", |p| {
            check_non_negative("saturation", factor)?;
            p.saturation = factor;
            Ok(())
        })
    }

    pub fn set_sharpen(&mut self, amount: f32) -> Result<(), SessionError> {
        self.update("sharpenAmount", |p| {
            check_non_negative("sharpenAmount", amount)?;
            p.sharpen_amount = amount;
            Ok(())
        })
    }

    pub fn set_blur_radius(&mut self, radius: f32) -> Result<(), SessionError> {
        self.update("blurRadius", |p| {
            check_non_negative("blurRadius", radius)?;
            p.blur_radius = radius;
            Ok(())
        })
    }

    pub fn set_blur_kernel(&mut self, kernel: BlurKernel) -> Result<(), SessionError> {
        self.update("blurKernel", |p| {
            p.blur_kernel = kernel;
            Ok(())
        })
    }

    /// Select the blur kernel by name (`"average"` or `"gaussian"`).
    pub fn set_blur_kernel_named(&mut self, name: &str) -> Result<(), SessionError> {
        self.update("blurKernel", |p| {
            p.blur_kernel = name.parse().map_err(|e: UnknownKernel| {
                SessionError::invalid_parameter("blurKernel", e.to_string())
            })?;
            Ok(())
        })
    }

    /// Replace every parameter at once with a single recomputation.
    pub fn set_parameters(&mut self, params: TransformParameters) -> Result<(), SessionError> {
        self.update("parameters", |p| {
            params.validate()?;
            *p = params;
            Ok(())
        })
    }

    // ===== Accessors =====

    pub fn parameters(&self) -> &TransformParameters {
        &self.params
    }

    pub fn original(&self) -> Option<&Bitmap> {
        self.original.as_ref()
    }

    pub fn current(&self) -> Option<&Bitmap> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    // ===== Export =====

    /// A copy of the current image.
    pub fn export_bitmap(&self) -> Result<Bitmap, SessionError> {
        self.current.clone().ok_or(SessionError::NoImageLoaded)
    }

    /// Encode the current image in `format`.
    pub fn export_encoded(&self, format: ExportFormat) -> Result<Vec<u8>, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        Ok(format.encode(current)?)
    }

    /// Write the current image to `path`; the extension picks the format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NoImageLoaded)?;
        crate::encode::save_bitmap_file(current, path)?;
        Ok(())
    }

    /// Register the observer called with the new image after every
    /// successful recomputation. Replaces any previous observer.
    pub fn on_bitmap_ready(&mut self, callback: impl FnMut(&Bitmap) + 'static) {
        self.on_ready = Some(Box::new(callback));
    }

    // ===== Internals =====

    fn require_image(&self) -> Result<&Bitmap, SessionError> {
        self.original.as_ref().ok_or(SessionError::NoImageLoaded)
    }

    /// Apply `change` to a copy of the parameters and commit it only if it
    /// succeeds.
    fn update<F>(&mut self, field: &str, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut TransformParameters) -> Result<(), SessionError>,
    {
        self.require_image()?;

        let mut next = self.params.clone();
        if let Err(err) = change(&mut next) {
            log::warn!("Rejected {}: {}", field, err);
            return Err(err);
        }

        log::debug!("Set {}", field);
        self.params = next;
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), SessionError> {
        let original = self.require_image()?;
        let current = recompute(original, &self.params);
        self.current = Some(current);

        if let (Some(callback), Some(current)) = (self.on_ready.as_mut(), self.current.as_ref()) {
            callback(current);
        }
        Ok(())
    }
}
