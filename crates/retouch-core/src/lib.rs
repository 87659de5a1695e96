//! Retouch Core - Image transform pipeline
//!
//! This crate provides the core of Retouch: an image session that keeps the
//! loaded original untouched and re-derives the displayed image from it and
//! a set of transform parameters on every change.
//!
//! # Pipeline
//!
//! rotate → flip horizontal → flip vertical → resize → brightness →
//! contrast → saturation → sharpen → blur
//!
//! See [`pipeline::recompute`] for the stage rules and [`ImageSession`] for
//! the stateful front end.

pub mod convolve;
pub mod decode;
pub mod encode;
pub mod enhance;
pub mod luminance;
pub mod pipeline;
pub mod preview;
pub mod session;
pub mod transform;

pub use convolve::BlurKernel;
pub use decode::{decode_image, open_bitmap_file, Bitmap, DecodeError};
pub use encode::{save_bitmap_file, EncodeError, ExportFormat};
pub use pipeline::recompute;
pub use preview::{fit_for_display, ZoomLevel};
pub use session::{ImageSession, SessionError};

/// Transform parameters for one editing session.
///
/// Every field at its default value leaves the image untouched.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformParameters {
    /// Clockwise rotation in degrees (0 to 360)
    pub rotation_degrees: i32,
    /// Mirror left-right
    pub flipped_horizontally: bool,
    /// Mirror top-bottom
    pub flipped_vertically: bool,
    /// Resize width; resize only happens when both dimensions are set
    pub target_width: Option<u32>,
    /// Resize height; resize only happens when both dimensions are set
    pub target_height: Option<u32>,
    /// Brightness factor (> 0, 1.0 = unchanged)
    pub brightness: f32,
    /// Contrast factor (> 0, 1.0 = unchanged)
    pub contrast: f32,
    /// Saturation factor (>= 0, 0.0 = grayscale, 1.0 = unchanged)
    pub saturation: f32,
    /// Sharpen amount (>= 0, 1.0 = unchanged)
    pub sharpen_amount: f32,
    /// Blur radius in pixels (>= 0, 0.0 = unchanged)
    pub blur_radius: f32,
    /// Blur kernel family
    pub blur_kernel: BlurKernel,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            rotation_degrees: 0,
            flipped_horizontally: false,
            flipped_vertically: false,
            target_width: None,
            target_height: None,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpen_amount: 1.0,
            blur_radius: 0.0,
            blur_kernel: BlurKernel::Average,
        }
    }
}

impl TransformParameters {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Resize target, present only when both dimensions are set.
    pub fn resize_target(&self) -> Option<(u32, u32)> {
        self.target_width.zip(self.target_height)
    }

    /// Validate every field against its domain.
    pub fn validate(&self) -> Result<(), SessionError> {
        check_rotation(self.rotation_degrees)?;
        check_dimension("targetWidth", self.target_width)?;
        check_dimension("targetHeight", self.target_height)?;
        check_positive("brightness", self.brightness)?;
        check_positive("contrast", self.contrast)?;
        check_non_negative("saturation", self.saturation)?;
        check_non_negative("sharpenAmount", self.sharpen_amount)?;
        check_non_negative("blurRadius", self.blur_radius)?;
        Ok(())
    }
}

pub(crate) fn check_rotation(degrees: i32) -> Result<(), SessionError> {
    if !(0..=360).contains(&degrees) {
        return Err(SessionError::invalid_parameter(
            "rotationDegrees",
            format!("{degrees} is outside 0..=360"),
        ));
    }
    Ok(())
}

pub(crate) fn check_dimension(name: &'static str, value: Option<u32>) -> Result<(), SessionError> {
    if value == Some(0) {
        return Err(SessionError::invalid_parameter(name, "must be positive"));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), SessionError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SessionError::invalid_parameter(
            name,
            format!("{value} must be a finite number greater than 0"),
        ));
    }
    Ok(())
}

pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), SessionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SessionError::invalid_parameter(
            name,
            format!("{value} must be a finite number of at least 0"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_default() {
        let params = TransformParameters::new();
        assert!(params.is_default());
        assert!(params.validate().is_ok());
        assert_eq!(params.resize_target(), None);
    }

    #[test]
    fn test_parameters_not_default() {
        let mut params = TransformParameters::new();
        params.brightness = 1.5;
        assert!(!params.is_default());
    }

    #[test]
    fn test_resize_target_needs_both_dimensions() {
        let mut params = TransformParameters::new();
        params.target_width = Some(50);
        assert_eq!(params.resize_target(), None);

        params.target_height = Some(40);
        assert_eq!(params.resize_target(), Some((50, 40)));
    }

    /// Name of the field `validate` rejects after applying `mutate`.
    fn rejected_field(mutate: impl FnOnce(&mut TransformParameters)) -> &'static str {
        let mut params = TransformParameters::new();
        mutate(&mut params);
        match params.validate() {
            Err(SessionError::InvalidParameter { name, .. }) => name,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_out_of_domain() {
        assert_eq!(rejected_field(|p| p.rotation_degrees = 361), "rotationDegrees");
        assert_eq!(rejected_field(|p| p.rotation_degrees = -1), "rotationDegrees");
        assert_eq!(rejected_field(|p| p.target_width = Some(0)), "targetWidth");
        assert_eq!(rejected_field(|p| p.target_height = Some(0)), "targetHeight");
        assert_eq!(rejected_field(|p| p.brightness = 0.0), "brightness");
        assert_eq!(rejected_field(|p| p.contrast = -1.0), "contrast");
        assert_eq!(rejected_field(|p| p.saturation = -0.1), "saturation");
        assert_eq!(rejected_field(|p| p.sharpen_amount = f32::NAN), "sharpenAmount");
        assert_eq!(rejected_field(|p| p.blur_radius = f32::INFINITY), "blurRadius");
    }

    #[test]
    fn test_validate_accepts_boundaries() {
        let mut params = TransformParameters::new();
        params.rotation_degrees = 360;
        params.saturation = 0.0;
        params.sharpen_amount = 0.0;
        params.blur_radius = 0.0;
        params.target_width = Some(1);
        params.target_height = Some(1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_parameters_json_uses_camel_case() {
        let mut params = TransformParameters::new();
        params.rotation_degrees = 90;
        params.blur_kernel = BlurKernel::Gaussian;

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["rotationDegrees"], 90);
        assert_eq!(json["blurKernel"], "gaussian");
        assert_eq!(json["targetWidth"], serde_json::Value::Null);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: TransformParameters =
            serde_json::from_str(r#"{"brightness": 1.25, "flippedVertically": true}"#).unwrap();
        assert_eq!(params.brightness, 1.25);
        assert!(params.flipped_vertically);
        assert_eq!(params.contrast, 1.0);
        assert_eq!(params.blur_kernel, BlurKernel::Average);
    }

    #[test]
    fn test_unknown_kernel_name_is_rejected_by_serde() {
        let result: Result<TransformParameters, _> =
            serde_json::from_str(r#"{"blurKernel": "median"}"#);
        assert!(result.is_err());
    }
}
