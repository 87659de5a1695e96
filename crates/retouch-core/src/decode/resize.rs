//! Image resizing functions for the resize stage and display previews.
//!
//! Provides various resize operations using the `image` crate's algorithms.
//! All functions return new `Bitmap` instances without modifying the input.

use super::{Bitmap, DecodeError, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `Bitmap` with the specified dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions and
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgb_image(resized))
}

/// Shrink an image to fit inside `max_width` x `max_height`, preserving
/// aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if either bound is zero.
pub fn resize_to_fit(
    image: &Bitmap,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<Bitmap, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit within a bounding box while preserving
/// aspect ratio. Neither result dimension drops below 1.
pub fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale_w = max_width as f64 / width as f64;
    let scale_h = max_height as f64 / height as f64;
    let scale = scale_w.min(scale_h);

    if scale_w <= scale_h {
        // Width is the binding constraint
        let new_height = (height as f64 * scale).round() as u32;
        (max_width.max(1), new_height.clamp(1, max_height.max(1)))
    } else {
        let new_width = (width as f64 * scale).round() as u32;
        (new_width.clamp(1, max_width.max(1)), max_height.max(1))
    }
}
