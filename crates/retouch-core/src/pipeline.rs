//! The transform pipeline.
//!
//! [`recompute`] derives the displayed image from the untouched original and
//! the current [`TransformParameters`]. It always starts from the original,
//! so the result depends only on its two inputs and never on the order in
//! which parameters were changed.
//!
//! ## Stage Order
//! 1. Rotate (clockwise, canvas expands)
//! 2. Flip horizontal
//! 3. Flip vertical
//! 4. Resize (Lanczos3, only when both dimensions are set)
//! 5. Brightness
//! 6. Contrast
//! 7. Saturation
//! 8. Sharpen
//! 9. Blur
//!
//! A stage whose parameter is at its neutral value is skipped entirely, which
//! keeps the default parameter set an exact identity.

use crate::convolve::{Blur, ConvolutionFilter, Sharpen};
use crate::decode::{resize, Bitmap, FilterType};
use crate::enhance::{Brightness, Contrast, Enhancement, Saturation};
use crate::transform::{apply_rotation, flip_horizontal, flip_vertical};
use crate::TransformParameters;

/// Run every stage over a copy of `original`.
///
/// The parameters are expected to have passed
/// [`TransformParameters::validate`].
///
/// # Panics
///
/// Panics if `original`'s pixel buffer does not match its dimensions. The
/// session only ever stores consistent bitmaps, so this indicates a bug in
/// the caller.
pub fn recompute(original: &Bitmap, params: &TransformParameters) -> Bitmap {
    assert!(
        original.is_consistent(),
        "pipeline input has {} bytes for a {}x{} image",
        original.pixels.len(),
        original.width,
        original.height
    );
    debug_assert!(params.validate().is_ok(), "unvalidated parameters");

    let mut image = original.clone();

    if params.rotation_degrees % 360 != 0 {
        log::debug!("stage rotate: {} degrees clockwise", params.rotation_degrees);
        // The rotation primitive is counter-clockwise positive.
        image = apply_rotation(&image, -f64::from(params.rotation_degrees));
    }

    if params.flipped_horizontally {
        log::debug!("stage flip horizontal");
        image = flip_horizontal(&image);
    }

    if params.flipped_vertically {
        log::debug!("stage flip vertical");
        image = flip_vertical(&image);
    }

    if let Some((width, height)) = params.resize_target() {
        log::debug!("stage resize: {}x{}", width, height);
        image = match resize(&image, width, height, FilterType::Lanczos3) {
            Ok(resized) => resized,
            Err(err) => panic!("resize stage rejected validated input: {err}"),
        };
    }

    let enhancements: [&dyn Enhancement; 3] = [
        &Brightness(params.brightness),
        &Contrast(params.contrast),
        &Saturation(params.saturation),
    ];
    for stage in enhancements {
        if !stage.is_identity() {
            log::debug!("stage {}", stage.name());
            stage.apply(&mut image);
        }
    }

    let filters: [&dyn ConvolutionFilter; 2] = [
        &Sharpen {
            amount: params.sharpen_amount,
        },
        &Blur {
            radius: params.blur_radius,
            kernel: params.blur_kernel,
        },
    ];
    for stage in filters {
        if !stage.is_identity() {
            log::debug!("stage {}", stage.name());
            image = stage.apply(&image);
        }
    }

    image
}
