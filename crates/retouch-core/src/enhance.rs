//! Tonal enhancement stages
//!
//! Brightness, contrast and saturation are all the same shape of operation:
//! a per-pixel linear interpolation between the pixel and a "degenerate"
//! reference, with the factor as the interpolation weight.
//!
//! | stage | reference |
//! |---|---|
//! | Brightness | black |
//! | Contrast | uniform gray at the image's mean luminance |
//! | Saturation | the pixel's own luminance gray |
//!
//! A factor of 1.0 leaves the image untouched, 0.0 yields the reference,
//! and factors above 1.0 extrapolate away from it. Results are rounded and
//! clamped to 0-255.

use crate::decode::Bitmap;
use crate::luminance::{luma_u8, mean_luma};

/// A per-pixel tonal operation applied in place.
pub trait Enhancement {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// True when applying this enhancement would not change any pixel.
    fn is_identity(&self) -> bool;

    /// Apply the enhancement to every pixel of `image`.
    fn apply(&self, image: &mut Bitmap);
}

/// Scale every channel by a factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brightness(pub f32);

/// Scale each channel's distance from the image's mean luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contrast(pub f32);

/// Scale each pixel's distance from its own luminance gray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation(pub f32);

impl Enhancement for Brightness {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn is_identity(&self) -> bool {
        self.0 == 1.0
    }

    fn apply(&self, image: &mut Bitmap) {
        let factor = self.0;
        for v in image.pixels.iter_mut() {
            *v = to_channel(*v as f32 * factor);
        }
    }
}

impl Enhancement for Contrast {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn is_identity(&self) -> bool {
        self.0 == 1.0
    }

    fn apply(&self, image: &mut Bitmap) {
        let mean = mean_luma(&image.pixels) as f32;
        let factor = self.0;
        for v in image.pixels.iter_mut() {
            *v = to_channel(blend(mean, *v as f32, factor));
        }
    }
}

impl Enhancement for Saturation {
    fn name(&self) -> &'static str {
        "saturation"
    }

    fn is_identity(&self) -> bool {
        self.0 == 1.0
    }

    fn apply(&self, image: &mut Bitmap) {
        let factor = self.0;
        for chunk in image.pixels.chunks_exact_mut(3) {
            let gray = luma_u8(chunk[0], chunk[1], chunk[2]) as f32;
            for v in chunk.iter_mut() {
                *v = to_channel(blend(gray, *v as f32, factor));
            }
        }
    }
}

/// Linear interpolation from `reference` (factor 0) to `value` (factor 1).
#[inline]
fn blend(reference: f32, value: f32, factor: f32) -> f32 {
    reference + (value - reference) * factor
}

/// Round and clamp an intermediate value to a valid channel.
#[inline]
pub(crate) fn to_channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}
