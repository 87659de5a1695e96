//! Geometric transforms: rotation and mirror flips.
//!
//! These are the first stages of the pipeline and the only ones that can
//! change the image dimensions besides resize.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Rotation angles passed to [`apply_rotation`] are counter-clockwise
//!   positive; the pipeline converts the user's clockwise angle

mod flip;
mod rotation;

pub use flip::{flip_horizontal, flip_vertical};
pub use rotation::{apply_rotation, compute_rotated_bounds};

use crate::decode::Bitmap;

/// Build a `dst_w` x `dst_h` image where each output pixel is copied from
/// the source coordinate returned by `source_of(x, y)`.
pub(crate) fn remap<F>(image: &Bitmap, dst_w: u32, dst_h: u32, source_of: F) -> Bitmap
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * 3);
    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = source_of(x, y);
            output.extend_from_slice(&image.pixel(sx, sy));
        }
    }
    Bitmap::new(dst_w, dst_h, output)
}
