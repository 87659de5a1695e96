//! Mirror flips. Both are lossless and self-inverse.

use super::remap;
use crate::decode::Bitmap;

/// Mirror the image left-right.
pub fn flip_horizontal(image: &Bitmap) -> Bitmap {
    let w = image.width;
    remap(image, image.width, image.height, |x, y| (w - 1 - x, y))
}

/// Mirror the image top-bottom.
pub fn flip_vertical(image: &Bitmap) -> Bitmap {
    let h = image.height;
    remap(image, image.width, image.height, |x, y| (x, h - 1 - y))
}
