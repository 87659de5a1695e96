//! Kernel convolution stages: sharpen and blur.
//!
//! Both stages run a small kernel over every channel of the bitmap they are
//! given, so a preceding resize changes the footprint the kernel covers
//! (kernel sizes are in output pixels).
//!
//! # Borders
//!
//! Samples outside the image are reflected about the edge pixel without
//! repeating it (`dcb|abcd|cba`). A one-pixel-wide axis maps every sample
//! to that single pixel.
//!
//! # Anchors
//!
//! Kernels are anchored at `len / 2`. For even-length kernels this puts one
//! more tap before the anchor than after it.
//!
//! The filtering itself is `imageproc`'s. Its own border rule clamps to the
//! edge pixel, so images are first padded with reflected pixels on a float
//! canvas and the window is cut back out afterwards.

mod blur;
mod sharpen;

pub use blur::{gaussian_sigma, Blur, BlurKernel, UnknownKernel};
pub use sharpen::{edge_response, Sharpen};

use image::{Rgb, Rgb32FImage};
use imageproc::filter::separable_filter_equal;

use crate::decode::Bitmap;
use crate::enhance::to_channel;

/// A whole-image filter that reads neighbouring pixels.
pub trait ConvolutionFilter {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// True when applying this filter would not change any pixel.
    fn is_identity(&self) -> bool;

    /// Produce the filtered image. The input is left untouched.
    fn apply(&self, image: &Bitmap) -> Bitmap;
}

/// A one-dimensional kernel, applied along rows and then columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1D {
    /// Tap weights.
    pub weights: Vec<f32>,
}

impl Kernel1D {
    /// Build a kernel from weights. Panics on an empty weight list; callers
    /// derive lengths from validated parameters.
    pub fn new(weights: Vec<f32>) -> Self {
        assert!(!weights.is_empty(), "kernel must have at least one tap");
        Self { weights }
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Offset of the tap that lands on the output pixel.
    pub fn anchor(&self) -> usize {
        self.weights.len() / 2
    }
}

/// Map a possibly out-of-range coordinate into `0..len` by reflecting about
/// the edge pixels without repeating them.
#[inline]
pub(crate) fn reflect_101(i: i64, len: i64) -> usize {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let i = i.rem_euclid(period);
    (if i >= len { period - i } else { i }) as usize
}

/// Copy `image` into a float canvas with `pad` reflected pixels on every
/// side, so that `imageproc` filters never reach their clamped border.
pub(crate) fn reflect_padded(image: &Bitmap, pad: u32) -> Rgb32FImage {
    let (w, h) = (i64::from(image.width), i64::from(image.height));
    let pad_i = i64::from(pad);
    Rgb32FImage::from_fn(image.width + 2 * pad, image.height + 2 * pad, |x, y| {
        let sx = reflect_101(i64::from(x) - pad_i, w);
        let sy = reflect_101(i64::from(y) - pad_i, h);
        let [r, g, b] = image.pixel(sx as u32, sy as u32);
        Rgb([f32::from(r), f32::from(g), f32::from(b)])
    })
}

/// Read the `width` x `height` window at (`pad`, `pad`) of a filtered
/// canvas as raw channel values.
pub(crate) fn unpad(canvas: &Rgb32FImage, pad: u32, width: u32, height: u32) -> Vec<f32> {
    let mut values = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            values.extend_from_slice(&canvas.get_pixel(x + pad, y + pad).0);
        }
    }
    values
}

/// Apply `kernel` along rows, then along columns, and round back to 8 bits.
pub(crate) fn convolve_separable(image: &Bitmap, kernel: &Kernel1D) -> Bitmap {
    let pad = kernel.anchor() as u32;
    let canvas = reflect_padded(image, pad);
    let filtered = separable_filter_equal(&canvas, &kernel.weights);
    let pixels = unpad(&filtered, pad, image.width, image.height)
        .into_iter()
        .map(to_channel)
        .collect();
    Bitmap::new(image.width, image.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_101_inside() {
        for i in 0..5 {
            assert_eq!(reflect_101(i, 5), i as usize);
        }
    }

    #[test]
    fn test_reflect_101_edges() {
        // dcb|abcd|cba
        assert_eq!(reflect_101(-1, 4), 1);
        assert_eq!(reflect_101(-3, 4), 3);
        assert_eq!(reflect_101(4, 4), 2);
        assert_eq!(reflect_101(6, 4), 0);
    }

    #[test]
    fn test_reflect_101_far_outside() {
        // Large kernels on tiny images bounce more than once
        let idx = reflect_101(-7, 3);
        assert!(idx < 3);
        let idx = reflect_101(11, 2);
        assert!(idx < 2);
    }

    #[test]
    fn test_reflect_101_matches_bouncing() {
        // Reference: bounce off the edges one reflection at a time
        fn bounce(mut i: i64, len: i64) -> usize {
            loop {
                if i < 0 {
                    i = -i;
                } else if i >= len {
                    i = 2 * (len - 1) - i;
                } else {
                    return i as usize;
                }
            }
        }
        for len in 2..7 {
            for i in -40..40 {
                assert_eq!(reflect_101(i, len), bounce(i, len), "i={i} len={len}");
            }
        }
    }

    #[test]
    fn test_reflect_101_huge_offsets() {
        assert!(reflect_101(i64::MAX / 2, 3) < 3);
        assert!(reflect_101(-(i64::MAX / 2), 7) < 7);
    }

    #[test]
    fn test_reflect_padded_layout() {
        // abc -> cb|abc|ba
        let img = Bitmap::new(3, 1, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
        let canvas = reflect_padded(&img, 2);
        assert_eq!(canvas.dimensions(), (7, 5));
        let row: Vec<f32> = (0..7).map(|x| canvas.get_pixel(x, 0).0[0]).collect();
        assert_eq!(row, vec![3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0]);
        assert_eq!(unpad(&canvas, 2, 3, 1), vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_reflect_101_single_pixel() {
        assert_eq!(reflect_101(-5, 1), 0);
        assert_eq!(reflect_101(5, 1), 0);
    }

    #[test]
    fn test_kernel_anchor() {
        assert_eq!(Kernel1D::new(vec![1.0]).anchor(), 0);
        assert_eq!(Kernel1D::new(vec![0.5; 2]).anchor(), 1);
        assert_eq!(Kernel1D::new(vec![0.2; 5]).anchor(), 2);
    }

    #[test]
    fn test_unit_kernel_is_identity() {
        let img = Bitmap::new(3, 2, (0..18).map(|v| v * 10).collect());
        let result = convolve_separable(&img, &Kernel1D::new(vec![1.0]));
        assert_eq!(result, img);
    }

    #[test]
    fn test_shift_kernel_uses_reflection() {
        // [1, 0] anchored at index 1 picks the left neighbour
        let img = Bitmap::new(3, 1, vec![10, 10, 10, 20, 20, 20, 30, 30, 30]);
        let result = convolve_separable(&img, &Kernel1D::new(vec![1.0, 0.0]));
        // x=0 reads x=-1 which reflects to x=1
        assert_eq!(result.pixels, vec![20, 20, 20, 10, 10, 10, 20, 20, 20]);
    }
}
