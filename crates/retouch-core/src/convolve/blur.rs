//! Average (box) and Gaussian blur.
//!
//! The blur radius is a user-facing float. It is rounded to whole pixels and
//! turned into a square kernel side:
//!
//! - **Average**: side `max(1, round(radius))`
//! - **Gaussian**: side `2 * round(radius) + 1`, always odd
//!
//! The rounded radius is capped at the longer image side. Past that point
//! every output pixel already sees the whole row or column, and the cap
//! keeps huge radii from sizing a kernel larger than memory.
//!
//! Gaussian sigma is derived from the side as
//! `0.3 * ((side - 1) * 0.5 - 1) + 0.8`, the conventional choice when only a
//! kernel size is given.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{convolve_separable, ConvolutionFilter, Kernel1D};
use crate::decode::Bitmap;

/// Convolution family used by the blur stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurKernel {
    /// Uniform box kernel.
    #[default]
    Average,
    /// Gaussian-weighted kernel.
    Gaussian,
}

impl BlurKernel {
    /// Square kernel side for a blur radius on an image whose longer side
    /// is `extent` pixels.
    ///
    /// Always at least 1; odd for [`BlurKernel::Gaussian`].
    pub fn side(self, radius: f32, extent: u32) -> usize {
        // NaN and negatives fall to 0.
        let rounded = radius.max(0.0).round().min(extent as f32) as usize;
        match self {
            BlurKernel::Average => rounded.max(1),
            BlurKernel::Gaussian => 2 * rounded + 1,
        }
    }

    /// Build the normalized 1D kernel for a blur radius.
    pub fn kernel(self, radius: f32, extent: u32) -> Kernel1D {
        let side = self.side(radius, extent);
        match self {
            BlurKernel::Average => Kernel1D::new(vec![1.0 / side as f32; side]),
            BlurKernel::Gaussian => gaussian_kernel(side),
        }
    }
}

impl fmt::Display for BlurKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlurKernel::Average => write!(f, "average"),
            BlurKernel::Gaussian => write!(f, "gaussian"),
        }
    }
}

/// Error returned when a kernel name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blur kernel '{0}' (expected 'average' or 'gaussian')")]
pub struct UnknownKernel(pub String);

impl FromStr for BlurKernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" => Ok(BlurKernel::Average),
            "gaussian" => Ok(BlurKernel::Gaussian),
            _ => Err(UnknownKernel(s.to_string())),
        }
    }
}

/// Sigma used for a Gaussian kernel of the given side.
pub fn gaussian_sigma(side: usize) -> f32 {
    0.3 * ((side as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel(side: usize) -> Kernel1D {
    let sigma = gaussian_sigma(side);
    let center = (side / 2) as f32;
    let mut weights: Vec<f32> = (0..side)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    Kernel1D::new(weights)
}

/// Blur stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blur {
    /// Blur radius in output pixels; 0.0 disables the stage.
    pub radius: f32,
    /// Kernel family.
    pub kernel: BlurKernel,
}

impl ConvolutionFilter for Blur {
    fn name(&self) -> &'static str {
        "blur"
    }

    fn is_identity(&self) -> bool {
        self.radius == 0.0
    }

    fn apply(&self, image: &Bitmap) -> Bitmap {
        let kernel = self.kernel.kernel(self.radius, image.width.max(image.height));
        if kernel.len() == 1 {
            // A single normalized tap is the identity.
            return image.clone();
        }
        convolve_separable(image, &kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Test image with a sharp black-to-white boundary at x=5.
    fn sharp_edge_image() -> Bitmap {
        let mut pixels = Vec::with_capacity(10 * 10 * 3);
        for _y in 0..10 {
            for x in 0..10 {
                let v = if x < 5 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        Bitmap::new(10, 10, pixels)
    }

    #[test]
    fn test_average_side() {
        assert_eq!(BlurKernel::Average.side(0.2, 1000), 1);
        assert_eq!(BlurKernel::Average.side(1.0, 1000), 1);
        assert_eq!(BlurKernel::Average.side(2.4, 1000), 2);
        assert_eq!(BlurKernel::Average.side(2.5, 1000), 3);
        assert_eq!(BlurKernel::Average.side(10.0, 1000), 10);
    }

    #[test]
    fn test_gaussian_side() {
        assert_eq!(BlurKernel::Gaussian.side(0.2, 1000), 1);
        assert_eq!(BlurKernel::Gaussian.side(1.0, 1000), 3);
        assert_eq!(BlurKernel::Gaussian.side(2.6, 1000), 7);
    }

    #[test]
    fn test_gaussian_sigma() {
        assert!((gaussian_sigma(3) - 0.8).abs() < 1e-6);
        assert!((gaussian_sigma(7) - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_kernels_are_normalized() {
        for kind in [BlurKernel::Average, BlurKernel::Gaussian] {
            for radius in [0.4, 1.0, 3.0, 7.5] {
                let sum: f32 = kind.kernel(radius, 1000).weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-5, "{kind} r={radius} sums to {sum}");
            }
        }
    }

    #[test]
    fn test_gaussian_kernel_is_symmetric_and_peaked() {
        let k = BlurKernel::Gaussian.kernel(3.0, 1000);
        let n = k.len();
        for i in 0..n / 2 {
            assert!((k.weights[i] - k.weights[n - 1 - i]).abs() < 1e-7);
            assert!(k.weights[i] < k.weights[i + 1]);
        }
    }

    #[test]
    fn test_kernel_names_parse() {
        assert_eq!("average".parse::<BlurKernel>(), Ok(BlurKernel::Average));
        assert_eq!(" Gaussian ".parse::<BlurKernel>(), Ok(BlurKernel::Gaussian));
        assert!("median".parse::<BlurKernel>().is_err());
    }

    #[test]
    fn test_kernel_serde_names() {
        assert_eq!(
            serde_json::to_string(&BlurKernel::Gaussian).unwrap(),
            "\"gaussian\""
        );
        let k: BlurKernel = serde_json::from_str("\"average\"").unwrap();
        assert_eq!(k, BlurKernel::Average);
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let blur = Blur {
            radius: 0.0,
            kernel: BlurKernel::Gaussian,
        };
        assert!(blur.is_identity());
    }

    #[test]
    fn test_small_radius_does_not_change_pixels() {
        let img = sharp_edge_image();
        for kernel in [BlurKernel::Average, BlurKernel::Gaussian] {
            let blur = Blur {
                radius: 0.3,
                kernel,
            };
            assert_eq!(blur.apply(&img), img);
        }
    }

    #[test]
    fn test_blur_smooths_sharp_edge() {
        let img = sharp_edge_image();
        for kernel in [BlurKernel::Average, BlurKernel::Gaussian] {
            let blurred = Blur {
                radius: 2.0,
                kernel,
            }
            .apply(&img);

            let left = blurred.pixel(4, 5)[0];
            let right = blurred.pixel(5, 5)[0];
            assert!(left > 0 || right < 255, "{kernel} should soften the edge");
            assert_eq!(blurred.pixel(0, 5)[0], 0, "far from the edge stays black");
            assert_eq!(blurred.pixel(9, 5)[0], 255, "far from the edge stays white");
        }
    }

    #[test]
    fn test_average_blur_exact_values() {
        // Side 2 box anchored at 1 averages each pixel with its left neighbour
        let img = Bitmap::new(3, 1, vec![0, 0, 0, 100, 100, 100, 200, 200, 200]);
        let blurred = Blur {
            radius: 2.0,
            kernel: BlurKernel::Average,
        }
        .apply(&img);
        // x=0: (x=-1 -> x=1) 100 and 0 -> 50
        assert_eq!(blurred.pixel(0, 0), [50, 50, 50]);
        assert_eq!(blurred.pixel(1, 0), [50, 50, 50]);
        assert_eq!(blurred.pixel(2, 0), [150, 150, 150]);
    }

    #[test]
    fn test_blur_preserves_uniform_image() {
        let img = Bitmap::filled(9, 7, [40, 120, 220]);
        for kernel in [BlurKernel::Average, BlurKernel::Gaussian] {
            let blurred = Blur {
                radius: 4.0,
                kernel,
            }
            .apply(&img);
            assert_eq!(blurred, img);
        }
    }

    #[test]
    fn test_large_kernel_on_tiny_image() {
        let img = Bitmap::new(2, 1, vec![0, 0, 0, 255, 255, 255]);
        let blurred = Blur {
            radius: 15.0,
            kernel: BlurKernel::Gaussian,
        }
        .apply(&img);
        assert_eq!(blurred.width, 2);
        assert_eq!(blurred.height, 1);
    }

    #[test]
    fn test_side_is_capped_by_extent() {
        assert_eq!(BlurKernel::Average.side(50.0, 8), 8);
        assert_eq!(BlurKernel::Gaussian.side(50.0, 8), 17);
        assert_eq!(BlurKernel::Average.side(f32::MAX, 8), 8);
        assert_eq!(BlurKernel::Gaussian.side(f32::MAX, 8), 17);
        assert_eq!(BlurKernel::Gaussian.side(f32::INFINITY, 1), 3);
        assert_eq!(BlurKernel::Average.side(f32::NAN, 8), 1);
    }

    #[test]
    fn test_max_radius_blurs_without_panicking() {
        let img = sharp_edge_image();
        for kernel in [BlurKernel::Average, BlurKernel::Gaussian] {
            let blurred = Blur {
                radius: f32::MAX,
                kernel,
            }
            .apply(&img);
            assert_eq!((blurred.width, blurred.height), (10, 10));
        }
    }

    proptest! {
        /// Property: Gaussian sides are positive and odd, average sides positive.
        #[test]
        fn prop_kernel_side_validity(radius in 0.0001f32..200.0, extent in 1u32..400) {
            let g = BlurKernel::Gaussian.side(radius, extent);
            prop_assert!(g >= 1);
            prop_assert_eq!(g % 2, 1);
            prop_assert!(g <= 2 * extent as usize + 1);

            let a = BlurKernel::Average.side(radius, extent);
            prop_assert!(a >= 1);
            prop_assert!(a <= extent as usize);
        }
    }
}
