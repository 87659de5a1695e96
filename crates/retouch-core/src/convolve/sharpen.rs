//! Laplacian edge-enhancement sharpen.
//!
//! The edge response of a pixel is the negated 4-neighbour discrete
//! Laplacian:
//!
//! ```text
//!  0 -1  0
//! -1  4 -1
//!  0 -1  0
//! ```
//!
//! and the output is `pixel + amount * response`, clamped. The amount scales
//! the edge signal linearly; there is no Gaussian pre-smoothing.

use imageproc::filter::{horizontal_filter, vertical_filter};

use super::{reflect_padded, unpad, ConvolutionFilter};
use crate::decode::Bitmap;
use crate::enhance::to_channel;

const SECOND_DIFFERENCE: [f32; 3] = [-1.0, 2.0, -1.0];

/// Sharpen stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpen {
    /// Edge gain. 1.0 is the neutral setting and skips the stage.
    pub amount: f32,
}

impl ConvolutionFilter for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn is_identity(&self) -> bool {
        self.amount == 1.0
    }

    fn apply(&self, image: &Bitmap) -> Bitmap {
        let response = edge_response(image);
        let pixels = image
            .pixels
            .iter()
            .zip(&response)
            .map(|(&v, &r)| to_channel(v as f32 + self.amount * r))
            .collect();
        Bitmap::new(image.width, image.height, pixels)
    }
}

/// Per-channel edge response, same layout as the bitmap's pixel buffer.
///
/// Flat regions respond with 0; the light side of an edge responds
/// positively and the dark side negatively.
pub fn edge_response(image: &Bitmap) -> Vec<f32> {
    // The 3x3 kernel is the sum of two 1-D second differences.
    let canvas = reflect_padded(image, 1);
    let (w, h) = (image.width, image.height);
    let across = unpad(&horizontal_filter(&canvas, &SECOND_DIFFERENCE), 1, w, h);
    let down = unpad(&vertical_filter(&canvas, &SECOND_DIFFERENCE), 1, w, h);
    across.into_iter().zip(down).map(|(a, d)| a + d).collect()
}
