//! Image rotation with canvas expansion.
//!
//! Angles here are mathematical: positive = counter-clockwise as seen on
//! screen. The pipeline negates the user's clockwise-positive angle before
//! calling in.
//!
//! # Algorithm
//!
//! Exact quarter turns are pure pixel permutations and lose nothing.
//!
//! Every other angle uses inverse mapping: for each output pixel centre we
//! rotate back into the source and sample it bilinearly. With `θ` the
//! counter-clockwise angle and y pointing down:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y = dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! Output pixels that map outside the source are black.

use super::remap;
use crate::decode::Bitmap;

/// Angles closer than this to a quarter turn are treated as exact.
const ANGLE_EPSILON: f64 = 0.001;

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the minimum bounding box that contains the
/// entire rotated image.
///
/// # Arguments
///
/// * `width` - Original image width
/// * `height` - Original image height
/// * `angle_degrees` - Rotation angle in degrees (sign does not matter)
///
/// # Returns
///
/// Tuple of (new_width, new_height) for the rotated bounding box.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // The bounding box of a rotated rectangle is:
    // new_w = |w*cos| + |h*sin|
    // new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image counter-clockwise by `angle_degrees` about its centre.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping). Multiples of 360 return an identical copy.
pub fn apply_rotation(image: &Bitmap, angle_degrees: f64) -> Bitmap {
    match quarter_turns(angle_degrees) {
        Some(turns) => rotate_quarter_turns(image, turns),
        None => rotate_resampled(image, angle_degrees),
    }
}

/// Number of counter-clockwise quarter turns if the angle is (nearly) an
/// exact multiple of 90 degrees.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let normalized = angle_degrees.rem_euclid(360.0);
    let turns = (normalized / 90.0).round();
    if (normalized - turns * 90.0).abs() < ANGLE_EPSILON {
        Some((turns as u8) % 4)
    } else {
        None
    }
}

fn rotate_quarter_turns(image: &Bitmap, turns: u8) -> Bitmap {
    let (w, h) = (image.width, image.height);
    match turns {
        // Right column becomes the top row.
        1 => remap(image, h, w, |x, y| (w - 1 - y, x)),
        2 => remap(image, w, h, |x, y| (w - 1 - x, h - 1 - y)),
        // Left column becomes the bottom row.
        3 => remap(image, h, w, |x, y| (y, h - 1 - x)),
        _ => image.clone(),
    }
}

fn rotate_resampled(image: &Bitmap, angle_degrees: f64) -> Bitmap {
    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * 3];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Pixel centre relative to the destination centre
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            if let Some(pixel) = sample_bilinear(image, src_x, src_y) {
                let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * 3;
                output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
            }
        }
    }

    Bitmap::new(dst_w, dst_h, output)
}

/// Sample a pixel using bilinear interpolation.
///
/// Coordinates are continuous with pixel `(i, j)` covering
/// `[i, i+1) x [j, j+1)`. Returns `None` outside the source; neighbours
/// past the last pixel centre are clamped to the edge.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> Option<[u8; 3]> {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < 0.0 || x > w || y < 0.0 || y > h {
        return None;
    }

    let fx = (x - 0.5).clamp(0.0, w - 1.0);
    let fy = (y - 0.5).clamp(0.0, h - 1.0);

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] as f64 * (1.0 - tx) * (1.0 - ty)
            + p10[i] as f64 * tx * (1.0 - ty)
            + p01[i] as f64 * (1.0 - tx) * ty
            + p11[i] as f64 * tx * ty;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(result)
}
