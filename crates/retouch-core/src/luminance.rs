//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! BT.601 is the weighting used by the usual "convert to grayscale"
//! operation on 8-bit images, so the contrast reference level and the
//! saturation stage's gray target both come from here.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMA_B: f32 = 0.114;

/// Calculate luminance from channel values on the 0-255 scale.
///
/// Inputs may lie outside 0-255 (intermediate stage values); the result is
/// not clamped.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate the 8-bit gray level for an 8-bit RGB pixel.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r as f32, g as f32, b as f32).clamp(0.0, 255.0).round() as u8
}

/// Mean 8-bit gray level of an RGB buffer, rounded to the nearest integer.
///
/// Returns 0 for an empty buffer.
pub fn mean_luma(pixels: &[u8]) -> u8 {
    let mut sum = 0u64;
    let mut count = 0u64;
    for chunk in pixels.chunks_exact(3) {
        sum += luma_u8(chunk[0], chunk[1], chunk[2]) as u64;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    ((sum as f64 / count as f64) + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma_u8(255, 255, 255), 255);
        assert_eq!(luma_u8(0, 0, 0), 0);
    }

    #[test]
    fn test_luma_gray_preserves_value() {
        for v in 0..=255u8 {
            assert_eq!(luma_u8(v, v, v), v, "gray {} should map to itself", v);
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 ≈ 76.2
        assert_eq!(luma_u8(255, 0, 0), 76);
        // 0.587 * 255 ≈ 149.7
        assert_eq!(luma_u8(0, 255, 0), 150);
        // 0.114 * 255 ≈ 29.1
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_mean_luma() {
        let pixels = [0, 0, 0, 255, 255, 255];
        // (0 + 255) / 2 = 127.5 rounds up
        assert_eq!(mean_luma(&pixels), 128);
        assert_eq!(mean_luma(&[]), 0);
    }

    #[test]
    fn test_mean_luma_ignores_trailing_bytes() {
        assert_eq!(mean_luma(&[100, 100, 100, 7]), 100);
    }
}
