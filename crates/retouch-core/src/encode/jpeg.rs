//! JPEG export. Chosen for `.jpg`/`.jpeg` save paths, where it runs at
//! [`DEFAULT_JPEG_QUALITY`](super::DEFAULT_JPEG_QUALITY). Lossy, so pixels
//! read back from the file only approximate the session's current image.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_buffer, EncodeError};
use crate::decode::Bitmap;

/// Encode a bitmap to baseline JPEG bytes. `quality` outside 1-100 is
/// clamped into range.
pub fn encode_jpeg(image: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(&image.pixels, image.width, image.height)?;

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out)
}
