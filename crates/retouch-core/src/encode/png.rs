//! PNG encoding for export. PNG is the default export format.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_buffer, EncodeError};
use crate::decode::Bitmap;

/// PNG signature bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Encode a bitmap to PNG bytes.
///
/// PNG is lossless, so decoding the result yields the exact input pixels.
pub fn encode_png(image: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(&image.pixels, image.width, image.height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
