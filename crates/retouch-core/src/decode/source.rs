//! Decoding encoded image containers (PNG, JPEG) into RGB bitmaps.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{Bitmap, DecodeError};

/// Decode an image from bytes, sniffing the container format.
///
/// Any colour type the `image` crate understands is converted to 8-bit RGB;
/// alpha is discarded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let bitmap = Bitmap::from_rgb_image(img.into_rgb8());
    if bitmap.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(bitmap)
}

/// Read and decode an image file from disk.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read, otherwise the
/// same errors as [`decode_image`].
pub fn open_bitmap_file(path: impl AsRef<Path>) -> Result<Bitmap, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    let bitmap = decode_image(&bytes)?;
    log::info!(
        "Decoded {} ({}x{})",
        path.display(),
        bitmap.width,
        bitmap.height
    );
    Ok(bitmap)
}
