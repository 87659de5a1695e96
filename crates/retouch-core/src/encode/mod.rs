//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding bitmaps to PNG (the default export format)
//! - Encoding bitmaps to JPEG with configurable quality
//! - Choosing the export format from a file extension and writing to disk
//!
//! Unknown or missing extensions are written as PNG, so callers may save
//! under any name they like.

mod jpeg;
mod png;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Bitmap;

pub use jpeg::encode_jpeg;
pub use png::{encode_png, PNG_SIGNATURE};

/// Default JPEG quality used when the format is picked from an extension.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur while encoding or writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded bytes failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Output container for an exported bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ExportFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG at the given quality (1-100).
    Jpeg { quality: u8 },
}

impl ExportFormat {
    /// Pick a format from a path's extension.
    ///
    /// `.jpg` / `.jpeg` (any case) select JPEG at [`DEFAULT_JPEG_QUALITY`];
    /// everything else, including no extension, selects PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => ExportFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            },
            _ => ExportFormat::Png,
        }
    }

    /// Encode `image` in this format.
    pub fn encode(self, image: &Bitmap) -> Result<Vec<u8>, EncodeError> {
        match self {
            ExportFormat::Png => encode_png(image),
            ExportFormat::Jpeg { quality } => encode_jpeg(image, quality),
        }
    }
}

/// Encode `image` and write it to `path`, choosing the format from the
/// path's extension (PNG by default).
pub fn save_bitmap_file(image: &Bitmap, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = ExportFormat::from_path(path);
    let bytes = format.encode(image)?;
    std::fs::write(path, bytes).map_err(|e| EncodeError::IoError(e.to_string()))?;
    log::info!(
        "Saved {}x{} image to {} as {:?}",
        image.width,
        image.height,
        path.display(),
        format
    );
    Ok(())
}

/// Check dimensions and buffer length before handing pixels to a codec.
fn validate_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
