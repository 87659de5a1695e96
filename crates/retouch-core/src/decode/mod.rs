//! Image decoding and resampling for Retouch.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG containers into RGB bitmaps
//! - Reading image files from disk
//! - Resizing bitmaps to exact dimensions or to fit a bounding box
//!
//! # Architecture
//!
//! Everything here is synchronous and single-threaded. Decoding is the only
//! place an encoded container is turned into a [`Bitmap`]; the rest of the
//! crate works on bitmaps alone.

mod resize;
mod source;
mod types;

pub use resize::{calculate_fit_dimensions, resize, resize_to_fit};
pub use source::{decode_image, open_bitmap_file};
pub use types::{Bitmap, DecodeError, FilterType};
