//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing session and codecs to
//! JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `session` - Stateful editing session with preview zoom
//! - `types` - WASM-compatible bitmap wrapper
//! - `decode` - Decoding and resize bindings
//! - `encode` - PNG/JPEG export bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageSession } from '@retouch/wasm';
//!
//! await init();
//!
//! const session = new JsImageSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.set_saturation(0);
//! const preview = session.preview(canvas.width, canvas.height);
//! ```
//!
//! Core and binding logging go through the `log` facade; install a logger on the host
//! side to see it.

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

pub use decode::{decode_image, resize, resize_to_fit};
pub use encode::{encode_jpeg, encode_png};
pub use session::JsImageSession;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
