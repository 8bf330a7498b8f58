//! Avatar Cropper WASM - WebAssembly bindings for the avatar cropper
//!
//! This crate exposes the avatar-cropper-core session to JavaScript so a web
//! page can drive the same transform, gesture and crop logic as native hosts.
//!
//! # Module Structure
//!
//! - `session` - The crop session: gestures, animation ticks, cropping
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropSession } from '@avatar-cropper/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsCropSession('circle');
//! session.resize(canvas.width, canvas.height);
//! session.load_image(image.width, image.height);
//! // ... forward pointer events ...
//! const avatar = session.crop(image);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod logger;
mod session;
mod types;

pub use decode::{decode_image, image_orientation};
pub use session::JsCropSession;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load).
///
/// Routes the core crate's log output to the browser console at `info`.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level: "error", "warn", "info", "debug",
/// "trace" or "off".
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
