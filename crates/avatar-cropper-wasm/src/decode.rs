//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@avatar-cropper/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! session.load_image(image.width, image.height);
//! ```

use crate::types::JsDecodedImage;
use avatar_cropper_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG into RGBA pixels, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a supported image format
/// - The image is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation tag (1-8) of the image; 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
