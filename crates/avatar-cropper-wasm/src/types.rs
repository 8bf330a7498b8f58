//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core cropper
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use avatar_cropper_core::DecodedImage;
use wasm_bindgen::prelude::*;

/// A decoded RGBA image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`, which can be wrapped in an `ImageData` for drawing. Call
/// `free()` to release a large image early; otherwise the finalizer does it.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and straight-alpha RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    ///
    /// # Errors
    /// Returns error if `pixels.length != width * height * 4`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        Self::from_parts(width, height, pixels).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * DecodedImage::CHANNELS;
        if pixels.len() != expected {
            return Err(format!(
                "Pixel buffer has {} bytes, expected {} for {}x{} RGBA",
                pixels.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage::new(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decoded_round_trip() {
        let img = JsDecodedImage::from_decoded(DecodedImage::filled(10, 5, [1, 2, 3, 4]));
        assert_eq!(img.width(), 10);
        assert_eq!(img.height(), 5);
        assert_eq!(img.byte_length(), 200);

        let back = img.to_decoded();
        assert_eq!(back, DecodedImage::filled(10, 5, [1, 2, 3, 4]));
    }

    #[test]
    fn test_from_parts_checks_length() {
        assert!(JsDecodedImage::from_parts(2, 2, vec![0; 16]).is_ok());

        let err = JsDecodedImage::from_parts(2, 2, vec![0; 12]).err().unwrap();
        assert!(err.contains("expected 16"));
    }
}
