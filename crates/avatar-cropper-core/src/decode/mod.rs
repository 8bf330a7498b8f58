//! Image decoding for avatar sources.
//!
//! The crop core itself only ever sees [`DecodedImage`] buffers. This module
//! turns files, `file://` URIs and raw bytes into those buffers, applying
//! EXIF orientation so the crop matches what the user saw.
//!
//! Decoding is synchronous; callers that need a responsive UI run it on a
//! background worker and pair it with a [`crate::loader::LoadTracker`].

mod reader;
mod types;

pub use reader::{decode_file, decode_image, get_orientation, load_source};
pub use types::{DecodeError, DecodedImage, ImageSource, Orientation};
