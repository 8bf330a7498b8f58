//! Avatar Cropper Core - Interactive avatar cropping library
//!
//! This crate provides the platform-independent half of an avatar cropper:
//! the pan/zoom transform that keeps a fixed crop square covered by the
//! image, the gesture interpreter that drives it, and the executor that cuts
//! the final square or circular avatar out of the decoded pixels.

pub mod config;
pub mod crop;
pub mod decode;
pub mod geometry;
pub mod gesture;
pub mod loader;
pub mod transform;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use config::{ConfigError, CropperConfig, DegenerateCropPolicy};
pub use crop::{crop, crop_region, CropError, PixelBuffer};
pub use decode::{decode_image, DecodeError, DecodedImage, ImageSource};
pub use geometry::{PixelRect, Rect, Size, Vec2};
pub use gesture::{AnimationHandle, AnimationStatus, CropSession, GestureEvent};
pub use loader::{LoadTicket, LoadTracker};
pub use transform::{CropState, TransformSnapshot};

/// Outline of the exported avatar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CropShape {
    /// Plain square, fully opaque.
    #[default]
    Square,
    /// Inscribed circle; corners become transparent.
    Circle,
}

impl CropShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropShape::Square => "square",
            CropShape::Circle => "circle",
        }
    }
}

impl fmt::Display for CropShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown crop shape: {0}")]
pub struct ParseShapeError(String);

impl FromStr for CropShape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(CropShape::Square),
            "circle" => Ok(CropShape::Circle),
            _ => Err(ParseShapeError(s.to_string())),
        }
    }
}
