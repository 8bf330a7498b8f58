//! Viewport transform for the crop session: pan, zoom and clamping.
//!
//! # Coordinate System
//!
//! - `offset` is the screen position of the image's top-left pixel
//! - `scale` is uniform; one image pixel covers `scale` screen units
//! - screen → image: `(p - offset) / scale`
//! - image → screen: `p * scale + offset`
//!
//! # Clamping
//!
//! Every operation computes its unclamped result first and clamps last, so
//! the math in between stays linear.

mod clamp;
mod state;

pub use clamp::{clamp_offset, zoom_about};
pub use state::{CropState, TransformSnapshot};
