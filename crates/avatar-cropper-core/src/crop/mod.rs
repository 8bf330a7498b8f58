//! Crop executor: cut the avatar out of the source pixels.
//!
//! The executor reads the current [`CropState`], maps the on-screen crop
//! square into image space, and copies those pixels verbatim (no
//! resampling). Circle crops are then masked with an anti-aliased
//! inscribed circle.
//!
//! # Example
//!
//! ```ignore
//! let mut state = CropState::new(CropShape::Circle);
//! state.reset(Size::from_pixels(image.width, image.height), Size::new(400.0, 400.0));
//! let avatar = crop(&image, &state, state.shape())?;
//! ```

mod buffer;
mod mask;

pub use buffer::PixelBuffer;
pub use mask::{apply_circle_mask, CircleMask};

use log::warn;
use thiserror::Error;

use crate::config::DegenerateCropPolicy;
use crate::geometry::PixelRect;
use crate::transform::CropState;
use crate::CropShape;

/// Why a crop produced no image.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CropError {
    /// The viewport or the crop square has no area yet.
    #[error("viewport or crop region has zero size")]
    DegenerateViewport,

    /// The crop square does not overlap the image.
    #[error("crop region is empty after clamping to the image ({width}x{height})")]
    EmptyCropRegion { width: i32, height: i32 },
}

/// Crop `image` according to the transform in `state`.
///
/// # Errors
///
/// - `CropError::DegenerateViewport` if the state has no usable viewport or
///   crop square
/// - `CropError::EmptyCropRegion` if the mapped region misses the image
pub fn crop<B: PixelBuffer>(image: &B, state: &CropState, shape: CropShape) -> Result<B, CropError> {
    if !state.container_size().is_positive() {
        return Err(CropError::DegenerateViewport);
    }
    let region = state.crop_pixel_rect().ok_or(CropError::DegenerateViewport)?;

    crop_region(image, region, shape)
}

/// Crop a region given directly in image pixel coordinates.
///
/// The region is clamped to the image bounds first.
pub fn crop_region<B: PixelBuffer>(
    image: &B,
    region: PixelRect,
    shape: CropShape,
) -> Result<B, CropError> {
    let clamped = region.clamp_to(image.width(), image.height());
    if clamped.is_empty() {
        warn!(
            "Crop region {:?} does not intersect the {}x{} image",
            region,
            image.width(),
            image.height()
        );
        return Err(CropError::EmptyCropRegion {
            width: clamped.width(),
            height: clamped.height(),
        });
    }

    // Non-empty and inside the image, so every edge is non-negative.
    let extracted = image.sub_rect(
        clamped.left as u32,
        clamped.top as u32,
        clamped.width() as u32,
        clamped.height() as u32,
    );

    Ok(match shape {
        CropShape::Square => extracted,
        CropShape::Circle => apply_circle_mask(&extracted),
    })
}

/// Apply a [`DegenerateCropPolicy`] to a crop result.
///
/// With `Placeholder`, an empty crop region becomes a 1x1 transparent image.
/// A degenerate viewport is always an error.
pub fn resolve_degenerate<B: PixelBuffer>(
    result: Result<B, CropError>,
    policy: DegenerateCropPolicy,
) -> Result<B, CropError> {
    match (result, policy) {
        (Err(CropError::EmptyCropRegion { .. }), DegenerateCropPolicy::Placeholder) => {
            Ok(B::allocate(1, 1))
        }
        (result, _) => result,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
