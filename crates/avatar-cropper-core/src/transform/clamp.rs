//! Offset clamping and pivot-preserving zoom math.
//!
//! These are free functions so the transform state, the double-tap target
//! computation and the tests all share exactly the same arithmetic.

use crate::geometry::{Rect, Size, Vec2};

/// Clamp a proposed image offset so the scaled image covers `crop_rect`.
///
/// For each axis, with displayed size `d = image_dim * scale`:
///
/// - the image's near edge may not move past the crop rect's near edge
///   (`offset <= crop.near`)
/// - the image's far edge may not recede inside the crop rect's far edge
///   (`offset >= crop.far - d`)
///
/// When the image is smaller than the crop rect on an axis, the lower bound
/// collapses onto the upper one so the result is still well defined.
///
/// An empty `crop_rect` leaves the proposal untouched.
pub fn clamp_offset(proposed: Vec2, scale: f32, crop_rect: Rect, image_size: Size) -> Vec2 {
    if crop_rect.is_empty() {
        return proposed;
    }

    Vec2::new(
        clamp_axis(
            proposed.x,
            crop_rect.left,
            crop_rect.right,
            image_size.width * scale,
        ),
        clamp_axis(
            proposed.y,
            crop_rect.top,
            crop_rect.bottom,
            image_size.height * scale,
        ),
    )
}

#[inline]
fn clamp_axis(value: f32, near: f32, far: f32, displayed: f32) -> f32 {
    let max = near;
    if max.is_nan() {
        return value;
    }
    let min = far - displayed;
    let min = if min.is_nan() || min > max { max } else { min };
    if value.is_nan() {
        return max;
    }
    value.clamp(min, max)
}

/// Offset that keeps the image point under `pivot` fixed while the scale
/// changes from `old_scale` to `new_scale`.
#[inline]
pub fn zoom_about(pivot: Vec2, offset: Vec2, old_scale: f32, new_scale: f32) -> Vec2 {
    pivot - (pivot - offset) / old_scale * new_scale
}


// ============================================================================
// Property-Based Tests
// ============================================================================
