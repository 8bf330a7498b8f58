//! The crop-session transform state.
//!
//! `CropState` is the single owner of scale, offset, viewport and crop-region
//! size. Fields are private; every mutating method re-establishes the two
//! invariants before returning:
//!
//! - `min_scale <= scale <= max_scale`
//! - the scaled image fully covers the on-screen crop rectangle
//!
//! Operations on a state without a usable viewport or image are no-ops.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::clamp::{clamp_offset, zoom_about};
use crate::config::CropperConfig;
use crate::geometry::{PixelRect, Rect, Size, Vec2};
use crate::CropShape;

/// Scale and offset at one instant, the unit the zoom animation interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub scale: f32,
    pub offset: Vec2,
}

impl TransformSnapshot {
    pub fn new(scale: f32, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Component-wise linear interpolation.
    pub fn lerp(self, target: TransformSnapshot, t: f32) -> TransformSnapshot {
        TransformSnapshot {
            scale: self.scale + (target.scale - self.scale) * t,
            offset: self.offset.lerp(target.offset, t),
        }
    }
}

/// Pan/zoom state of one avatar editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct CropState {
    shape: CropShape,
    scale: f32,
    offset: Vec2,
    container_size: Size,
    crop_size: f32,
    min_scale: f32,
    image_size: Size,
    config: CropperConfig,
}

impl Default for CropState {
    fn default() -> Self {
        Self::new(CropShape::default())
    }
}

impl CropState {
    /// Create an empty state with default tuning.
    pub fn new(shape: CropShape) -> Self {
        Self::with_config(shape, CropperConfig::default())
    }

    /// Create an empty state with custom tuning.
    ///
    /// A config that fails [`CropperConfig::validate`] is replaced by the
    /// defaults.
    pub fn with_config(shape: CropShape, config: CropperConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid cropper config ({}), using defaults", e);
                CropperConfig::default()
            }
        };
        Self {
            shape,
            scale: 1.0,
            offset: Vec2::ZERO,
            container_size: Size::ZERO,
            crop_size: 0.0,
            min_scale: 1.0,
            image_size: Size::ZERO,
            config,
        }
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn container_size(&self) -> Size {
        self.container_size
    }

    pub fn crop_size(&self) -> f32 {
        self.crop_size
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    /// Upper zoom bound. Never below `min_scale`, so tiny images stay coverable.
    pub fn max_scale(&self) -> f32 {
        self.config.max_scale.max(self.min_scale)
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot::new(self.scale, self.offset)
    }

    /// True once an image and a viewport have produced a non-empty crop rect.
    pub fn is_ready(&self) -> bool {
        self.image_size.is_positive() && !self.crop_rect_screen().is_empty()
    }

    /// Fit the image into the viewport and center it.
    ///
    /// Returns `false` and leaves the state untouched when either size has a
    /// zero or negative dimension.
    pub fn reset(&mut self, image_size: Size, container_size: Size) -> bool {
        if !image_size.is_positive() || !container_size.is_positive() {
            debug!(
                "Ignoring reset with degenerate sizes: image {:?}, viewport {:?}",
                image_size, container_size
            );
            return false;
        }

        let fit_scale = (container_size.width / image_size.width)
            .min(container_size.height / image_size.height)
            * self.config.fit_factor;
        if !(fit_scale.is_finite() && fit_scale > 0.0) {
            debug!("Ignoring reset with unusable fit scale {}", fit_scale);
            return false;
        }

        self.image_size = image_size;
        self.container_size = container_size;
        self.crop_size = image_size.min_dimension() * fit_scale;
        self.min_scale = fit_scale;
        self.scale = fit_scale;
        self.offset = self.centered_offset(fit_scale);

        debug!(
            "Reset crop state: image {}x{}, viewport {}x{}, scale {:.4}, crop size {:.2}",
            image_size.width,
            image_size.height,
            container_size.width,
            container_size.height,
            fit_scale,
            self.crop_size
        );
        true
    }

    /// Switch to a new source image, refitting if the viewport is known.
    pub fn set_image(&mut self, image_size: Size) -> bool {
        if !image_size.is_positive() {
            debug!("Ignoring degenerate image size {:?}", image_size);
            return false;
        }

        self.image_size = image_size;
        let container = self.container_size;
        if self.reset(image_size, container) {
            true
        } else {
            // Fit on the first usable viewport size instead.
            self.crop_size = 0.0;
            false
        }
    }

    /// Record a new viewport size.
    ///
    /// The first positive size after an image arrives performs the initial
    /// fit. Later resizes keep scale and crop size and only re-clamp the
    /// offset against the re-centered crop rect.
    pub fn resize_container(&mut self, size: Size) {
        if size == self.container_size {
            return;
        }
        self.container_size = size;

        if !size.is_positive() {
            return;
        }

        if self.crop_size <= 0.0 {
            if self.image_size.is_positive() {
                self.reset(self.image_size, size);
            }
            return;
        }

        self.offset = self.clamped(self.offset, self.scale);
    }

    /// The crop square on screen, centered in the viewport.
    ///
    /// Empty when the viewport or the crop size is zero, meaning nothing can
    /// be cropped yet.
    pub fn crop_rect_screen(&self) -> Rect {
        if !self.container_size.is_positive() || self.crop_size <= 0.0 {
            return Rect::ZERO;
        }
        Rect::square_around(self.container_size.center(), self.crop_size)
    }

    /// Change the crop shape and re-establish the coverage constraints.
    pub fn update_shape(&mut self, shape: CropShape) {
        if shape != self.shape {
            debug!("Crop shape changed: {:?} -> {:?}", self.shape, shape);
        }
        self.shape = shape;

        if self.crop_size <= 0.0 || !self.image_size.is_positive() {
            return;
        }

        self.min_scale = (self.crop_size / self.image_size.width)
            .max(self.crop_size / self.image_size.height);
        if self.scale < self.min_scale {
            self.scale = self.min_scale;
        }
        self.offset = self.clamped(self.offset, self.scale);
    }

    /// Zoom by `factor` around the screen point `pivot`.
    pub fn apply_zoom(&mut self, pivot: Vec2, factor: f32) {
        self.apply_transform(pivot, Vec2::ZERO, factor);
    }

    /// Translate the image by a screen-space delta.
    pub fn apply_pan(&mut self, delta: Vec2) {
        if !self.is_ready() || !delta.is_finite() {
            return;
        }
        self.offset = self.clamped(self.offset + delta, self.scale);
    }

    /// Combined pinch update: zoom about `centroid`, then add `pan`, then clamp.
    pub fn apply_transform(&mut self, centroid: Vec2, pan: Vec2, zoom: f32) {
        if !self.is_ready() || !centroid.is_finite() || !pan.is_finite() {
            return;
        }
        if !(zoom.is_finite() && zoom > 0.0) {
            return;
        }

        let old_scale = self.scale;
        let new_scale = (old_scale * zoom).clamp(self.min_scale, self.max_scale());
        let proposed = zoom_about(centroid, self.offset, old_scale, new_scale) + pan;

        self.scale = new_scale;
        self.offset = self.clamped(proposed, new_scale);
    }

    /// Overwrite scale and offset, clamping both into the valid range.
    pub fn set_transform(&mut self, transform: TransformSnapshot) {
        if !self.is_ready() || transform.scale.is_nan() || !transform.offset.is_finite() {
            return;
        }
        let scale = transform.scale.clamp(self.min_scale, self.max_scale());
        self.scale = scale;
        self.offset = self.clamped(transform.offset, scale);
    }

    /// Where a double tap at `tap` should take the view.
    ///
    /// Zoomed in past the threshold: back to `min_scale`, re-centered.
    /// Otherwise: zoom to `min_scale * double_tap_zoom` about the tap point.
    pub fn double_tap_target(&self, tap: Vec2) -> Option<TransformSnapshot> {
        if !self.is_ready() || !tap.is_finite() {
            return None;
        }

        let config = &self.config;
        if self.scale > self.min_scale * config.double_tap_threshold {
            let scale = self.min_scale;
            let offset = self.clamped(self.centered_offset(scale), scale);
            return Some(TransformSnapshot::new(scale, offset));
        }

        let scale = (self.min_scale * config.double_tap_zoom)
            .max(config.double_tap_floor)
            .min(config.max_scale)
            .max(self.min_scale);
        let offset = self.clamped(zoom_about(tap, self.offset, self.scale, scale), scale);
        Some(TransformSnapshot::new(scale, offset))
    }

    /// Map a screen point into source-image pixel coordinates.
    pub fn screen_to_image(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale
    }

    /// Map a source-image pixel coordinate onto the screen.
    pub fn image_to_screen(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.offset
    }

    /// The displayed image bounds on screen.
    pub fn image_rect_screen(&self) -> Rect {
        let top_left = self.image_to_screen(Vec2::ZERO);
        let bottom_right =
            self.image_to_screen(Vec2::new(self.image_size.width, self.image_size.height));
        Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// The crop rect expressed in source-image coordinates.
    pub fn crop_rect_image(&self) -> Rect {
        let screen = self.crop_rect_screen();
        if screen.is_empty() {
            return Rect::ZERO;
        }
        let top_left = self.screen_to_image(screen.top_left());
        let bottom_right = self.screen_to_image(screen.bottom_right());
        Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// The crop rect in image space, rounded to whole pixels (not yet clamped
    /// to the image bounds).
    pub fn crop_pixel_rect(&self) -> Option<PixelRect> {
        if self.crop_rect_screen().is_empty() {
            return None;
        }
        Some(self.crop_rect_image().round())
    }

    fn centered_offset(&self, scale: f32) -> Vec2 {
        Vec2::new(
            (self.container_size.width - self.image_size.width * scale) / 2.0,
            (self.container_size.height - self.image_size.height * scale) / 2.0,
        )
    }

    fn clamped(&self, proposed: Vec2, scale: f32) -> Vec2 {
        clamp_offset(proposed, scale, self.crop_rect_screen(), self.image_size)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
