//! Tuning constants for a crop session.
//!
//! Every field has a default matching the stock widget behavior, and
//! `#[serde(default)]` lets hosts override only the values they care about.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by [`CropperConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be a positive, finite number is not.
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// The fit factor must leave the image inside the viewport.
    #[error("fit_factor must be in (0, 1], got {0}")]
    FitFactorOutOfRange(f32),

    /// Zoom steps must actually zoom.
    #[error("{field} must be greater than 1, got {value}")]
    StepTooSmall { field: &'static str, value: f32 },
}

/// What the crop executor hands back when the crop region misses the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateCropPolicy {
    /// Report `CropError::EmptyCropRegion`.
    #[default]
    Error,
    /// Return a 1x1 fully transparent image.
    Placeholder,
}

/// Tuning for the transform core, the gesture interpreter and the crop executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Fraction of the viewport the image occupies after a reset.
    pub fit_factor: f32,
    /// Upper zoom bound.
    pub max_scale: f32,
    /// Double-tap zooms out when `scale > min_scale * double_tap_threshold`.
    pub double_tap_threshold: f32,
    /// Double-tap zoom-in target, as a multiple of `min_scale`.
    pub double_tap_zoom: f32,
    /// Lower bound applied to the double-tap zoom-in target.
    pub double_tap_floor: f32,
    /// Zoom factor of one scroll-wheel notch.
    pub scroll_zoom_step: f32,
    /// Duration of the double-tap interpolation in milliseconds.
    pub animation_duration_ms: u64,
    /// Output when the crop region does not intersect the image.
    pub degenerate_crop: DegenerateCropPolicy,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            fit_factor: 0.9,
            max_scale: 10.0,
            double_tap_threshold: 1.5,
            double_tap_zoom: 3.0,
            double_tap_floor: 0.1,
            scroll_zoom_step: 1.1,
            animation_duration_ms: 300,
            degenerate_crop: DegenerateCropPolicy::Error,
        }
    }
}

impl CropperConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Check that every value can be used by the transform math.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fit_factor > 0.0 && self.fit_factor <= 1.0) {
            return Err(ConfigError::FitFactorOutOfRange(self.fit_factor));
        }

        for (field, value) in [
            ("max_scale", self.max_scale),
            ("double_tap_threshold", self.double_tap_threshold),
            ("double_tap_zoom", self.double_tap_zoom),
            ("double_tap_floor", self.double_tap_floor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if !(self.scroll_zoom_step.is_finite() && self.scroll_zoom_step > 1.0) {
            return Err(ConfigError::StepTooSmall {
                field: "scroll_zoom_step",
                value: self.scroll_zoom_step,
            });
        }

        Ok(())
    }
}
