//! Crop session WASM bindings.
//!
//! The page owns the pointer listeners and the `requestAnimationFrame`
//! loop; this wrapper owns the transform. A typical frame loop:
//!
//! ```typescript
//! const session = new JsCropSession('circle');
//! session.resize(canvas.width, canvas.height);
//! session.load_image(image.width, image.height);
//!
//! canvas.ondblclick = (e) => {
//!   if (session.on_double_tap(e.offsetX, e.offsetY)) {
//!     let last = performance.now();
//!     const step = (now: number) => {
//!       const running = session.tick(now - last);
//!       last = now;
//!       draw(session);
//!       if (running) requestAnimationFrame(step);
//!     };
//!     requestAnimationFrame(step);
//!   }
//! };
//! ```

use std::time::Duration;

use avatar_cropper_core::{
    CropSession, CropShape, CropperConfig, Rect, Size, TransformSnapshot, Vec2,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Plain-data view of the session for rendering.
#[derive(Debug, Serialize)]
struct SessionView {
    transform: TransformSnapshot,
    min_scale: f32,
    max_scale: f32,
    crop_rect: Rect,
    image_rect: Rect,
    shape: CropShape,
    animating: bool,
}

fn parse_shape(shape: &str) -> Result<CropShape, JsValue> {
    shape
        .parse::<CropShape>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a frame delta in milliseconds. Negative and NaN deltas count as
/// zero; deltas too large for a `Duration` (including `Infinity`) saturate.
fn frame_delta(dt_ms: f64) -> Duration {
    Duration::try_from_secs_f64(dt_ms.max(0.0) / 1000.0).unwrap_or(Duration::MAX)
}

/// An avatar crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session with default tuning.
    ///
    /// # Arguments
    /// * `shape` - `"square"` or `"circle"`
    #[wasm_bindgen(constructor)]
    pub fn new(shape: &str) -> Result<JsCropSession, JsValue> {
        Ok(Self {
            inner: CropSession::new(parse_shape(shape)?),
        })
    }

    /// Create a session with custom tuning.
    ///
    /// # Arguments
    /// * `config` - Object with any of the `CropperConfig` fields, e.g.
    ///   `{ max_scale: 8, degenerate_crop: 'placeholder' }`
    ///
    /// # Errors
    /// Returns error if the config cannot be deserialized or is invalid
    pub fn with_config(shape: &str, config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: CropperConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner: CropSession::with_config(parse_shape(shape)?, config),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.inner.state().scale()
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f32 {
        self.inner.state().offset().x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f32 {
        self.inner.state().offset().y
    }

    #[wasm_bindgen(getter)]
    pub fn min_scale(&self) -> f32 {
        self.inner.state().min_scale()
    }

    #[wasm_bindgen(getter)]
    pub fn max_scale(&self) -> f32 {
        self.inner.state().max_scale()
    }

    /// Side length of the crop square in screen units.
    #[wasm_bindgen(getter)]
    pub fn crop_size(&self) -> f32 {
        self.inner.state().crop_size()
    }

    #[wasm_bindgen(getter)]
    pub fn is_ready(&self) -> bool {
        self.inner.state().is_ready()
    }

    #[wasm_bindgen(getter)]
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> String {
        self.inner.shape().to_string()
    }

    /// Snapshot of transform, bounds and crop rectangle as a plain object.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        let state = self.inner.state();
        let view = SessionView {
            transform: state.snapshot(),
            min_scale: state.min_scale(),
            max_scale: state.max_scale(),
            crop_rect: state.crop_rect_screen(),
            image_rect: state.image_rect_screen(),
            shape: state.shape(),
            animating: self.inner.is_animating(),
        };
        serde_wasm_bindgen::to_value(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Supply the dimensions of a newly decoded image.
    pub fn load_image(&mut self, width: u32, height: u32) -> bool {
        self.inner.load_image(width, height)
    }

    /// Report the canvas size after layout.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(Size::new(width, height));
    }

    pub fn set_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        self.inner.set_shape(parse_shape(shape)?);
        Ok(())
    }

    pub fn reset(&mut self) -> bool {
        self.inner.reset()
    }

    /// One frame of a two-finger gesture.
    pub fn on_transform(&mut self, centroid_x: f32, centroid_y: f32, pan_x: f32, pan_y: f32, zoom: f32) {
        self.inner.pinch(
            Vec2::new(centroid_x, centroid_y),
            Vec2::new(pan_x, pan_y),
            zoom,
        );
    }

    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        self.inner.drag(Vec2::new(dx, dy));
    }

    /// Wheel event; pass `WheelEvent.deltaY` as `delta_y`.
    pub fn on_scroll(&mut self, x: f32, y: f32, delta_x: f32, delta_y: f32) {
        self.inner
            .scroll(Vec2::new(x, y), Vec2::new(delta_x, delta_y));
    }

    /// Returns true if an animation started; drive it with `tick`.
    pub fn on_double_tap(&mut self, x: f32, y: f32) -> bool {
        self.inner.double_tap(Vec2::new(x, y)).is_some()
    }

    /// Advance the animation by `dt_ms` milliseconds. Returns true while it
    /// is still running.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.inner.tick(frame_delta(dt_ms)).is_running()
    }

    pub fn cancel_animation(&mut self) {
        self.inner.cancel_animation();
    }

    /// Cut the avatar out of `image` with the current transform.
    ///
    /// # Errors
    /// Returns error if the session is not ready or the crop misses the image
    pub fn crop(&self, image: &JsDecodedImage) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .crop(&image.to_decoded())
            .map(JsDecodedImage::from_decoded)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_cropper_core::DecodedImage;

    fn ready_session() -> JsCropSession {
        let mut session = JsCropSession::new("circle").unwrap();
        session.resize(400.0, 400.0);
        assert!(session.load_image(1000, 500));
        session
    }

    #[test]
    fn test_new_session_is_not_ready() {
        let session = JsCropSession::new("square").unwrap();
        assert!(!session.is_ready());
        assert_eq!(session.shape(), "square");
    }

    #[test]
    fn test_ready_session_fits_image() {
        let session = ready_session();
        assert!(session.is_ready());
        assert!((session.min_scale() - 0.36).abs() < 1e-5);
        assert!((session.crop_size() - 180.0).abs() < 1e-3);
        assert!((session.offset_x() - 20.0).abs() < 1e-3);
        assert!((session.offset_y() - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_double_tap_runs_to_completion() {
        let mut session = ready_session();
        assert!(session.on_double_tap(200.0, 200.0));
        assert!(session.is_animating());

        let mut frames = 0;
        while session.tick(16.0) {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(!session.is_animating());
        assert!((session.scale() - 1.08).abs() < 1e-4);
    }

    #[test]
    fn test_frame_delta_saturates() {
        assert_eq!(frame_delta(16.0), Duration::from_millis(16));
        assert_eq!(frame_delta(-5.0), Duration::ZERO);
        assert_eq!(frame_delta(f64::NAN), Duration::ZERO);
        assert_eq!(frame_delta(f64::INFINITY), Duration::MAX);
        assert_eq!(frame_delta(f64::MAX), Duration::MAX);
    }

    #[test]
    fn test_infinite_tick_finishes_animation() {
        let mut session = ready_session();
        assert!(session.on_double_tap(200.0, 200.0));

        assert!(!session.tick(f64::INFINITY));
        assert!(!session.is_animating());
        assert!((session.scale() - 1.08).abs() < 1e-4);
    }

    #[test]
    fn test_drag_cancels_animation() {
        let mut session = ready_session();
        session.on_double_tap(200.0, 200.0);
        session.tick(50.0);
        session.on_drag(1.0, 1.0);
        assert!(!session.is_animating());
    }

    #[test]
    fn test_scroll_zooms() {
        let mut session = ready_session();
        session.on_scroll(200.0, 200.0, 0.0, -100.0);
        assert!((session.scale() - 0.36 * 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_crop_returns_rgba_square() {
        let mut session = JsCropSession::new("square").unwrap();
        session.resize(100.0, 100.0);
        session.load_image(40, 20);
        let image = JsDecodedImage::from_decoded(DecodedImage::filled(40, 20, [9, 9, 9, 255]));

        let avatar = session.crop(&image).unwrap();
        assert_eq!((avatar.width(), avatar.height()), (20, 20));
        assert_eq!(avatar.byte_length(), 20 * 20 * 4);
    }
}
