//! Gesture interpreter: turns pointer input into transform updates.
//!
//! A [`CropSession`] wraps one [`CropState`] together with the double-tap
//! animation slot. Hosts forward already-recognized gestures (pinch, drag,
//! scroll, double tap) and drive the animation from their frame scheduler
//! with [`CropSession::tick`].
//!
//! # Cancel before mutate
//!
//! Every method that changes the transform first drops any in-flight
//! animation, so the animation and a gesture never both write to scale and
//! offset. The interrupted animation leaves the state wherever its last
//! tick put it, and the new gesture starts from there.

mod animation;

pub use animation::{AnimationHandle, AnimationStatus, ZoomAnimation};

use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::CropperConfig;
use crate::crop::{crop, resolve_degenerate, CropError, PixelBuffer};
use crate::geometry::{Size, Vec2};
use crate::transform::CropState;
use crate::CropShape;

/// A recognized input gesture in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// One frame of a multi-touch transform: pinch about `centroid` by
    /// `zoom` and translate by `pan`.
    Transform { centroid: Vec2, pan: Vec2, zoom: f32 },
    /// Single-pointer drag.
    Drag { delta: Vec2 },
    /// Mouse wheel or trackpad scroll at `position`.
    Scroll { position: Vec2, delta: Vec2 },
    /// Double tap or double click.
    DoubleTap { position: Vec2 },
}

/// One avatar editing session.
#[derive(Debug, Clone)]
pub struct CropSession {
    state: CropState,
    animation: Option<ZoomAnimation>,
    next_animation_id: u64,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::new(CropShape::default())
    }
}

impl CropSession {
    pub fn new(shape: CropShape) -> Self {
        Self::with_config(shape, CropperConfig::default())
    }

    pub fn with_config(shape: CropShape, config: CropperConfig) -> Self {
        Self {
            state: CropState::with_config(shape, config),
            animation: None,
            next_animation_id: 0,
        }
    }

    pub fn state(&self) -> &CropState {
        &self.state
    }

    pub fn shape(&self) -> CropShape {
        self.state.shape()
    }

    /// Supply a new source image; the view is refit if the viewport is known.
    pub fn load_image(&mut self, width: u32, height: u32) -> bool {
        self.cancel_animation();
        self.state.set_image(Size::from_pixels(width, height))
    }

    /// The host's layout pass reported a new viewport size.
    pub fn resize(&mut self, size: Size) {
        self.cancel_animation();
        self.state.resize_container(size);
    }

    pub fn set_shape(&mut self, shape: CropShape) {
        self.cancel_animation();
        self.state.update_shape(shape);
    }

    /// Refit the current image into the current viewport.
    pub fn reset(&mut self) -> bool {
        self.cancel_animation();
        let (image, container) = (self.state.image_size(), self.state.container_size());
        self.state.reset(image, container)
    }

    /// Dispatch a gesture. Returns the animation handle when the gesture
    /// started one.
    pub fn handle(&mut self, event: GestureEvent) -> Option<AnimationHandle> {
        match event {
            GestureEvent::Transform {
                centroid,
                pan,
                zoom,
            } => {
                self.pinch(centroid, pan, zoom);
                None
            }
            GestureEvent::Drag { delta } => {
                self.drag(delta);
                None
            }
            GestureEvent::Scroll { position, delta } => {
                self.scroll(position, delta);
                None
            }
            GestureEvent::DoubleTap { position } => self.double_tap(position),
        }
    }

    pub fn pinch(&mut self, centroid: Vec2, pan: Vec2, zoom: f32) {
        self.cancel_animation();
        self.state.apply_transform(centroid, pan, zoom);
        trace!(
            "Pinch -> scale {:.4}, offset {:?}",
            self.state.scale(),
            self.state.offset()
        );
    }

    pub fn drag(&mut self, delta: Vec2) {
        self.cancel_animation();
        self.state.apply_pan(delta);
    }

    /// Wheel zoom about the pointer: scrolling up zooms in one step, down
    /// zooms out one step. A purely horizontal scroll (`delta.y == 0`) is
    /// ignored rather than treated as a zoom-out.
    pub fn scroll(&mut self, position: Vec2, delta: Vec2) {
        if delta.y == 0.0 || delta.y.is_nan() {
            return;
        }
        self.cancel_animation();

        let step = self.state.config().scroll_zoom_step;
        let factor = if delta.y < 0.0 { step } else { 1.0 / step };
        self.state.apply_zoom(position, factor);
    }

    /// Toggle between the fitted view and a close-up around `position`.
    ///
    /// Returns `None` (and changes nothing) when the session is not ready.
    pub fn double_tap(&mut self, position: Vec2) -> Option<AnimationHandle> {
        self.cancel_animation();

        let target = self.state.double_tap_target(position)?;
        let from = self.state.snapshot();
        let duration = self.state.config().animation_duration();

        self.next_animation_id += 1;
        let handle = AnimationHandle::new(self.next_animation_id);
        debug!(
            "Double tap at ({:.1}, {:.1}): animating scale {:.4} -> {:.4} over {:?}",
            position.x, position.y, from.scale, target.scale, duration
        );

        self.animation = Some(ZoomAnimation::new(handle, from, target, duration));
        Some(handle)
    }

    /// Advance the in-flight animation by `dt` and apply it to the state.
    pub fn tick(&mut self, dt: Duration) -> AnimationStatus {
        let Some(animation) = self.animation.as_mut() else {
            return AnimationStatus::Idle;
        };

        let step = animation.advance(dt);
        let finished = animation.is_finished();
        self.state.set_transform(step);

        if finished {
            self.animation = None;
            AnimationStatus::Finished(self.state.snapshot())
        } else {
            AnimationStatus::Running(self.state.snapshot())
        }
    }

    /// Stop the in-flight animation where it is.
    pub fn cancel_animation(&mut self) -> Option<AnimationHandle> {
        let cancelled = self.animation.take().map(|a| a.handle());
        if let Some(handle) = cancelled {
            trace!("Cancelled animation {}", handle.id());
        }
        cancelled
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether `handle` still refers to the running animation. Host timers
    /// check this to stop themselves once cancelled.
    pub fn is_current(&self, handle: AnimationHandle) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|a| a.handle() == handle)
    }

    /// Crop `image` with the session's current transform and shape.
    pub fn crop<B: PixelBuffer>(&self, image: &B) -> Result<B, CropError> {
        let result = crop(image, &self.state, self.state.shape());
        resolve_degenerate(result, self.state.config().degenerate_crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DegenerateCropPolicy;
    use crate::decode::DecodedImage;

    const FRAME: Duration = Duration::from_millis(16);

    fn ready_session() -> CropSession {
        let mut session = CropSession::new(CropShape::Circle);
        session.load_image(1000, 500);
        session.resize(Size::new(400.0, 400.0));
        assert!(session.state().is_ready());
        session
    }

    fn run_to_end(session: &mut CropSession) -> AnimationStatus {
        for _ in 0..1000 {
            let status = session.tick(FRAME);
            if !status.is_running() {
                return status;
            }
        }
        panic!("animation never finished");
    }

    #[test]
    fn test_image_then_viewport_initializes() {
        let session = ready_session();
        assert!((session.state().crop_size() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_then_image_initializes() {
        let mut session = CropSession::default();
        session.resize(Size::new(400.0, 400.0));
        assert!(session.load_image(1000, 500));
        assert!(session.state().is_ready());
    }

    #[test]
    fn test_scroll_up_zooms_in() {
        let mut session = ready_session();
        let before = session.state().scale();

        session.scroll(Vec2::new(200.0, 200.0), Vec2::new(0.0, -1.0));
        assert!((session.state().scale() - before * 1.1).abs() < 1e-5);

        session.scroll(Vec2::new(200.0, 200.0), Vec2::new(0.0, 3.0));
        assert!((session.state().scale() - before).abs() < 1e-5);
    }

    #[test]
    fn test_horizontal_scroll_is_ignored() {
        let mut session = ready_session();
        let before = session.state().clone();
        session.scroll(Vec2::new(200.0, 200.0), Vec2::new(5.0, 0.0));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_double_tap_zoom_in_animates_to_target() {
        let mut session = ready_session();
        let min = session.state().min_scale();

        let handle = session
            .handle(GestureEvent::DoubleTap {
                position: Vec2::new(200.0, 200.0),
            })
            .unwrap();
        assert!(session.is_current(handle));

        let first = session.tick(Duration::from_millis(150));
        match first {
            AnimationStatus::Running(snapshot) => {
                assert!((snapshot.scale - min * 2.0).abs() < 1e-4, "halfway is 2x min");
            }
            other => panic!("expected running animation, got {:?}", other),
        }

        match run_to_end(&mut session) {
            AnimationStatus::Finished(snapshot) => {
                assert!((snapshot.scale - min * 3.0).abs() < 1e-4);
            }
            other => panic!("expected finished animation, got {:?}", other),
        }
        assert!(!session.is_animating());
        assert!(!session.is_current(handle));
        assert_eq!(session.tick(FRAME), AnimationStatus::Idle);
    }

    #[test]
    fn test_double_tap_toggles_back() {
        let mut session = ready_session();
        session.double_tap(Vec2::new(150.0, 150.0));
        run_to_end(&mut session);
        assert!(session.state().scale() > session.state().min_scale() * 1.5);

        session.double_tap(Vec2::new(150.0, 150.0));
        run_to_end(&mut session);

        assert_eq!(session.state().scale(), session.state().min_scale());
        assert!((session.state().offset().x - 20.0).abs() < 1e-3);
        assert!((session.state().offset().y - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_gesture_cancels_animation_mid_flight() {
        let mut session = ready_session();
        let handle = session.double_tap(Vec2::new(200.0, 200.0)).unwrap();
        session.tick(Duration::from_millis(100));
        let mid_scale = session.state().scale();

        session.drag(Vec2::new(5.0, 0.0));

        assert!(!session.is_animating());
        assert!(!session.is_current(handle));
        assert_eq!(session.state().scale(), mid_scale);
        assert_eq!(session.tick(FRAME), AnimationStatus::Idle);
    }

    #[test]
    fn test_second_double_tap_replaces_first() {
        let mut session = ready_session();
        let first = session.double_tap(Vec2::new(200.0, 200.0)).unwrap();
        session.tick(Duration::from_millis(50));
        let second = session.double_tap(Vec2::new(200.0, 200.0)).unwrap();

        assert_ne!(first, second);
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[test]
    fn test_animation_keeps_invariants_every_tick() {
        let mut session = ready_session();
        session.pinch(Vec2::new(120.0, 300.0), Vec2::new(-40.0, 25.0), 3.5);
        session.double_tap(Vec2::new(250.0, 180.0));

        while session.tick(FRAME).is_running() {
            let state = session.state();
            assert!(state.scale() >= state.min_scale());
            assert!(state
                .image_rect_screen()
                .covers(&state.crop_rect_screen(), 1e-2));
        }
    }

    #[test]
    fn test_double_tap_before_ready_is_ignored() {
        let mut session = CropSession::default();
        assert!(session.double_tap(Vec2::new(10.0, 10.0)).is_none());
        assert!(!session.is_animating());
    }

    #[test]
    fn test_handle_dispatches_transform_and_drag() {
        let mut session = ready_session();
        let min = session.state().min_scale();

        session.handle(GestureEvent::Transform {
            centroid: Vec2::new(200.0, 200.0),
            pan: Vec2::ZERO,
            zoom: 2.0,
        });
        assert!((session.state().scale() - min * 2.0).abs() < 1e-5);

        let offset = session.state().offset();
        session.handle(GestureEvent::Drag {
            delta: Vec2::new(-10.0, 0.0),
        });
        assert!((session.state().offset().x - (offset.x - 10.0)).abs() < 1e-3);
    }

    #[test]
    fn test_crop_uses_session_shape() {
        let mut session = CropSession::new(CropShape::Square);
        session.resize(Size::new(100.0, 100.0));
        session.load_image(100, 100);
        let img = DecodedImage::filled(100, 100, [5, 5, 5, 255]);

        let square = session.crop(&img).unwrap();
        assert_eq!(square.pixels[3], 255);

        session.set_shape(CropShape::Circle);
        let circle = session.crop(&img).unwrap();
        assert_eq!(circle.pixels[3], 0);
    }

    #[test]
    fn test_crop_before_ready_fails() {
        let session = CropSession::default();
        let img = DecodedImage::filled(10, 10, [0, 0, 0, 255]);
        assert_eq!(session.crop(&img), Err(CropError::DegenerateViewport));
    }

    #[test]
    fn test_invalid_config_session_stays_usable() {
        let mut config = CropperConfig::default();
        config.fit_factor = f32::INFINITY;
        let mut session = CropSession::with_config(CropShape::Circle, config);
        session.resize(Size::new(400.0, 400.0));
        session.load_image(1000, 500);

        assert!((session.state().min_scale() - 0.36).abs() < 1e-5);
        session.scroll(Vec2::new(200.0, 200.0), Vec2::new(0.0, -1.0));
        assert!(session.state().scale().is_finite());
    }

    #[test]
    fn test_placeholder_policy_applies_to_session_crop() {
        let mut config = CropperConfig::default();
        config.degenerate_crop = DegenerateCropPolicy::Placeholder;
        let mut session = CropSession::with_config(CropShape::Square, config);
        session.resize(Size::new(400.0, 400.0));
        session.load_image(1000, 500);

        // The session believes the image is 1000x500; hand it a tiny one
        let tiny = DecodedImage::filled(10, 10, [1, 1, 1, 255]);
        let result = session.crop(&tiny).unwrap();
        assert_eq!((result.width, result.height), (1, 1));
        assert_eq!(result.pixels, vec![0, 0, 0, 0]);
    }
}
