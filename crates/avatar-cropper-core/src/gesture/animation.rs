//! Double-tap zoom animation.
//!
//! A [`ZoomAnimation`] is a time-boxed linear interpolation between two
//! [`TransformSnapshot`]s. It owns no timer: the host scheduler advances it
//! with the frame delta, and the session drops it to cancel.

use std::time::Duration;

use crate::transform::TransformSnapshot;

/// Identifies one started animation, so a host can tell whether the task it
/// scheduled is still the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Result of advancing the session's animation by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationStatus {
    /// No animation is in flight.
    Idle,
    /// The animation moved to this transform and continues.
    Running(TransformSnapshot),
    /// The animation reached its target on this tick and was removed.
    Finished(TransformSnapshot),
}

impl AnimationStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, AnimationStatus::Running(_))
    }
}

/// Linear interpolation of scale and offset over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimation {
    handle: AnimationHandle,
    from: TransformSnapshot,
    to: TransformSnapshot,
    duration: Duration,
    elapsed: Duration,
}

impl ZoomAnimation {
    pub fn new(
        handle: AnimationHandle,
        from: TransformSnapshot,
        to: TransformSnapshot,
        duration: Duration,
    ) -> Self {
        Self {
            handle,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle
    }

    pub fn target(&self) -> TransformSnapshot {
        self.to
    }

    /// Fraction of the duration elapsed, 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Move time forward and return the interpolated transform.
    pub fn advance(&mut self, dt: Duration) -> TransformSnapshot {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.is_finished() {
            // Land exactly on the target, free of interpolation error
            return self.to;
        }
        self.from.lerp(self.to, self.progress())
    }
}
