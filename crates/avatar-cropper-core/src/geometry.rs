//! Plain 2D geometry used by the crop state and the crop executor.
//!
//! # Coordinate System
//!
//! - Screen space: logical viewport units, origin at the top-left of the container
//! - Image space: source pixels, origin at the top-left of the image
//! - Y grows downwards in both spaces

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point, offset or delta in 2D.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`.
    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Width and height of a viewport or an image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size of a pixel buffer.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// True when both dimensions are strictly positive (and not NaN).
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned float rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of side `side` centered on `center`.
    pub fn square_around(center: Vec2, side: f32) -> Self {
        let half = side / 2.0;
        Self::new(center.x - half, center.y - half, center.x + half, center.y + half)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// A rectangle with no area cannot be cropped from.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when `other` lies entirely inside `self`, allowing `tolerance` of slack.
    pub fn covers(&self, other: &Rect, tolerance: f32) -> bool {
        self.left <= other.left + tolerance
            && self.top <= other.top + tolerance
            && self.right >= other.right - tolerance
            && self.bottom >= other.bottom - tolerance
    }

    /// Round each edge to the nearest integer pixel.
    pub fn round(&self) -> PixelRect {
        PixelRect::new(
            self.left.round() as i32,
            self.top.round() as i32,
            self.right.round() as i32,
            self.bottom.round() as i32,
        )
    }
}

/// Integer rectangle in image pixel space, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Intersect with `[0, width] x [0, height]`.
    ///
    /// The result may be empty (or inverted) when the rectangle lies
    /// completely outside the bounds.
    pub fn clamp_to(&self, width: u32, height: u32) -> PixelRect {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        PixelRect::new(
            self.left.max(0),
            self.top.max(0),
            self.right.min(w),
            self.bottom.min(h),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(4.0, 6.0);
        let b = Vec2::new(1.0, 2.0);

        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(a - b, Vec2::new(3.0, 4.0));
        assert_eq!(a * 0.5, Vec2::new(2.0, 3.0));
        assert_eq!(a / 2.0, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_vec2_lerp_endpoints() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 0.0);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
    }

    #[test]
    fn test_rect_square_around() {
        let rect = Rect::square_around(Vec2::new(200.0, 200.0), 180.0);

        assert_eq!(rect, Rect::new(110.0, 110.0, 290.0, 290.0));
        assert_eq!(rect.center(), Vec2::new(200.0, 200.0));
        assert!(!rect.is_empty());
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(5.0, 5.0, 5.0, 10.0).is_empty());
        assert!(Rect::new(5.0, 5.0, 4.0, 10.0).is_empty());
    }

    #[test]
    fn test_rect_round() {
        let rect = Rect::new(-0.4, 0.6, 99.5, 100.2);
        assert_eq!(rect.round(), PixelRect::new(0, 1, 100, 100));
    }

    #[test]
    fn test_pixel_rect_clamp() {
        let rect = PixelRect::new(-5, -3, 120, 80).clamp_to(100, 50);
        assert_eq!(rect, PixelRect::new(0, 0, 100, 50));
        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
    }

    #[test]
    fn test_pixel_rect_clamp_outside_is_empty() {
        let rect = PixelRect::new(150, 10, 200, 20).clamp_to(100, 100);
        assert!(rect.is_empty());
    }
}
