//! Anti-aliased circular mask for round avatars.
//!
//! The mask is the circle inscribed in a `width` x `height` rectangle:
//! centered, with diameter `min(width, height)`. Coverage is evaluated at
//! pixel centers and ramps linearly over one pixel across the boundary,
//! which matches what an anti-aliased rasterizer produces for a filled
//! circle.

use super::buffer::PixelBuffer;

/// Circle inscribed in a pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMask {
    center_x: f32,
    center_y: f32,
    radius: f32,
}

impl CircleMask {
    /// The inscribed circle of a `width` x `height` buffer.
    pub fn inscribed(width: u32, height: u32) -> Self {
        Self {
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            radius: width.min(height) as f32 / 2.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Fraction of pixel (x, y) covered by the circle, 0.0 to 1.0.
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        let dx = x as f32 + 0.5 - self.center_x;
        let dy = y as f32 + 0.5 - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        (self.radius - distance + 0.5).clamp(0.0, 1.0)
    }

}

/// Copy `source` into a new buffer of the same size, keeping only the
/// inscribed circle. Outside pixels are fully transparent; edge pixels keep
/// their color with alpha scaled by coverage.
pub fn apply_circle_mask<B: PixelBuffer>(source: &B) -> B {
    let (width, height) = (source.width(), source.height());
    let mask = CircleMask::inscribed(width, height);
    let mut out = B::allocate(width, height);

    for y in 0..height {
        for x in 0..width {
            let coverage = mask.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }
            let [r, g, b, a] = source.get_pixel(x, y);
            let alpha = (a as f32 * coverage).round() as u8;
            out.put_pixel(x, y, [r, g, b, alpha]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    #[test]
    fn test_coverage_center_and_corners() {
        let mask = CircleMask::inscribed(100, 100);

        assert_eq!(mask.coverage(50, 50), 1.0);
        assert_eq!(mask.coverage(0, 0), 0.0);
        assert_eq!(mask.coverage(99, 0), 0.0);
        assert_eq!(mask.coverage(0, 99), 0.0);
        assert_eq!(mask.coverage(99, 99), 0.0);
    }

    #[test]
    fn test_edge_pixels_are_partial() {
        let mask = CircleMask::inscribed(100, 100);

        // Somewhere along a diagonal the boundary must be blended
        let partial = (0..50).any(|i| {
            let c = mask.coverage(i, i);
            c > 0.0 && c < 1.0
        });
        assert!(partial, "expected anti-aliased coverage on the boundary");
    }

    #[test]
    fn test_non_square_uses_min_dimension() {
        let mask = CircleMask::inscribed(100, 40);
        assert_eq!(mask.radius(), 20.0);

        assert_eq!(mask.coverage(50, 20), 1.0);
        assert_eq!(mask.coverage(10, 20), 0.0);
        assert_eq!(mask.coverage(90, 20), 0.0);
    }

    #[test]
    fn test_apply_circle_mask_solid_square() {
        let source = DecodedImage::filled(64, 64, [200, 100, 50, 255]);
        let masked = apply_circle_mask(&source);

        assert_eq!((masked.width, masked.height), (64, 64));
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(masked.get_pixel(x, y)[3], 0, "corner ({x}, {y})");
        }
        assert_eq!(masked.get_pixel(32, 32), [200, 100, 50, 255]);
    }

    #[test]
    fn test_apply_circle_mask_scales_existing_alpha() {
        let source = DecodedImage::filled(20, 20, [10, 10, 10, 100]);
        let masked = apply_circle_mask(&source);

        assert_eq!(masked.get_pixel(10, 10)[3], 100);
        for pixel in masked.pixels.chunks_exact(4) {
            assert!(pixel[3] <= 100);
        }
    }

    #[test]
    fn test_single_pixel_survives() {
        let source = DecodedImage::filled(1, 1, [1, 2, 3, 255]);
        let masked = apply_circle_mask(&source);
        assert_eq!(masked.get_pixel(0, 0), [1, 2, 3, 255]);
    }
}
