//! The pixel-buffer capability the crop executor is written against.
//!
//! Hosts bridge their native bitmaps by implementing [`PixelBuffer`]; the
//! crate ships implementations for its own [`DecodedImage`] and for
//! `image::RgbaImage`.

use image::{Rgba, RgbaImage};

use crate::decode::DecodedImage;

/// Straight-alpha RGBA8 pixel storage.
pub trait PixelBuffer: Sized {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// RGBA value at (x, y). Callers stay within bounds.
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 4];

    fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]);

    /// A new, fully transparent buffer.
    fn allocate(width: u32, height: u32) -> Self;

    /// Copy of the `width` x `height` region starting at (left, top).
    ///
    /// The region must lie inside the buffer.
    fn sub_rect(&self, left: u32, top: u32, width: u32, height: u32) -> Self {
        let mut out = Self::allocate(width, height);
        for y in 0..height {
            for x in 0..width {
                out.put_pixel(x, y, self.get_pixel(left + x, top + y));
            }
        }
        out
    }
}

impl PixelBuffer for DecodedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    fn allocate(width: u32, height: u32) -> Self {
        DecodedImage::transparent(width, height)
    }

    fn sub_rect(&self, left: u32, top: u32, width: u32, height: u32) -> Self {
        let row_bytes = width as usize * DecodedImage::CHANNELS;
        let mut pixels = Vec::with_capacity(row_bytes * height as usize);

        // Copy pixel data row by row
        for y in top..top + height {
            let start = self.index(left, y);
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }

        DecodedImage::new(width, height, pixels)
    }
}

impl PixelBuffer for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }

    #[inline]
    fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        RgbaImage::put_pixel(self, x, y, Rgba(rgba));
    }

    fn allocate(width: u32, height: u32) -> Self {
        RgbaImage::new(width, height)
    }

    fn sub_rect(&self, left: u32, top: u32, width: u32, height: u32) -> Self {
        image::imageops::crop_imm(self, left, top, width, height).to_image()
    }
}
