//! Decoded pixel data of an image asset.

use rgb::RGBA8;

/// Image in memory with straight (not premultiplied) alpha.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Horizontal amount of pixels.
    width: u32,
    /// Vertical amount of pixels.
    height: u32,
    /// Pixels, row by row.
    pixels: Vec<RGBA8>,
}

impl Image {
    /// Wrap decoded pixels.
    ///
    /// Returns `None` when the amount of pixels doesn't match the size.
    #[inline]
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<RGBA8>) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image with every pixel set to the same color.
    #[inline]
    #[must_use]
    pub fn filled(width: u32, height: u32, color: RGBA8) -> Self {
        let pixels = vec![color; width as usize * height as usize];

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Horizontal amount of pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical amount of pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at a coordinate, `None` when out of bounds.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(x as usize + y as usize * self.width as usize)
            .copied()
    }

    /// All pixels, row by row.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }
}
