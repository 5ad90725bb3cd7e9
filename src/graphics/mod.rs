//! Minimal CPU display layer the scenes draw on.
//!
//! Everything is drawn on a [`Canvas`] with the backing resolution of the stage, which is then scaled into the window with a [`Letterbox`].

pub mod canvas;
pub mod font;
pub mod image;
pub mod letterbox;

pub use canvas::Canvas;
pub use font::Font;
pub use image::Image;
pub use letterbox::Letterbox;

use glam::Vec2;
use rgb::RGBA8;

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal size.
    pub width: f32,
    /// Vertical size.
    pub height: f32,
}

impl Rect {
    /// Construct a new rectangle from the top-left corner and the size.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Move the rectangle.
    #[inline]
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Whether a point lies inside, the right and bottom edges are exclusive.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Convert an `0xAARRGGBB` color to a pixel.
#[inline]
#[must_use]
pub fn argb_to_rgba(argb: u32) -> RGBA8 {
    let a = ((argb & 0xFF000000) >> 24) as u8;
    let r = ((argb & 0x00FF0000) >> 16) as u8;
    let g = ((argb & 0x0000FF00) >> 8) as u8;
    let b = (argb & 0x000000FF) as u8;

    RGBA8::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rgb::RGBA8;

    use super::Rect;

    #[test]
    fn argb_conversion() {
        assert_eq!(super::argb_to_rgba(0xFF112233), RGBA8::new(0x11, 0x22, 0x33, 0xFF));
        assert_eq!(super::argb_to_rgba(0x80FFFFFF).a, 0x80);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);

        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(14.9, 14.9)));
        assert!(!rect.contains(Vec2::new(15.0, 12.0)));
        assert!(!rect.contains(Vec2::new(9.9, 12.0)));
    }
}
