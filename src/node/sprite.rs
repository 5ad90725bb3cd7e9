//! Image or a single frame of a sprite sheet.

use std::rc::Rc;

use glam::Vec2;

use super::{Node, NodeBase};
use crate::graphics::{Canvas, Image, Rect};

/// Source rectangle of a frame on a sprite sheet.
///
/// Frames are counted left to right, top to bottom.
///
/// # Arguments
///
/// * `frame` - Index of the frame.
/// * `frame_size` - Size of a single frame in pixels.
/// * `columns` - Amount of frames on a single row of the sheet.
#[inline]
#[must_use]
pub fn frame_rect(frame: usize, frame_size: Vec2, columns: usize) -> Rect {
    let columns = columns.max(1);

    Rect::new(
        (frame % columns) as f32 * frame_size.x,
        (frame / columns) as f32 * frame_size.y,
        frame_size.x,
        frame_size.y,
    )
}

/// Leaf drawable showing an image, or one frame of it when it's a sprite sheet.
pub struct Sprite {
    /// Shared node state.
    base: NodeBase,
    /// Pixels to draw, nothing is drawn when not set.
    image: Option<Rc<Image>>,
    /// Size of a single frame, the whole image when it's not a sheet.
    frame_size: Vec2,
    /// Current frame, always smaller than the frame count.
    frame: usize,
    /// Point of the frame that's placed on the position, `(0.5, 0.5)` is the center.
    pub anchor: Vec2,
    /// Size multiplier.
    pub scale: Vec2,
}

impl Sprite {
    /// Sprite showing a whole image.
    #[must_use]
    pub fn new(image: Rc<Image>) -> Self {
        let frame_size = Vec2::new(image.width() as f32, image.height() as f32);

        Self::with_frame_size(Some(image), frame_size)
    }

    /// Sprite showing a frame of a sprite sheet.
    ///
    /// A missing image draws nothing but still has the size of a single frame.
    #[must_use]
    pub fn sheet(image: Option<Rc<Image>>, frame_width: u32, frame_height: u32) -> Self {
        Self::with_frame_size(image, Vec2::new(frame_width as f32, frame_height as f32))
    }

    /// Invisible sprite only used as a hit area.
    #[must_use]
    pub fn empty(width: f32, height: f32) -> Self {
        Self::with_frame_size(None, Vec2::new(width, height))
    }

    /// Set the frame, wrapping around when it's larger than the amount of frames.
    #[inline]
    pub fn set_frame(&mut self, frame: usize) {
        self.frame = frame % self.frame_count();
    }

    /// Current frame.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> usize {
        self.frame
    }

    /// Amount of full frames on the image, at least one.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        let (columns, rows) = self.grid();

        (columns * rows).max(1)
    }

    /// Source rectangle of the current frame on the image.
    #[inline]
    #[must_use]
    pub fn source_rect(&self) -> Rect {
        frame_rect(self.frame, self.frame_size, self.grid().0)
    }

    /// Size of a frame with the scale applied.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.frame_size * self.scale
    }

    /// Construct with all defaults.
    fn with_frame_size(image: Option<Rc<Image>>, frame_size: Vec2) -> Self {
        Self {
            base: NodeBase::new(),
            image,
            frame_size,
            frame: 0,
            anchor: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    /// Amount of columns and rows of frames.
    fn grid(&self) -> (usize, usize) {
        let Some(image) = &self.image else {
            return (1, 1);
        };
        if self.frame_size.x < 1.0 || self.frame_size.y < 1.0 {
            return (1, 1);
        }

        (
            (image.width() as f32 / self.frame_size.x) as usize,
            (image.height() as f32 / self.frame_size.y) as usize,
        )
    }
}

impl Node for Sprite {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn draw(&self, origin: Vec2, alpha: f32, canvas: &mut Canvas) {
        let Some(image) = &self.image else {
            return;
        };

        let size = self.size();
        let top_left = origin - self.anchor * size;

        canvas.blit(
            image,
            self.source_rect(),
            Rect::new(top_left.x, top_left.y, size.x, size.y),
            alpha,
        );
    }

    fn bounds(&self) -> Option<Rect> {
        let size = self.size();
        let top_left = -self.anchor * size;

        Some(Rect::new(top_left.x, top_left.y, size.x, size.y))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glam::Vec2;
    use rgb::RGBA8;

    use super::{frame_rect, Sprite};
    use crate::{
        graphics::{Canvas, Image, Rect},
        node::Node,
    };

    /// Three 2x2 frames on a single row, colored red, green and blue.
    fn sheet() -> Rc<Image> {
        let colors = [
            RGBA8::new(0xFF, 0, 0, 0xFF),
            RGBA8::new(0, 0xFF, 0, 0xFF),
            RGBA8::new(0, 0, 0xFF, 0xFF),
        ];
        let pixels = (0..2)
            .flat_map(|_y| (0..6).map(|x| colors[x / 2]))
            .collect();

        Rc::new(Image::new(6, 2, pixels).unwrap())
    }

    #[test]
    fn frame_rect_grid() {
        let size = Vec2::new(128.0, 128.0);

        assert_eq!(frame_rect(0, size, 3), Rect::new(0.0, 0.0, 128.0, 128.0));
        assert_eq!(frame_rect(2, size, 3), Rect::new(256.0, 0.0, 128.0, 128.0));
        assert_eq!(frame_rect(4, size, 3), Rect::new(128.0, 128.0, 128.0, 128.0));
        assert_eq!(frame_rect(1, size, 0), Rect::new(0.0, 128.0, 128.0, 128.0));
    }

    #[test]
    fn frame_wraps_around() {
        let mut sprite = Sprite::sheet(Some(sheet()), 2, 2);
        assert_eq!(sprite.frame_count(), 3);

        sprite.set_frame(4);
        assert_eq!(sprite.frame(), 1);
        assert_eq!(sprite.source_rect(), Rect::new(2.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn draws_current_frame_centered() {
        let mut sprite = Sprite::sheet(Some(sheet()), 2, 2);
        sprite.anchor = Vec2::splat(0.5);
        sprite.set_frame(2);
        sprite.base_mut().position = Vec2::new(2.0, 2.0);

        let mut canvas = Canvas::new(4, 4);
        sprite.render(Vec2::ZERO, 1.0, &mut canvas);

        assert_eq!(canvas.pixel(1, 1), Some(RGBA8::new(0, 0, 0xFF, 0xFF)));
        assert_eq!(canvas.pixel(2, 2), Some(RGBA8::new(0, 0, 0xFF, 0xFF)));
        assert_eq!(canvas.pixel(0, 0), Some(RGBA8::default()));
    }

    #[test]
    fn missing_image_draws_nothing_but_has_bounds() {
        let mut sprite = Sprite::sheet(None, 128, 128);
        sprite.set_frame(5);
        assert_eq!(sprite.frame(), 0);

        let mut canvas = Canvas::new(2, 2);
        sprite.render(Vec2::ZERO, 1.0, &mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(RGBA8::default()));

        assert_eq!(sprite.bounds(), Some(Rect::new(0.0, 0.0, 128.0, 128.0)));
    }
}
