//! Bitmap text.

use std::rc::Rc;

use glam::Vec2;

use super::{Node, NodeBase};
use crate::graphics::{Canvas, Font, Rect};

/// Single or multi-line text drawn with a bitmap font.
///
/// Labels are static, they don't register for updates.
pub struct Label {
    /// Shared node state.
    base: NodeBase,
    /// Font to draw the glyphs with.
    font: Rc<Font>,
    /// Text to draw.
    text: String,
    /// Height of a line in pixels.
    pub size: f32,
    /// Color of the glyphs in `0xAARRGGBB`.
    pub color: u32,
    /// Point of the text block that's placed on the position, `(0.5, 0.5)` is the center.
    pub anchor: Vec2,
}

impl Label {
    /// Create white text anchored at the top-left.
    #[must_use]
    pub fn new(font: Rc<Font>, text: impl Into<String>, size: f32) -> Self {
        Self {
            base: NodeBase::new(),
            font,
            text: text.into(),
            size,
            color: 0xFFFFFFFF,
            anchor: Vec2::ZERO,
        }
    }

    /// Replace the text.
    #[inline]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Size of the drawn text block.
    #[inline]
    #[must_use]
    pub fn measure(&self) -> Vec2 {
        self.font.measure(&self.text, self.size)
    }
}

impl Node for Label {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    #[inline]
    fn is_updatable(&self) -> bool {
        false
    }

    fn draw(&self, origin: Vec2, alpha: f32, canvas: &mut Canvas) {
        let top_left = origin - self.anchor * self.measure();

        self.font
            .draw(canvas, top_left, &self.text, self.size, self.color, alpha);
    }

    fn bounds(&self) -> Option<Rect> {
        let size = self.measure();
        let top_left = -self.anchor * size;

        Some(Rect::new(top_left.x, top_left.y, size.x, size.y))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glam::Vec2;

    use super::Label;
    use crate::{
        graphics::{Canvas, Font},
        node::{shared, Container, Node},
    };

    #[test]
    fn labels_are_not_updated() {
        let font = Rc::new(Font::builtin().unwrap());
        let label = shared(Label::new(font, "PAUSE", 64.0));

        let mut root = Container::new();
        root.add_child(label.clone());
        root.update(1.0);

        assert_eq!(root.base().updating_len(), 0);
        assert_eq!(label.borrow().age(), 0);
    }

    #[test]
    fn centered_anchor() {
        let font = Rc::new(Font::builtin().unwrap());
        let mut label = Label::new(font, "AB", 8.0);
        label.anchor = Vec2::splat(0.5);

        let bounds = label.bounds().unwrap();
        let size = label.measure();
        assert!((bounds.x + size.x / 2.0).abs() < 1e-3);
        assert!((bounds.y + size.y / 2.0).abs() < 1e-3);

        // Something is drawn around the center
        label.base_mut().position = Vec2::new(16.0, 8.0);
        let mut canvas = Canvas::new(32, 16);
        label.render(Vec2::ZERO, 1.0, &mut canvas);
        let drawn = (0..32)
            .flat_map(|x| (0..16).map(move |y| (x, y)))
            .filter(|(x, y)| canvas.pixel(*x, *y).is_some_and(|pixel| pixel.a > 0))
            .count();
        assert!(drawn > 0);
    }
}
