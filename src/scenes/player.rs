//! Draggable character with a walk animation.

use std::rc::Rc;

use glam::Vec2;

use crate::{
    graphics::{Canvas, Image, Rect},
    node::{Node, NodeBase, Sprite},
};

/// Frames of the sprite sheet shown while walking.
const WALK_ANIMATION: [usize; 4] = [0, 1, 2, 1];
/// Amount of updates a walking frame is shown.
const WALK_FRAME_UPDATES: u64 = 10;
/// Size of a single frame on the sprite sheet.
pub const FRAME_SIZE: u32 = 128;

/// Player character, walks while being dragged.
pub struct Player {
    /// Sprite sheet node.
    sprite: Sprite,
    /// Index into the walk animation.
    walk_index: usize,
    /// Whether the player is being dragged.
    is_moving: bool,
}

impl Player {
    /// Create a player centered on its position.
    #[must_use]
    pub fn new(image: Option<Rc<Image>>) -> Self {
        let mut sprite = Sprite::sheet(image, FRAME_SIZE, FRAME_SIZE);
        sprite.anchor = Vec2::splat(0.5);

        Self {
            sprite,
            walk_index: 0,
            is_moving: false,
        }
    }

    /// Start the walk animation.
    #[inline]
    pub fn start_moving(&mut self) {
        self.is_moving = true;
    }

    /// Stop the walk animation and stand still.
    #[inline]
    pub fn stop_moving(&mut self) {
        self.is_moving = false;
        self.sprite.set_frame(1);
    }

    /// Whether the player is being dragged.
    #[inline]
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Current frame of the sprite sheet.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> usize {
        self.sprite.frame()
    }

    /// Move the player.
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.base_mut().position += offset;
    }
}

impl Node for Player {
    #[inline]
    fn base(&self) -> &NodeBase {
        self.sprite.base()
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        self.sprite.base_mut()
    }

    fn tick(&mut self, _delta: f32) {
        if !self.is_moving || self.age() % WALK_FRAME_UPDATES != 0 {
            return;
        }

        self.walk_index = (self.walk_index + 1) % WALK_ANIMATION.len();
        self.sprite.set_frame(WALK_ANIMATION[self.walk_index]);
    }

    #[inline]
    fn draw(&self, origin: Vec2, alpha: f32, canvas: &mut Canvas) {
        self.sprite.draw(origin, alpha, canvas);
    }

    #[inline]
    fn bounds(&self) -> Option<Rect> {
        self.sprite.bounds()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use rgb::RGBA8;

    use super::Player;
    use crate::{graphics::Image, node::Node};

    fn player() -> Player {
        // Three frames on a single row
        let sheet = Image::filled(128 * 3, 128, RGBA8::default());

        Player::new(Some(Rc::new(sheet)))
    }

    #[test]
    fn walks_every_ten_updates() {
        let mut player = player();
        player.start_moving();

        let mut frames = Vec::new();
        for _ in 0..80 {
            player.update(1.0);
            frames.push(player.frame());
        }

        // Frame only changes on every tenth update
        assert!(frames[..9].iter().all(|frame| *frame == 0));
        assert_eq!(
            [frames[9], frames[19], frames[29], frames[39], frames[49]],
            [1, 2, 1, 0, 1]
        );
        assert_eq!(frames[10..19], [1; 9]);
    }

    #[test]
    fn idle_player_does_not_animate() {
        let mut player = player();

        for _ in 0..30 {
            player.update(1.0);
        }

        assert_eq!(player.frame(), 0);
    }

    #[test]
    fn stopping_shows_standing_frame() {
        let mut player = player();
        player.start_moving();
        for _ in 0..20 {
            player.update(1.0);
        }
        assert_eq!(player.frame(), 2);

        player.stop_moving();
        assert!(!player.is_moving());
        assert_eq!(player.frame(), 1);

        // Stays put while not moving
        for _ in 0..20 {
            player.update(1.0);
        }
        assert_eq!(player.frame(), 1);
    }
}
