//! Scene shown while the assets are being loaded.

use std::{cell::RefCell, rc::Rc};

use glam::Vec2;

use crate::{
    assets::LoadProgress,
    node::{shared, Label, Node, NodeBase},
    scene::Scene,
    Context,
};

/// Base text of the animated label.
const LOADING_TEXT: &str = "Now Loading";
/// Amount of updates between adding a dot.
const DOT_UPDATES: u64 = 15;
/// Maximum amount of trailing dots.
const MAX_DOTS: usize = 3;

/// Animated "Now Loading" text with a percentage above it.
pub struct LoadingScene {
    /// Shared node state.
    base: NodeBase,
    /// "Now Loading" with trailing dots.
    text: Rc<RefCell<Label>>,
    /// Percentage of the loaded assets.
    percentage: Rc<RefCell<Label>>,
    /// Amount of dots shown next time.
    dots: usize,
    /// Shared loader progress.
    progress: LoadProgress,
}

impl LoadingScene {
    /// Create the labels for the stage size of the context.
    #[must_use]
    pub fn new(ctx: &Context, progress: LoadProgress) -> Self {
        let size = ctx.size();
        let font = ctx.font();

        // Positioned once so the dots don't move the text
        let mut text = Label::new(Rc::clone(&font), LOADING_TEXT, size.x * 0.05);
        text.base_mut().position = Vec2::new(size.x * 0.5 - text.measure().x * 0.5, size.y * 0.5);
        let text = shared(text);

        let mut percentage = Label::new(font, "0%", size.x * 0.1);
        percentage.anchor = Vec2::new(0.5, 1.0);
        percentage.base_mut().position = size * 0.5;
        let percentage = shared(percentage);

        let base = NodeBase::new();

        let mut scene = Self {
            base,
            text,
            percentage,
            dots: 0,
            progress,
        };
        scene.add_child(scene.text.clone());
        scene.add_child(scene.percentage.clone());

        scene
    }

    /// Current text of the animated label.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.borrow().text().to_owned()
    }

    /// Current text of the percentage label.
    #[must_use]
    pub fn percentage(&self) -> String {
        self.percentage.borrow().text().to_owned()
    }
}

impl Node for LoadingScene {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn tick(&mut self, _delta: f32) {
        self.percentage
            .borrow_mut()
            .set_text(format!("{}%", self.progress.get()));

        if self.age() % DOT_UPDATES == 0 {
            self.text
                .borrow_mut()
                .set_text(format!("{LOADING_TEXT}{}", ".".repeat(self.dots)));

            self.dots = (self.dots + 1) % (MAX_DOTS + 1);
        }
    }
}

impl Scene for LoadingScene {}

#[cfg(test)]
mod tests {
    use super::LoadingScene;
    use crate::{assets::LoadProgress, context::tests::context, node::Node};

    #[test]
    fn dots_cycle_every_fifteen_updates() {
        let ctx = context();
        let mut scene = LoadingScene::new(&ctx, LoadProgress::default());
        assert_eq!(scene.text(), "Now Loading");

        let mut texts = Vec::new();
        for _ in 0..5 {
            for _ in 0..15 {
                scene.update(1.0);
            }
            texts.push(scene.text());
        }

        assert_eq!(
            texts,
            [
                "Now Loading",
                "Now Loading.",
                "Now Loading..",
                "Now Loading...",
                "Now Loading"
            ]
        );
    }

    #[test]
    fn shows_shared_progress() {
        let ctx = context();
        let progress = LoadProgress::default();
        let mut scene = LoadingScene::new(&ctx, progress.clone());
        assert_eq!(scene.percentage(), "0%");

        progress.advance(50);
        scene.update(1.0);
        assert_eq!(scene.percentage(), "50%");
    }

    #[test]
    fn labels_are_not_updated() {
        let ctx = context();
        let scene = LoadingScene::new(&ctx, LoadProgress::default());

        assert_eq!(scene.base().children().len(), 2);
        assert_eq!(scene.base().updating_len(), 0);
    }
}
