//! Scene shown on top of the game while it's paused.

use glam::Vec2;

use crate::{
    graphics::Rect,
    input::{PointerEvent, PointerPhase},
    node::{shared, Label, Node, NodeBase, Shape},
    scene::Scene,
    Context,
};

/// Transparency of the black layer dimming the game underneath.
const SCRIM_ALPHA: f32 = 0.4;
/// Height of the text.
const TEXT_SIZE: f32 = 64.0;

/// Dimmed overlay with a centered "PAUSE" text, tapping anywhere resumes the game.
pub struct PauseScene {
    /// Shared node state.
    base: NodeBase,
}

impl PauseScene {
    /// Create the overlay for the stage size of the context.
    #[must_use]
    pub fn new(ctx: &Context) -> Self {
        let size = ctx.size();

        let base = NodeBase::new();
        let mut scene = Self { base };

        let mut scrim = Shape::new();
        scrim.rect_fill(Rect::new(0.0, 0.0, size.x, size.y), 0xFF000000);
        scrim.base_mut().alpha = SCRIM_ALPHA;
        scene.add_child(shared(scrim));

        let mut text = Label::new(ctx.font(), "PAUSE", TEXT_SIZE);
        text.anchor = Vec2::splat(0.5);
        text.base_mut().position = size * 0.5;
        scene.add_child(shared(text));

        scene
    }
}

impl Node for PauseScene {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl Scene for PauseScene {
    fn pointer(&mut self, event: &PointerEvent, ctx: &Context) {
        if event.phase != PointerPhase::Down {
            return;
        }

        ctx.resume_paused_sounds();
        ctx.pop_scene();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::PauseScene;
    use crate::{
        context::{tests::context, Transition},
        graphics::Canvas,
        input::{PointerEvent, PointerPhase},
        node::Node,
        scene::Scene,
    };

    #[test]
    fn tap_pops() {
        let ctx = context();
        let mut scene = PauseScene::new(&ctx);

        // Moving doesn't resume
        scene.pointer(&PointerEvent::new(PointerPhase::Move, Vec2::ONE), &ctx);
        assert!(ctx.next_transition().is_none());

        scene.pointer(&PointerEvent::new(PointerPhase::Down, Vec2::ONE), &ctx);
        assert!(matches!(ctx.next_transition(), Some(Transition::Pop)));
    }

    #[test]
    fn dims_the_stage() {
        let ctx = context();
        let scene = PauseScene::new(&ctx);

        let mut canvas = Canvas::new(64, 96);
        canvas.fill(0xFFFFFFFF);
        scene.render(Vec2::ZERO, 1.0, &mut canvas);

        // White blended with 40% black
        assert_eq!(canvas.pixel(0, 0).unwrap().r, 153);
    }
}
