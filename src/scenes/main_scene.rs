//! Scene with the player that can be dragged around.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use glam::Vec2;

use super::{pause::PauseScene, player::Player};
use crate::{
    input::{PointerEvent, PointerPhase},
    node::{shared, Node, NodeBase, Sprite},
    scene::Scene,
    Context,
};

/// Offset of the pause button from the top-left corner.
const PAUSE_BUTTON_POSITION: Vec2 = Vec2::new(8.0, 8.0);
/// Distance of the player from the bottom of the stage.
const PLAYER_BOTTOM_OFFSET: f32 = 256.0;

/// Game scene, dragging anywhere on the stage moves the player.
pub struct MainScene {
    /// Shared node state.
    base: NodeBase,
    /// Invisible area covering the stage where drags can start.
    background: Rc<RefCell<Sprite>>,
    /// Character being dragged.
    player: Rc<RefCell<Player>>,
    /// Pushes the pause scene when pressed.
    pause_button: Rc<RefCell<Sprite>>,
    /// Pointer position of the previous drag event.
    drag_origin: Vec2,
}

impl MainScene {
    /// Create the scene and start the background music.
    #[must_use]
    pub fn new(ctx: &Context) -> Self {
        let size = ctx.size();

        let mut background = Sprite::empty(size.x, size.y);
        background.base_mut().interactive = true;
        let background = shared(background);

        let mut player = Player::new(ctx.image("player"));
        player.base_mut().position = Vec2::new(size.x * 0.5, size.y - PLAYER_BOTTOM_OFFSET);
        let player = shared(player);

        let mut pause_button = ctx
            .image("pause_button")
            .map_or_else(|| Sprite::empty(0.0, 0.0), Sprite::new);
        pause_button.base_mut().position = PAUSE_BUTTON_POSITION;
        pause_button.base_mut().interactive = true;
        let pause_button = shared(pause_button);

        let mut scene = Self {
            base: NodeBase::new(),
            background,
            player,
            pause_button,
            drag_origin: Vec2::ZERO,
        };
        scene.add_child(scene.background.clone());
        scene.add_child(scene.player.clone());
        scene.add_child(scene.pause_button.clone());

        ctx.play_sound("bgm", ctx.music_volume(), true);

        scene
    }

    /// Character being dragged.
    #[inline]
    #[must_use]
    pub fn player(&self) -> Ref<'_, Player> {
        self.player.borrow()
    }

    /// Pause the game and show the pause scene on top.
    fn pause(&self, ctx: &Context) {
        log::debug!("Pausing the game");

        ctx.pause_playing_sounds();
        ctx.play_sound("pause", ctx.effect_volume(), false);
        ctx.push_scene(PauseScene::new(ctx));
    }
}

impl Node for MainScene {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}

impl Scene for MainScene {
    fn pointer(&mut self, event: &PointerEvent, ctx: &Context) {
        let origin = self.base.position;

        match event.phase {
            PointerPhase::Down => {
                // The button swallows the press so it doesn't start a drag
                if self.pause_button.borrow().hit_test(origin, event.position) {
                    self.pause(ctx);
                    return;
                }

                if !self.background.borrow().hit_test(origin, event.position) {
                    return;
                }

                self.drag_origin = event.position;
                self.player.borrow_mut().start_moving();
            }
            PointerPhase::Move => {
                let mut player = self.player.borrow_mut();
                if !player.is_moving() {
                    return;
                }

                player.translate(event.position - self.drag_origin);
                self.drag_origin = event.position;
            }
            PointerPhase::Up => self.player.borrow_mut().stop_moving(),
        }
    }
}
