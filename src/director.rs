//! Drives loading, the scene stack and queued scene transitions every frame.

use std::rc::Rc;

use crate::{
    assets::{Asset, AssetSource, Loaded, Manifest, Preloader},
    audio::{AudioSession, KiraBackend},
    context::{Context, Transition},
    error::Result,
    graphics::{Canvas, Font},
    input::PointerEvent,
    scene::{Scene, SceneStack},
    scenes::{LoadingScene, MainScene},
    Config,
};

/// Builds the first scene after loading finished.
type SceneFactory = Box<dyn FnOnce(&Context) -> Box<dyn Scene>>;

/// Game lifecycle independent of the window.
pub struct Director {
    /// All scenes.
    stack: SceneStack,
    /// State shared with the scenes.
    ctx: Context,
    /// Assets still being loaded.
    preloader: Preloader,
    /// Scene replacing the loading scene, taken when loading finishes.
    on_load: Option<SceneFactory>,
}

impl Director {
    /// Start loading the game assets while showing the loading scene.
    ///
    /// # Errors
    ///
    /// - When the builtin font can't be decoded.
    pub fn new(config: Config, source: AssetSource, backend: KiraBackend) -> Result<Self> {
        let font = Rc::new(Font::builtin()?);
        let retries = config.load_retries;
        let ctx = Context::new(config, font, AudioSession::new(backend));

        let preloader = Preloader::new(Manifest::game(), source, retries);

        Ok(Self::with_preloader(
            ctx,
            preloader,
            Box::new(|ctx| Box::new(MainScene::new(ctx))),
        ))
    }

    /// Show the loading scene for a preloader and build a scene when it finishes.
    pub(crate) fn with_preloader(ctx: Context, preloader: Preloader, on_load: SceneFactory) -> Self {
        let loading = LoadingScene::new(&ctx, preloader.progress());

        Self {
            stack: SceneStack::new(Box::new(loading)),
            ctx,
            preloader,
            on_load: Some(on_load),
        }
    }

    /// Advance a single frame.
    ///
    /// # Arguments
    ///
    /// * `delta` - Elapsed time in frames at 60 frames per second.
    #[profiling::function]
    pub fn update(&mut self, delta: f32) {
        if let Some(loaded) = self.preloader.step() {
            self.finish_loading(loaded);
        }

        self.stack.update(delta);

        self.apply_transitions();
    }

    /// Send a pointer event to the current scene.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        self.stack.current_mut().pointer(event, &self.ctx);

        self.apply_transitions();
    }

    /// Suspend or resume all audio when the game is hidden or shown again.
    #[inline]
    pub fn visibility_changed(&mut self, hidden: bool) {
        log::debug!("Game visibility changed, hidden: {hidden}");

        self.ctx.visibility_changed(hidden);
    }

    /// Draw the background and all visible scenes.
    #[profiling::function]
    pub fn render(&self, canvas: &mut Canvas) {
        canvas.fill(self.ctx.background_color());

        self.stack.render(canvas);
    }

    /// State shared with the scenes.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    /// All scenes.
    #[inline]
    #[must_use]
    pub const fn stack(&self) -> &SceneStack {
        &self.stack
    }

    /// Make the loaded assets available and queue the first game scene.
    fn finish_loading(&mut self, loaded: Loaded) {
        let Loaded { assets, report } = loaded;

        for failure in &report.failures {
            log::error!("Asset skipped: {failure}");
        }

        for (name, asset) in assets {
            match asset {
                Asset::Image(image) => self.ctx.insert_image(&name, image),
                Asset::Sound(sound) => self.ctx.register_sound(&name, sound),
            }
        }

        if let Some(on_load) = self.on_load.take() {
            let scene = on_load(&self.ctx);
            self.ctx.queue(Transition::Replace(scene));
        }
    }

    /// Apply every transition the scenes requested, in order.
    fn apply_transitions(&mut self) {
        while let Some(transition) = self.ctx.next_transition() {
            match transition {
                Transition::Replace(scene) => self.stack.replace(scene),
                Transition::Push(scene) => self.stack.push(scene),
                Transition::Pop => {
                    if let Err(err) = self.stack.try_pop() {
                        log::warn!("Ignoring scene pop: {err}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Director;
    use crate::{
        assets::{
            preload::tests::{manifest, source},
            Preloader,
        },
        context::tests::context,
        graphics::Canvas,
        input::{PointerEvent, PointerPhase},
        scene::StackState,
        scenes::{LoadingScene, MainScene, PauseScene},
    };

    fn director() -> Director {
        let preloader = Preloader::new(
            manifest(&[
                ("player", "image/player.png"),
                ("pause_button", "image/pausebutton.png"),
            ]),
            source(&["image/player.png", "image/pausebutton.png"]),
            0,
        );

        Director::with_preloader(
            context(),
            preloader,
            Box::new(|ctx| Box::new(MainScene::new(ctx))),
        )
    }

    fn press(director: &mut Director, phase: PointerPhase, x: f32, y: f32) {
        director.handle_pointer(&PointerEvent::new(phase, Vec2::new(x, y)));
    }

    #[test]
    fn loading_then_main() {
        let mut director = director();
        assert!(director.stack().current().is::<LoadingScene>());

        director.update(1.0);
        assert!(director.stack().current().is::<LoadingScene>());

        // Second asset finishes loading
        director.update(1.0);
        assert!(director.stack().current().is::<MainScene>());
        assert!(director.context().image("player").is_some());
        assert_eq!(director.stack().state(), StackState::Single);

        // Doesn't replace again
        director.update(1.0);
        assert!(director.stack().current().is::<MainScene>());
    }

    #[test]
    fn pause_and_resume() {
        let mut director = director();
        director.update(1.0);
        director.update(1.0);

        // The 1x1 pause button image covers (8, 8)
        press(&mut director, PointerPhase::Down, 8.5, 8.5);
        assert!(director.stack().current().is::<PauseScene>());
        assert_eq!(director.stack().state(), StackState::Suspended);
        assert!(director.stack().waiting().unwrap().is::<MainScene>());

        // Release on the pause scene does nothing
        press(&mut director, PointerPhase::Up, 8.5, 8.5);
        assert!(director.stack().current().is::<PauseScene>());

        press(&mut director, PointerPhase::Down, 30.0, 30.0);
        assert!(director.stack().current().is::<MainScene>());
        assert_eq!(director.stack().state(), StackState::Single);
    }

    #[test]
    fn render_fills_background() {
        let director = director();
        let mut canvas = Canvas::new(64, 96);
        director.render(&mut canvas);

        assert_eq!(canvas.pixel(0, 0).unwrap().r, 0x55);
    }

    #[test]
    fn hiding_suspends_audio() {
        let mut director = director();
        director.visibility_changed(true);
        assert!(!director.context().is_audio_active());

        director.visibility_changed(false);
        assert!(director.context().is_audio_active());
    }
}
