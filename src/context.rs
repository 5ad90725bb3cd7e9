//! Shared state passed to every scene.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use glam::Vec2;
use hashbrown::HashMap;
use kira::sound::static_sound::StaticSoundData;
use smol_str::SmolStr;

use crate::{
    audio::{AudioSession, KiraBackend},
    graphics::{Font, Image},
    scene::Scene,
    Config,
};

/// Change to the scene stack requested by a scene.
///
/// Transitions are queued and applied after the update or event that requested them finished.
#[non_exhaustive]
pub enum Transition {
    /// Destroy all scenes and show a new one.
    Replace(Box<dyn Scene>),
    /// Suspend the current scene and show a new one on top of it.
    Push(Box<dyn Scene>),
    /// Destroy the current scene and show the suspended one again.
    Pop,
}

/// Context containing everything the scenes need from the game.
///
/// Cloning is cheap, all clones refer to the same state.
#[derive(Clone)]
pub struct Context {
    /// Implementation of all non-primitive parts.
    inner: Rc<RefCell<ContextInner>>,
}

/// Configuration getters.
impl Context {
    /// Size of the stage in pixels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.read(|ctx| Vec2::new(ctx.config.width as f32, ctx.config.height as f32))
    }

    /// Volume of the background music.
    #[inline]
    #[must_use]
    pub fn music_volume(&self) -> f32 {
        self.read(|ctx| ctx.config.music_volume)
    }

    /// Volume of the sound effects.
    #[inline]
    #[must_use]
    pub fn effect_volume(&self) -> f32 {
        self.read(|ctx| ctx.config.effect_volume)
    }

    /// Background color of the stage.
    #[inline]
    #[must_use]
    pub fn background_color(&self) -> u32 {
        self.read(|ctx| ctx.config.background_color)
    }
}

/// Asset getters.
impl Context {
    /// Get a loaded image by its logical name.
    ///
    /// # Returns
    ///
    /// - `None` when the image failed loading or hasn't been loaded yet.
    #[inline]
    #[must_use]
    pub fn image(&self, name: &str) -> Option<Rc<Image>> {
        self.read(|ctx| ctx.images.get(name).cloned())
    }

    /// Font all text is drawn with.
    #[inline]
    #[must_use]
    pub fn font(&self) -> Rc<Font> {
        self.read(|ctx| Rc::clone(&ctx.font))
    }
}

/// Audio.
impl Context {
    /// Play a loaded sound by its logical name.
    ///
    /// See [`AudioSession::play`].
    #[inline]
    pub fn play_sound(&self, name: &str, volume: f32, looping: bool) {
        self.write(|ctx| ctx.audio.play(name, volume, looping));
    }

    /// Pause every sound that's currently playing.
    #[inline]
    pub fn pause_playing_sounds(&self) {
        self.write(|ctx| ctx.audio.pause_playing());
    }

    /// Resume every sound that's currently paused.
    #[inline]
    pub fn resume_paused_sounds(&self) {
        self.write(|ctx| ctx.audio.resume_paused());
    }

    /// Whether any instance of a sound is audible.
    #[inline]
    #[must_use]
    pub fn is_sound_playing(&self, name: &str) -> bool {
        self.read(|ctx| ctx.audio.is_playing(name))
    }

    /// Whether audio output is not suspended because the game is hidden.
    #[inline]
    #[must_use]
    pub fn is_audio_active(&self) -> bool {
        self.read(|ctx| ctx.audio.is_active())
    }
}

/// Scene transitions.
impl Context {
    /// Replace all scenes with a new one after the current update.
    #[inline]
    pub fn replace_scene(&self, scene: impl Scene) {
        self.queue(Transition::Replace(Box::new(scene)));
    }

    /// Show a scene on top of the current one after the current update.
    #[inline]
    pub fn push_scene(&self, scene: impl Scene) {
        self.queue(Transition::Push(Box::new(scene)));
    }

    /// Go back to the suspended scene after the current update.
    #[inline]
    pub fn pop_scene(&self) {
        self.queue(Transition::Pop);
    }
}

/// Internal methods.
impl Context {
    /// Create a new context.
    pub(crate) fn new(config: Config, font: Rc<Font>, audio: AudioSession<KiraBackend>) -> Self {
        let inner = Rc::new(RefCell::new(ContextInner {
            config,
            images: HashMap::new(),
            font,
            audio,
            transitions: VecDeque::new(),
        }));

        Self { inner }
    }

    /// Make a loaded image available under its logical name.
    pub(crate) fn insert_image(&self, name: &str, image: Image) {
        self.write(|ctx| ctx.images.insert(name.into(), Rc::new(image)));
    }

    /// Make a loaded sound available under its logical name.
    pub(crate) fn register_sound(&self, name: &str, sound: StaticSoundData) {
        self.write(|ctx| ctx.audio.register(name, sound));
    }

    /// Suspend or resume all audio output.
    pub(crate) fn visibility_changed(&self, hidden: bool) {
        self.write(|ctx| ctx.audio.visibility_changed(hidden));
    }

    /// Add a transition to the end of the queue.
    pub(crate) fn queue(&self, transition: Transition) {
        self.write(|ctx| ctx.transitions.push_back(transition));
    }

    /// Take the oldest queued transition.
    pub(crate) fn next_transition(&self) -> Option<Transition> {
        self.write(|ctx| ctx.transitions.pop_front())
    }

    /// Get a read-only reference to the inner struct.
    ///
    /// # Panics
    ///
    /// - When the inner struct is already mutably borrowed.
    #[inline]
    pub(crate) fn read<R>(&self, reader: impl FnOnce(&ContextInner) -> R) -> R {
        reader(&self.inner.borrow())
    }

    /// Get a mutable reference to the inner struct.
    ///
    /// # Panics
    ///
    /// - When the inner struct is already borrowed.
    #[inline]
    pub(crate) fn write<R>(&self, writer: impl FnOnce(&mut ContextInner) -> R) -> R {
        writer(&mut self.inner.borrow_mut())
    }
}

/// Internal wrapped implementation for [`Context`].
pub(crate) struct ContextInner {
    /// User supplied game configuration.
    pub(crate) config: Config,
    /// Loaded images by logical name.
    images: HashMap<SmolStr, Rc<Image>>,
    /// Font for all text.
    font: Rc<Font>,
    /// All sounds.
    pub(crate) audio: AudioSession<KiraBackend>,
    /// Transitions requested by scenes that still need to be applied.
    transitions: VecDeque<Transition>,
}
