//! Current scene with at most one suspended scene underneath.

use glam::Vec2;

use super::Scene;
use crate::{
    error::{Error, Result},
    graphics::Canvas,
};

/// Observable configuration of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StackState {
    /// Only the current scene is alive.
    Single,
    /// The current scene was pushed on top of a waiting scene.
    Suspended,
}

/// Owner of the scenes.
///
/// Scenes leaving the stack are destroyed before they are dropped.
pub struct SceneStack {
    /// Scene that's updated, receives input and is drawn on top.
    current: Box<dyn Scene>,
    /// Scene suspended by a push, only drawn.
    waiting: Option<Box<dyn Scene>>,
}

impl SceneStack {
    /// Start with a single scene.
    #[inline]
    #[must_use]
    pub fn new(initial: Box<dyn Scene>) -> Self {
        log::debug!("Starting with scene '{}'", initial.name());

        Self {
            current: initial,
            waiting: None,
        }
    }

    /// Destroy all scenes and show a new one.
    pub fn replace(&mut self, scene: Box<dyn Scene>) {
        log::debug!(
            "Replacing scene '{}' with '{}'",
            self.current.name(),
            scene.name()
        );

        discard(std::mem::replace(&mut self.current, scene));

        if let Some(waiting) = self.waiting.take() {
            discard(waiting);
        }
    }

    /// Suspend the current scene and show a new one on top.
    ///
    /// Only a single level is supported, pushing while a scene is already waiting destroys the waiting scene.
    pub fn push(&mut self, scene: Box<dyn Scene>) {
        log::debug!(
            "Pushing scene '{}' on top of '{}'",
            scene.name(),
            self.current.name()
        );

        let suspended = std::mem::replace(&mut self.current, scene);

        if let Some(previous) = self.waiting.replace(suspended) {
            log::warn!(
                "Scene '{}' was already waiting, destroying it",
                previous.name()
            );

            discard(previous);
        }
    }

    /// Destroy the current scene and show the waiting scene again.
    ///
    /// Does nothing when no scene is waiting.
    #[inline]
    pub fn pop(&mut self) {
        // Popping without a waiting scene is allowed
        let _ = self.try_pop();
    }

    /// Destroy the current scene and show the waiting scene again.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSceneTransition`] when no scene is waiting, nothing is changed.
    pub fn try_pop(&mut self) -> Result<()> {
        let waiting = self.waiting.take().ok_or(Error::InvalidSceneTransition)?;

        log::debug!(
            "Popping scene '{}' back to '{}'",
            self.current.name(),
            waiting.name()
        );

        discard(std::mem::replace(&mut self.current, waiting));

        Ok(())
    }

    /// Update only the current scene.
    #[inline]
    pub fn update(&mut self, delta: f32) {
        self.current.update(delta);
    }

    /// Draw the waiting scene and the current scene on top of it.
    pub fn render(&self, canvas: &mut Canvas) {
        if let Some(waiting) = &self.waiting {
            waiting.render(Vec2::ZERO, 1.0, canvas);
        }

        self.current.render(Vec2::ZERO, 1.0, canvas);
    }

    /// Scene that's updated and receives input.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &dyn Scene {
        self.current.as_ref()
    }

    /// Mutable scene that's updated and receives input.
    #[inline]
    #[must_use]
    pub fn current_mut(&mut self) -> &mut dyn Scene {
        self.current.as_mut()
    }

    /// Scene suspended by a push.
    #[inline]
    #[must_use]
    pub fn waiting(&self) -> Option<&dyn Scene> {
        self.waiting.as_deref()
    }

    /// Whether the current scene was pushed on top of a waiting scene.
    #[inline]
    #[must_use]
    pub const fn is_pushed(&self) -> bool {
        self.waiting.is_some()
    }

    /// Observable configuration of the stack.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> StackState {
        if self.is_pushed() {
            StackState::Suspended
        } else {
            StackState::Single
        }
    }
}

/// Destroy a scene that's leaving the stack.
fn discard(mut scene: Box<dyn Scene>) {
    scene.destroy();
}
