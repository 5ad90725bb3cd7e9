//! Scenes of the game.
//!
//! The game starts in [`LoadingScene`], replaces it with [`MainScene`] when all assets are loaded and pushes [`PauseScene`] on top of it when paused.

pub mod loading;
pub mod main_scene;
pub mod pause;
pub mod player;

pub use loading::LoadingScene;
pub use main_scene::MainScene;
pub use pause::PauseScene;
pub use player::Player;
