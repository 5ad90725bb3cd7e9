#![forbid(unsafe_code)]

//! Tiny drag-the-cat mini-game for the browser and the desktop.
//!
//! # Features
//!
//! - Scene stack with a single level of pushing, used for showing a pause overlay on top of the game without destroying it.
//! - Loading screen showing the progress while the images and sounds are loaded one per frame.
//! - Background music and sound effects that are suspended when the game is hidden.
//! - Display tree of sprites, labels and vector shapes drawn on a fixed size software canvas.
//! - The canvas is letterboxed inside the window, keeping its aspect ratio.
//! - Mouse and touch input mapped to pointer events on the stage.
//!
//! # Usage
//!
//! Running the game only needs a configuration:
//!
//! ```no_run
//! use meo::Config;
//!
//! # fn try_main() -> miette::Result<()> {
//! meo::run(Config::default().with_title("My Game"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Scenes are nodes with pointer handling, they request changes to the stack through the [`Context`]:
//!
//! ```
//! use meo::{
//!     input::{PointerEvent, PointerPhase},
//!     node::{Node, NodeBase},
//!     scene::Scene,
//!     Context,
//! };
//!
//! /// Scene that goes back to the previous scene when tapped.
//! struct Overlay {
//!     base: NodeBase,
//! }
//!
//! impl Node for Overlay {
//!     fn base(&self) -> &NodeBase {
//!         &self.base
//!     }
//!
//!     fn base_mut(&mut self) -> &mut NodeBase {
//!         &mut self.base
//!     }
//! }
//!
//! impl Scene for Overlay {
//!     fn pointer(&mut self, event: &PointerEvent, ctx: &Context) {
//!         if event.phase == PointerPhase::Down {
//!             ctx.pop_scene();
//!         }
//!     }
//! }
//! ```
//!
//! # Features
//!
//! ## `embed-assets`
//!
//! Embed all assets into the binary when building.
//!
//! Always enabled when building for the web.
//! If disabled all assets will be loaded from the `assets/` directory on disk.
//!
//! ## `x11`
//!
//! Support X11 next to Wayland on Linux.
//!
//! # Install Requirements
//!
//! On Linux you need to install `asound2-dev` for audio:
//!
//! ```sh
//! sudo apt install libasound2-dev
//! ```
//!
//! # Web
//!
//! Build and serve the game locally with:
//!
//! ```sh
//! cargo run-wasm --package meo
//! ```

pub mod assets;
pub mod audio;
pub mod browser;
pub mod config;
pub mod context;
pub mod director;
pub mod error;
pub mod graphics;
pub mod input;
pub mod node;
pub mod scene;
pub mod scenes;
mod window;

pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};

/// Open a window and run the game until it's closed.
///
/// On the web this returns immediately and the game keeps running in the page.
///
/// # Errors
///
/// - When the window, the render surface or the logger can't be setup.
/// - When the builtin font can't be loaded.
#[inline]
pub fn run(config: Config) -> miette::Result<()> {
    window::run(config)
}
