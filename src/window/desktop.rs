//! Setting up a window for desktop platforms.

use miette::{IntoDiagnostic, Result, WrapErr};
use winit::window::WindowBuilder;

use crate::Config;

/// Desktop implementation of opening a window, blocks until the window is closed.
pub(crate) fn run(window_builder: WindowBuilder, config: Config) -> Result<()> {
    // Enable environment logger for winit
    env_logger::init();

    let (event_loop, handler) = pollster::block_on(super::start(window_builder, config))?;

    event_loop
        .run(handler)
        .into_diagnostic()
        .wrap_err("Error running game loop")
}
