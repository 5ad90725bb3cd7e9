//! Spawn a winit window and run the game loop.

#[cfg(not(target_arch = "wasm32"))]
mod desktop;
#[cfg(target_arch = "wasm32")]
mod web;

use std::sync::Arc;

use glam::Vec2;
use miette::{IntoDiagnostic, Result, WrapErr};
use pixels::{
    wgpu::{BlendState, Color},
    Pixels, PixelsBuilder, SurfaceTexture,
};
use web_time::Instant;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

use crate::{
    assets::AssetSource,
    audio::KiraBackend,
    director::Director,
    graphics::{Canvas, Letterbox},
    input::{Pointer, PointerEvent, TouchPhase},
    Config,
};

/// Target amount of updates per second, the delta passed to the scenes is relative to it.
const FRAMES_PER_SECOND: f32 = 60.0;

/// Create a window with an event loop and run the game until it's closed.
///
/// # Errors
///
/// - When the window or the render surface can't be created.
/// - When the builtin font can't be loaded.
pub(crate) fn run(config: Config) -> Result<()> {
    // Build the window builder with the event loop the user supplied
    let window_builder = WindowBuilder::new()
        .with_title(config.title.clone())
        // Apply scaling for the requested size
        .with_inner_size(LogicalSize::new(
            config.width as f32 * config.scaling,
            config.height as f32 * config.scaling,
        ));

    #[cfg(not(target_arch = "wasm32"))]
    {
        desktop::run(window_builder, config)
    }
    #[cfg(target_arch = "wasm32")]
    {
        web::run(window_builder, config)
    }
}

/// Everything the event loop owns.
struct GameLoop {
    /// Window the surface is attached to.
    window: Arc<Window>,
    /// Window sized surface.
    pixels: Pixels,
    /// Scenes and assets.
    director: Director,
    /// Stage the scenes draw on.
    canvas: Canvas,
    /// Where the stage is shown inside the window.
    letterbox: Letterbox,
    /// Mouse or first finger.
    pointer: Pointer,
    /// Size of the window and the surface buffer.
    window_size: PhysicalSize<u32>,
    /// Color of the bars outside of the stage.
    viewport_color: u32,
    /// When the previous frame was updated.
    last_update: Instant,
}

impl GameLoop {
    /// Setup the surface and the game for a window.
    async fn new(window: Window, config: Config) -> Result<Self> {
        let window = Arc::new(window);
        let window_size = window.inner_size();

        // The surface buffer has the size of the window, the stage is scaled into it manually
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.as_ref());
        let pixels = PixelsBuilder::new(
            window_size.width.max(1),
            window_size.height.max(1),
            surface_texture,
        )
        .clear_color(Color::BLACK)
        .blend_state(BlendState::REPLACE)
        .build_async()
        .await
        .into_diagnostic()
        .wrap_err("Error setting up pixels buffer")?;

        let canvas = Canvas::new(config.width, config.height);
        let letterbox = fit(&canvas, window_size);
        let viewport_color = config.viewport_color;

        let director = Director::new(config, AssetSource::platform(), KiraBackend::new())
            .wrap_err("Error setting up the game")?;

        Ok(Self {
            window,
            pixels,
            director,
            canvas,
            letterbox,
            pointer: Pointer::default(),
            window_size,
            viewport_color,
            last_update: Instant::now(),
        })
    }

    /// Handle a single winit event.
    fn handle(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { event, .. } => self.handle_window_event(event, elwt),
            Event::AboutToWait => self.window.request_redraw(),
            _ => (),
        }
    }

    /// Handle an event of the game window.
    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Occluded(occluded) => self.director.visibility_changed(occluded),
            WindowEvent::CursorMoved { position, .. } => {
                let event = self.pointer.moved(
                    Vec2::new(position.x as f32, position.y as f32),
                    &self.letterbox,
                );
                self.pointer_event(event);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let event = self.pointer.button(state == ElementState::Pressed);
                self.pointer_event(event);
            }
            WindowEvent::Touch(touch) => {
                let phase = match touch.phase {
                    winit::event::TouchPhase::Started => TouchPhase::Started,
                    winit::event::TouchPhase::Moved => TouchPhase::Moved,
                    winit::event::TouchPhase::Ended | winit::event::TouchPhase::Cancelled => {
                        TouchPhase::Ended
                    }
                };

                let event = self.pointer.touch(
                    touch.id,
                    phase,
                    Vec2::new(touch.location.x as f32, touch.location.y as f32),
                    &self.letterbox,
                );
                self.pointer_event(event);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.frame() {
                    log::error!("Error rendering frame, stopping: {err:?}");
                    elwt.exit();
                }
            }
            _ => (),
        }
    }

    /// Forward a pointer event to the scenes.
    fn pointer_event(&mut self, event: Option<PointerEvent>) {
        if let Some(event) = event {
            self.director.handle_pointer(&event);
        }
    }

    /// Resize the surface and fit the stage in it again.
    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.letterbox = fit(&self.canvas, size);

        // Minimized
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.window_size = size;
        if let Err(err) = self
            .pixels
            .resize_surface(size.width, size.height)
            .and_then(|()| self.pixels.resize_buffer(size.width, size.height))
        {
            log::error!("Error resizing surface: {err}");
        }

        // On MacOS the window needs to be redrawn manually after resizing
        self.window.request_redraw();
    }

    /// Update and draw a single frame.
    fn frame(&mut self) -> Result<()> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update).as_secs_f32() * FRAMES_PER_SECOND;
        self.last_update = now;

        {
            profiling::scope!("Update");

            self.director.update(delta);
        }

        {
            profiling::scope!("Render");

            self.director.render(&mut self.canvas);
            self.canvas.present(
                self.pixels.frame_mut(),
                self.window_size.width,
                self.window_size.height,
                &self.letterbox,
                self.viewport_color,
            );

            self.pixels
                .render()
                .into_diagnostic()
                .wrap_err("Error rendering pixels")?;
        }

        // Tell the profiler we've executed a tick
        profiling::finish_frame!();

        Ok(())
    }
}

/// Open the event loop and return the handler for all events.
async fn start(
    window_builder: WindowBuilder,
    config: Config,
) -> Result<(
    EventLoop<()>,
    impl FnMut(Event<()>, &EventLoopWindowTarget<()>) + 'static,
)> {
    let event_loop = EventLoop::new()
        .into_diagnostic()
        .wrap_err("Error setting up event loop for window")?;

    #[cfg(target_arch = "wasm32")]
    let window_builder = web::attach_canvas(window_builder)?;

    let window = window_builder
        .build(&event_loop)
        .into_diagnostic()
        .wrap_err("Error setting up window")?;

    let mut game_loop = GameLoop::new(window, config).await?;

    #[cfg(target_arch = "wasm32")]
    let visibility = web::watch_page()?;

    log::debug!("Opening window with game loop");

    // Set the event loop to polling so we don't have to wait for new events to draw new frames
    event_loop.set_control_flow(ControlFlow::Poll);

    Ok((event_loop, move |event, elwt: &EventLoopWindowTarget<()>| {
        #[cfg(target_arch = "wasm32")]
        if let Some(hidden) = visibility.take() {
            game_loop.director.visibility_changed(hidden);
        }

        game_loop.handle(event, elwt);
    }))
}

/// Fit the stage in a window.
fn fit(canvas: &Canvas, size: PhysicalSize<u32>) -> Letterbox {
    Letterbox::fit(
        canvas.width() as f32,
        canvas.height() as f32,
        size.width as f32,
        size.height as f32,
    )
}
