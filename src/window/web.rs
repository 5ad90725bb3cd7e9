//! Setting up a canvas in the browser page.

use std::{cell::Cell, rc::Rc};

use miette::{IntoDiagnostic, Result, WrapErr};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Event, HtmlCanvasElement};
use winit::{
    platform::web::{EventLoopExtWebSys, WindowBuilderExtWebSys},
    window::WindowBuilder,
};

use crate::{browser::Browser, error::Error, Config};

/// Web implementation of opening a window, returns immediately and keeps running in the browser.
pub(crate) fn run(window_builder: WindowBuilder, config: Config) -> Result<()> {
    // Show logs
    console_log::init_with_level(log::Level::Debug)
        .into_diagnostic()
        .wrap_err("Error setting up logger")?;

    // Show panics in the browser console log
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    // Web window function is async, so we need to spawn it into a local async runtime
    wasm_bindgen_futures::spawn_local(async {
        match super::start(window_builder, config).await {
            Ok((event_loop, handler)) => event_loop.spawn(handler),
            Err(err) => log::error!("Error opening web window: {err:?}"),
        }
    });

    Ok(())
}

/// Create a canvas covering the page and let the window draw on it.
pub(crate) fn attach_canvas(window_builder: WindowBuilder) -> Result<WindowBuilder> {
    let document = document()?;
    let body = document
        .body()
        .ok_or_else(|| miette::miette!("Error finding web body"))?;

    let canvas = document
        .create_element("canvas")
        .map_err(|err| miette::miette!("Error creating canvas: {err:?}"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|err| miette::miette!("Error casting canvas: {err:?}"))?;
    canvas.set_id("canvas");

    // The stage is letterboxed inside the canvas, so the canvas fills the page
    canvas
        .style()
        .set_css_text("display: block; width: 100vw; height: 100vh; touch-action: none");
    body.append_child(&canvas)
        .map_err(|err| miette::miette!("Error appending canvas to body: {err:?}"))?;

    // Long presses shouldn't open a menu
    listen(&canvas, "contextmenu", |event: Event| event.prevent_default())?;

    let browser = browser();
    log::debug!("Detected browser {browser:?}");

    if browser.wants_fullscreen() {
        request_fullscreen_on_gesture(&document)?;
    }

    Ok(window_builder.with_canvas(Some(canvas)))
}

/// Listen for the page being hidden or shown again.
///
/// # Returns
///
/// - Latest visibility change that hasn't been handled yet, `true` when hidden.
pub(crate) fn watch_page() -> Result<Rc<Cell<Option<bool>>>> {
    let document = document()?;
    let browser = browser();

    let event_name = if browser.uses_webkit_visibility() {
        "webkitvisibilitychange"
    } else {
        "visibilitychange"
    };

    let visibility = Rc::new(Cell::new(None));
    {
        let visibility = Rc::clone(&visibility);
        let target = document.clone();
        listen(&document, event_name, move |_event: Event| {
            visibility.set(Some(target.hidden()));
        })?;
    }

    Ok(visibility)
}

/// Go fullscreen on the first touch, or click when touch is not supported.
fn request_fullscreen_on_gesture(document: &Document) -> Result<()> {
    let body = document
        .body()
        .ok_or_else(|| miette::miette!("Error finding web body"))?;

    let has_touch = web_sys::window().is_some_and(|window| window.navigator().max_touch_points() > 0);
    let event_name = if has_touch { "touchend" } else { "mousedown" };

    let target = body.clone();
    listen(&body, event_name, move |_event: Event| {
        if let Err(err) = target.request_fullscreen() {
            log::warn!(
                "{}",
                Error::UnsupportedEnvironment(format!("fullscreen request failed: {err:?}"))
            );
        }
    })
}

/// Register a callback for a DOM event that lives as long as the page.
fn listen(
    target: &web_sys::EventTarget,
    event_name: &str,
    callback: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(callback);

    target
        .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        .map_err(|err| miette::miette!("Error listening for '{event_name}': {err:?}"))?;

    // Keep the callback alive for the rest of the page
    closure.forget();

    Ok(())
}

/// Browser family running the game.
fn browser() -> Browser {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .map_or(Browser::Unknown, |user_agent| {
            Browser::from_user_agent(&user_agent)
        })
}

/// Document of the page.
fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| miette::miette!("Error finding web document"))
}
