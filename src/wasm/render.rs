use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, WebGlRenderingContext as GL, Window};

use super::webgl::AnimationFrames;
use crate::bootstrap::bootstrap;
use crate::frame;
use crate::params::LightningParams;
use crate::surface::SurfaceManager;

/// Sizes the canvas, builds the lightning program, and starts the frame loop.
///
/// Returns `Ok` without drawing when WebGL is unavailable; the user has been
/// alerted by then.
pub fn start(window: Window, canvas: HtmlCanvasElement, params: LightningParams) -> Result<(), JsValue> {
    let performance = window.performance().ok_or("no performance timer")?;
    let surface = SurfaceManager::new(canvas.clone(), window.clone());

    let driver = bootstrap(
        surface,
        |manager| subscribe_resize(&window, manager),
        || canvas.get_context("webgl").ok().flatten()?.dyn_into::<GL>().ok(),
        |message| {
            if let Err(err) = window.alert_with_message(message) {
                log::error!("alert failed: {err:?}");
            }
        },
        params,
        || performance.now(),
    )?;

    if let Some(driver) = driver {
        let frames = AnimationFrames::new(window, performance);
        spawn_local(async move {
            frame::run(driver, frames).await;
        });
    }
    Ok(())
}

/// Resizes the canvas on every window `resize` event for the rest of the page's life.
pub fn subscribe_resize(
    window: &Window,
    surface: SurfaceManager<HtmlCanvasElement, Window>,
) -> Result<(), JsValue> {
    let resize_closure = Closure::wrap(Box::new(move || surface.resize()) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();
    Ok(())
}
