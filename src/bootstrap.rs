//! Startup sequence: size the surface, subscribe to resizes, acquire the
//! rendering context, build the program, and draw the first frame.

use crate::frame::{FrameDriver, RendererContext};
use crate::gpu::GraphicsBackend;
use crate::params::LightningParams;
use crate::program;
use crate::surface::{DrawingSurface, SurfaceManager, ViewportSource};

pub const NO_WEBGL_MESSAGE: &str = "WebGL not supported on your browser.";

/// Runs startup against host hooks and returns a running driver.
///
/// `Ok(None)` means nothing will ever be drawn: either the context is missing
/// (the user has been alerted once) or the program objects could not be
/// created. Only `subscribe_resize` can fail the call.
pub fn bootstrap<B, S, V, E>(
    surface: SurfaceManager<S, V>,
    subscribe_resize: impl FnOnce(SurfaceManager<S, V>) -> Result<(), E>,
    acquire_context: impl FnOnce() -> Option<B>,
    alert: impl FnOnce(&str),
    params: LightningParams,
    now_ms: impl FnOnce() -> f64,
) -> Result<Option<FrameDriver<B, S>>, E>
where
    B: GraphicsBackend,
    S: DrawingSurface + Clone,
    V: ViewportSource,
{
    surface.resize();
    let canvas = surface.surface().clone();
    subscribe_resize(surface)?;

    let Some(gl) = acquire_context() else {
        log::error!("no rendering context available");
        alert(NO_WEBGL_MESSAGE);
        return Ok(None);
    };

    let pipeline = match program::build(&gl) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            log::error!("renderer setup failed: {err}");
            return Ok(None);
        }
    };

    let mut driver = FrameDriver::new(RendererContext {
        gl,
        surface: canvas,
        pipeline,
        params,
    });
    driver.start(now_ms());
    log::info!("lightning running with {params:?}");
    Ok(Some(driver))
}
