//! Fullscreen procedural lightning rendered with a WebGL fragment shader.
//!
//! The renderer core ([`program`], [`frame`], [`surface`]) is written against
//! small host traits so it runs the same in the browser and in unit tests.

pub mod bootstrap;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod params;
pub mod program;
pub mod shader;
pub mod surface;

#[cfg(test)]
mod testing;

pub use error::{ParamError, RenderError};
pub use params::LightningParams;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, UrlSearchParams, Window};

    use crate::params::LightningParams;

    pub mod render;
    pub mod webgl;

    pub const CANVAS_ID: &str = "lightningCanvas";
    const PARAM_KEYS: [&str; 4] = ["hue", "speed", "intensity", "size"];

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(CANVAS_ID) else {
            log::warn!("no #{CANVAS_ID} canvas on this page; nothing to render");
            return Ok(());
        };
        let canvas = element.dyn_into::<HtmlCanvasElement>()?;

        let params = params_from_location(&window);
        render::start(window, canvas, params)
    }

    /// Reads `?hue=..&speed=..&intensity=..&size=..` overrides from the page URL.
    pub fn params_from_location(window: &Window) -> LightningParams {
        let search = window.location().search().unwrap_or_default();
        let query = match UrlSearchParams::new_with_str(&search) {
            Ok(query) => query,
            Err(err) => {
                log::warn!("unreadable query string {search:?}: {err:?}");
                return LightningParams::default();
            }
        };
        let pairs = PARAM_KEYS
            .iter()
            .filter_map(|key| query.get(key).map(|value| (*key, value)));
        let (params, errors) = LightningParams::default().with_overrides(pairs);
        for err in errors {
            log::warn!("ignoring parameter: {err}");
        }
        params
    }
}
