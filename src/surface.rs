//! Keeps the drawing surface's pixel size in step with the host viewport.

/// Something with a pixel backing store whose size can be read and set.
pub trait DrawingSurface {
    fn size(&self) -> (u32, u32);
    fn set_size(&self, width: u32, height: u32);
}

/// Reports the current viewport size, or `None` if it can't be determined.
pub trait ViewportSource {
    fn viewport_size(&self) -> Option<(u32, u32)>;
}

pub struct SurfaceManager<S, V> {
    surface: S,
    viewport: V,
}

impl<S: DrawingSurface, V: ViewportSource> SurfaceManager<S, V> {
    pub fn new(surface: S, viewport: V) -> Self {
        Self { surface, viewport }
    }

    /// Copies the viewport size onto the surface. Runs once at startup and on
    /// every viewport change notification, without debouncing.
    pub fn resize(&self) {
        match self.viewport.viewport_size() {
            Some((width, height)) => {
                self.surface.set_size(width, height);
                log::trace!("surface resized to {width}x{height}");
            }
            None => log::warn!("viewport size unavailable; surface left at {:?}", self.surface.size()),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
