//! Per-frame uniform update and draw, and the loop that repeats it.

use std::fmt::Debug;

use crate::gpu::GraphicsBackend;
use crate::params::LightningParams;
use crate::program::Pipeline;
use crate::shader::QUAD_VERTEX_COUNT;
use crate::surface::DrawingSurface;

const STATS_INTERVAL: u64 = 600;

/// Seconds since the first frame. Never negative and never goes backwards,
/// whatever the host timestamps do.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start_ms: f64,
    last_secs: f64,
}

impl FrameClock {
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            start_ms,
            last_secs: 0.0,
        }
    }

    pub fn elapsed_secs(&mut self, now_ms: f64) -> f64 {
        let secs = ((now_ms - self.start_ms) / 1000.0).max(self.last_secs);
        self.last_secs = secs;
        secs
    }
}

/// The values pushed to the shader for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub hue: f32,
    pub speed: f32,
    pub intensity: f32,
    pub size: f32,
}

/// Everything a frame needs, created once at startup.
pub struct RendererContext<B: GraphicsBackend, S> {
    pub gl: B,
    pub surface: S,
    pub pipeline: Pipeline<B>,
    pub params: LightningParams,
}

enum DriverState {
    NotStarted,
    Running { clock: FrameClock, frames: u64 },
}

pub struct FrameDriver<B: GraphicsBackend, S> {
    context: RendererContext<B, S>,
    state: DriverState,
}

impl<B: GraphicsBackend, S: DrawingSurface> FrameDriver<B, S> {
    pub fn new(context: RendererContext<B, S>) -> Self {
        Self {
            context,
            state: DriverState::NotStarted,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Captures the clock start and draws the first frame. Only the first call
    /// has any effect.
    pub fn start(&mut self, now_ms: f64) -> Option<FrameUniforms> {
        if self.is_running() {
            log::warn!("frame driver already running; start ignored");
            return None;
        }
        self.state = DriverState::Running {
            clock: FrameClock::starting_at(now_ms),
            frames: 0,
        };
        self.frame(now_ms)
    }

    /// Draws one frame at host time `now_ms`. Does nothing before [`start`].
    ///
    /// [`start`]: FrameDriver::start
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameUniforms> {
        let DriverState::Running { clock, frames } = &mut self.state else {
            return None;
        };
        let elapsed = clock.elapsed_secs(now_ms);
        *frames += 1;
        if *frames % STATS_INTERVAL == 0 {
            log::info!("frame {frames} at {elapsed:.2}s");
        }
        Some(draw(&self.context, elapsed as f32))
    }
}

fn draw<B: GraphicsBackend, S: DrawingSurface>(
    ctx: &RendererContext<B, S>,
    elapsed: f32,
) -> FrameUniforms {
    let (width, height) = ctx.surface.size();
    let params = ctx.params;
    let values = FrameUniforms {
        resolution: [width as f32, height as f32],
        time: elapsed,
        hue: params.hue,
        speed: params.speed,
        intensity: params.intensity,
        size: params.size,
    };

    let gl = &ctx.gl;
    let slots = &ctx.pipeline.uniforms;
    gl.viewport(width, height);
    if let Some(location) = &slots.resolution {
        gl.uniform2f(location, values.resolution[0], values.resolution[1]);
    }
    for (slot, value) in [
        (&slots.time, values.time),
        (&slots.hue, values.hue),
        (&slots.speed, values.speed),
        (&slots.intensity, values.intensity),
        (&slots.size, values.size),
    ] {
        if let Some(location) = slot {
            gl.uniform1f(location, value);
        }
    }
    gl.draw_triangles(0, QUAD_VERTEX_COUNT);

    values
}

/// The host's "next display refresh" primitive.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    type Error: Debug;

    /// Resolves at the next refresh with the current host time in milliseconds.
    async fn next_frame(&mut self) -> Result<f64, Self::Error>;
}

/// Draws a frame on every refresh, forever. Returns only if the host stops
/// handing out frames.
pub async fn run<B, S, F>(mut driver: FrameDriver<B, S>, mut source: F) -> F::Error
where
    B: GraphicsBackend,
    S: DrawingSurface,
    F: FrameSource,
{
    loop {
        match source.next_frame().await {
            Ok(now_ms) => {
                driver.frame(now_ms);
            }
            Err(err) => {
                log::error!("frame scheduling failed, render loop stopped: {err:?}");
                return err;
            }
        }
    }
}
