//! In-memory stand-ins for the browser used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::frame::FrameSource;
use crate::gpu::{GraphicsBackend, ShaderStage};
use crate::shader::POSITION_ATTRIBUTE;
use crate::surface::{DrawingSurface, ViewportSource};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage),
    Source(ShaderStage, String),
    Compile(ShaderStage),
    CreateProgram,
    Attach(ShaderStage),
    Link,
    UseProgram,
    CreateBuffer,
    Upload(Vec<f32>),
    EnableAttrib { index: u32, components: i32 },
    Uniform1 { name: String, value: f32 },
    Uniform2 { name: String, x: f32, y: f32 },
    Viewport(u32, u32),
    Draw { first: i32, count: i32 },
}

impl Call {
    pub fn creates_object(&self) -> bool {
        matches!(
            self,
            Call::CreateShader(_) | Call::CreateProgram | Call::CreateBuffer | Call::Upload(_)
        )
    }
}

/// The calls between one `viewport` and the `draw` that ends the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub viewport: (u32, u32),
    pub uniforms: Vec<Call>,
    pub draw: (i32, i32),
}

impl FrameRecord {
    pub fn uniform1(&self, wanted: &str) -> Option<f32> {
        self.uniforms.iter().find_map(|c| match c {
            Call::Uniform1 { name, value } if name == wanted => Some(*value),
            _ => None,
        })
    }

    pub fn uniform2(&self, wanted: &str) -> Option<(f32, f32)> {
        self.uniforms.iter().find_map(|c| match c {
            Call::Uniform2 { name, x, y } if name == wanted => Some((*x, *y)),
            _ => None,
        })
    }
}

#[derive(Default)]
struct BackendState {
    calls: Vec<Call>,
    failing_compile: Option<(ShaderStage, String)>,
    failing_link: Option<String>,
    missing_uniforms: Vec<String>,
    no_attribute: bool,
    no_objects: bool,
}

/// Records every GL call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    state: Rc<RefCell<BackendState>>,
}

impl RecordingBackend {
    pub fn failing_compile(self, stage: ShaderStage, log: &str) -> Self {
        self.state.borrow_mut().failing_compile = Some((stage, log.to_string()));
        self
    }

    pub fn failing_link(self, log: &str) -> Self {
        self.state.borrow_mut().failing_link = Some(log.to_string());
        self
    }

    pub fn without_uniform(self, name: &str) -> Self {
        self.state.borrow_mut().missing_uniforms.push(name.to_string());
        self
    }

    pub fn without_attribute(self) -> Self {
        self.state.borrow_mut().no_attribute = true;
        self
    }

    pub fn without_objects(self) -> Self {
        self.state.borrow_mut().no_objects = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn viewports(&self) -> Vec<(u32, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Viewport(w, h) => Some((w, h)),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<(i32, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Draw { first, count } => Some((first, count)),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> Vec<FrameRecord> {
        let mut frames = Vec::new();
        let mut current: Option<FrameRecord> = None;
        for call in self.calls() {
            match call {
                Call::Viewport(w, h) => {
                    current = Some(FrameRecord {
                        viewport: (w, h),
                        uniforms: Vec::new(),
                        draw: (0, 0),
                    });
                }
                Call::Uniform1 { .. } | Call::Uniform2 { .. } => {
                    if let Some(frame) = current.as_mut() {
                        frame.uniforms.push(call);
                    }
                }
                Call::Draw { first, count } => {
                    if let Some(mut frame) = current.take() {
                        frame.draw = (first, count);
                        frames.push(frame);
                    }
                }
                _ => {}
            }
        }
        frames
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GraphicsBackend for RecordingBackend {
    type Shader = ShaderStage;
    type Program = ();
    type Buffer = ();
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderStage> {
        self.record(Call::CreateShader(stage));
        (!self.state.borrow().no_objects).then_some(stage)
    }

    fn shader_source(&self, shader: &ShaderStage, source: &str) {
        self.record(Call::Source(*shader, source.to_string()));
    }

    fn compile_shader(&self, shader: &ShaderStage) {
        self.record(Call::Compile(*shader));
    }

    fn compile_status(&self, shader: &ShaderStage) -> bool {
        !matches!(&self.state.borrow().failing_compile, Some((stage, _)) if stage == shader)
    }

    fn shader_info_log(&self, shader: &ShaderStage) -> Option<String> {
        match &self.state.borrow().failing_compile {
            Some((stage, log)) if stage == shader => Some(log.clone()),
            _ => None,
        }
    }

    fn create_program(&self) -> Option<()> {
        self.record(Call::CreateProgram);
        (!self.state.borrow().no_objects).then_some(())
    }

    fn attach_shader(&self, _program: &(), shader: &ShaderStage) {
        self.record(Call::Attach(*shader));
    }

    fn link_program(&self, _program: &()) {
        self.record(Call::Link);
    }

    fn link_status(&self, _program: &()) -> bool {
        self.state.borrow().failing_link.is_none()
    }

    fn program_info_log(&self, _program: &()) -> Option<String> {
        self.state.borrow().failing_link.clone()
    }

    fn use_program(&self, _program: &()) {
        self.record(Call::UseProgram);
    }

    fn create_buffer(&self) -> Option<()> {
        self.record(Call::CreateBuffer);
        (!self.state.borrow().no_objects).then_some(())
    }

    fn upload_static_vertices(&self, _buffer: &(), data: &[f32]) {
        self.record(Call::Upload(data.to_vec()));
    }

    fn attrib_location(&self, _program: &(), name: &str) -> Option<u32> {
        (name == POSITION_ATTRIBUTE && !self.state.borrow().no_attribute).then_some(0)
    }

    fn enable_float_attrib(&self, index: u32, components: i32) {
        self.record(Call::EnableAttrib { index, components });
    }

    fn uniform_location(&self, _program: &(), name: &str) -> Option<String> {
        let missing = self.state.borrow().missing_uniforms.iter().any(|m| m == name);
        (!missing).then(|| name.to_string())
    }

    fn uniform1f(&self, location: &String, value: f32) {
        self.record(Call::Uniform1 {
            name: location.clone(),
            value,
        });
    }

    fn uniform2f(&self, location: &String, x: f32, y: f32) {
        self.record(Call::Uniform2 {
            name: location.clone(),
            x,
            y,
        });
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(Call::Draw { first, count });
    }
}

/// A canvas-like surface. Clones share the same size.
#[derive(Clone, Default)]
pub struct FakeSurface {
    size: Rc<Cell<(u32, u32)>>,
    set_calls: Rc<Cell<usize>>,
}

impl FakeSurface {
    pub fn with_size(width: u32, height: u32) -> Self {
        let surface = Self::default();
        surface.size.set((width, height));
        surface
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.get()
    }
}

impl DrawingSurface for FakeSurface {
    fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    fn set_size(&self, width: u32, height: u32) {
        self.size.set((width, height));
        self.set_calls.set(self.set_calls.get() + 1);
    }
}

/// A window whose inner size tests can change.
#[derive(Clone)]
pub struct FakeViewport {
    size: Rc<Cell<Option<(u32, u32)>>>,
}

impl FakeViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Rc::new(Cell::new(Some((width, height)))),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            size: Rc::new(Cell::new(None)),
        }
    }

    pub fn set(&self, width: u32, height: u32) {
        self.size.set(Some((width, height)));
    }
}

impl ViewportSource for FakeViewport {
    fn viewport_size(&self) -> Option<(u32, u32)> {
        self.size.get()
    }
}

/// Hands out a fixed list of timestamps, then fails.
pub struct ScriptedFrames {
    stamps: VecDeque<f64>,
}

impl ScriptedFrames {
    pub fn new(stamps: impl IntoIterator<Item = f64>) -> Self {
        Self {
            stamps: stamps.into_iter().collect(),
        }
    }
}

impl FrameSource for ScriptedFrames {
    type Error = &'static str;

    async fn next_frame(&mut self) -> Result<f64, Self::Error> {
        self.stamps.pop_front().ok_or("no more frames")
    }
}
