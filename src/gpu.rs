//! The slice of the WebGL API the renderer drives.
//!
//! Methods mirror the GL calls one-to-one so the policy (what to check, what to
//! log, what to skip) lives in [`crate::program`] and [`crate::frame`], not in
//! the backend.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

pub trait GraphicsBackend {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> Option<String>;
    fn use_program(&self, program: &Self::Program);

    fn create_buffer(&self) -> Option<Self::Buffer>;
    /// Binds `buffer` as the array buffer and uploads `data` with static usage.
    fn upload_static_vertices(&self, buffer: &Self::Buffer, data: &[f32]);

    /// Returns `None` when the program has no active attribute of that name.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    /// Enables `index` and describes it as `components` tightly packed,
    /// non-normalized floats starting at offset 0 of the bound buffer.
    fn enable_float_attrib(&self, index: u32, components: i32);

    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    fn uniform1f(&self, location: &Self::UniformLocation, value: f32);
    fn uniform2f(&self, location: &Self::UniformLocation, x: f32, y: f32);

    fn viewport(&self, width: u32, height: u32);
    fn draw_triangles(&self, first: i32, count: i32);
}
