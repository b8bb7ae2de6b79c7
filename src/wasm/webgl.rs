//! Browser implementations of the renderer's host traits.

use js_sys::{Float32Array, Promise};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    HtmlCanvasElement, Performance, WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL,
    WebGlShader, WebGlUniformLocation, Window,
};

use crate::frame::FrameSource;
use crate::gpu::{GraphicsBackend, ShaderStage};
use crate::surface::{DrawingSurface, ViewportSource};

impl GraphicsBackend for GL {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        GL::create_shader(self, kind)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        GL::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        GL::compile_shader(self, shader);
    }

    fn compile_status(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        GL::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        GL::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        GL::link_program(self, program);
    }

    fn link_status(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: &WebGlProgram) {
        GL::use_program(self, Some(program));
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        GL::create_buffer(self)
    }

    fn upload_static_vertices(&self, buffer: &WebGlBuffer, data: &[f32]) {
        self.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        // Copies into JS memory; the wasm heap may move after this call.
        let array = Float32Array::from(data);
        self.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        u32::try_from(self.get_attrib_location(program, name)).ok()
    }

    fn enable_float_attrib(&self, index: u32, components: i32) {
        self.enable_vertex_attrib_array(index);
        self.vertex_attrib_pointer_with_i32(index, components, GL::FLOAT, false, 0, 0);
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform1f(&self, location: &WebGlUniformLocation, value: f32) {
        GL::uniform1f(self, Some(location), value);
    }

    fn uniform2f(&self, location: &WebGlUniformLocation, x: f32, y: f32) {
        GL::uniform2f(self, Some(location), x, y);
    }

    fn viewport(&self, width: u32, height: u32) {
        GL::viewport(self, 0, 0, width as i32, height as i32);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_arrays(GL::TRIANGLES, first, count);
    }
}

impl DrawingSurface for HtmlCanvasElement {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn set_size(&self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }
}

impl ViewportSource for Window {
    fn viewport_size(&self) -> Option<(u32, u32)> {
        let w = self.inner_width().ok()?.as_f64()?;
        let h = self.inner_height().ok()?.as_f64()?;
        Some((w.max(0.0) as u32, h.max(0.0) as u32))
    }
}

/// `requestAnimationFrame` as an awaitable; yields `performance.now()`.
pub struct AnimationFrames {
    window: Window,
    performance: Performance,
}

impl AnimationFrames {
    pub fn new(window: Window, performance: Performance) -> Self {
        Self {
            window,
            performance,
        }
    }
}

impl FrameSource for AnimationFrames {
    type Error = JsValue;

    async fn next_frame(&mut self) -> Result<f64, JsValue> {
        let mut scheduled = Ok(());
        let promise = Promise::new(&mut |resolve, _reject| {
            scheduled = self.window.request_animation_frame(&resolve).map(drop);
        });
        scheduled?;
        JsFuture::from(promise).await?;
        Ok(self.performance.now())
    }
}
