//! Compiles and links the lightning program and wires up its inputs.

use crate::error::RenderError;
use crate::gpu::{GraphicsBackend, ShaderStage};
use crate::shader::{
    FRAGMENT_SHADER_SOURCE, FULLSCREEN_QUAD, HUE_UNIFORM, INTENSITY_UNIFORM, POSITION_ATTRIBUTE,
    QUAD_COMPONENTS, RESOLUTION_UNIFORM, SIZE_UNIFORM, SPEED_UNIFORM, TIME_UNIFORM,
    VERTEX_SHADER_SOURCE,
};

/// Cached uniform handles. `None` means the linked program has no such
/// uniform; writes to it are skipped.
pub struct UniformSlots<L> {
    pub resolution: Option<L>,
    pub time: Option<L>,
    pub hue: Option<L>,
    pub speed: Option<L>,
    pub intensity: Option<L>,
    pub size: Option<L>,
}

/// The linked program, its quad buffer, and its uniform handles. Built once,
/// never replaced.
pub struct Pipeline<B: GraphicsBackend> {
    pub program: B::Program,
    pub vertex_buffer: B::Buffer,
    pub uniforms: UniformSlots<B::UniformLocation>,
    /// Compile and link problems seen while building; the program is still used.
    pub diagnostics: Vec<RenderError>,
}

/// Builds the pipeline from the fixed shader sources.
///
/// Compile and link failures are logged and recorded in
/// [`Pipeline::diagnostics`] but do not abort; a broken program simply draws
/// nothing useful. Null object handles from the backend do abort with
/// [`RenderError::MissingCapability`].
pub fn build<B: GraphicsBackend>(gl: &B) -> Result<Pipeline<B>, RenderError> {
    build_from_sources(gl, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
}

pub(crate) fn build_from_sources<B: GraphicsBackend>(
    gl: &B,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Pipeline<B>, RenderError> {
    let mut diagnostics = Vec::new();

    let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source, &mut diagnostics)?;
    let fragment = compile_stage(gl, ShaderStage::Fragment, fragment_source, &mut diagnostics)?;

    let program = gl
        .create_program()
        .ok_or(RenderError::MissingCapability("createProgram returned null"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    if !gl.link_status(&program) {
        let log = gl.program_info_log(&program).unwrap_or_default();
        log::error!("shader program failed to link: {log}");
        diagnostics.push(RenderError::ShaderLink { log });
    }
    gl.use_program(&program);

    let vertex_buffer = gl
        .create_buffer()
        .ok_or(RenderError::MissingCapability("createBuffer returned null"))?;
    gl.upload_static_vertices(&vertex_buffer, &FULLSCREEN_QUAD);

    match gl.attrib_location(&program, POSITION_ATTRIBUTE) {
        Some(index) => gl.enable_float_attrib(index, QUAD_COMPONENTS),
        None => log::warn!("attribute `{POSITION_ATTRIBUTE}` not found; quad will not be fed"),
    }

    let lookup = |name: &str| {
        let location = gl.uniform_location(&program, name);
        if location.is_none() {
            log::warn!("uniform `{name}` not found; writes to it will be skipped");
        }
        location
    };
    let uniforms = UniformSlots {
        resolution: lookup(RESOLUTION_UNIFORM),
        time: lookup(TIME_UNIFORM),
        hue: lookup(HUE_UNIFORM),
        speed: lookup(SPEED_UNIFORM),
        intensity: lookup(INTENSITY_UNIFORM),
        size: lookup(SIZE_UNIFORM),
    };

    log::info!("lightning program ready ({} diagnostics)", diagnostics.len());

    Ok(Pipeline {
        program,
        vertex_buffer,
        uniforms,
        diagnostics,
    })
}

fn compile_stage<B: GraphicsBackend>(
    gl: &B,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<RenderError>,
) -> Result<B::Shader, RenderError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(RenderError::MissingCapability("createShader returned null"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if !gl.compile_status(&shader) {
        let log = gl.shader_info_log(&shader).unwrap_or_default();
        log::error!("{stage} shader failed to compile: {log}");
        diagnostics.push(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}
