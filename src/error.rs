use thiserror::Error;

use crate::gpu::ShaderStage;

/// Failures surfaced while bringing the renderer up.
///
/// Only [`RenderError::MissingCapability`] stops startup; compile and link
/// failures are reported through the log and the program is used as-is.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("missing rendering capability: {0}")]
    MissingCapability(&'static str),
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {log}")]
    ShaderLink { log: String },
}

/// A rejected visual parameter override.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("`{key}` is not a number: {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("`{key}` must be finite, got {value}")]
    NotFinite { key: &'static str, value: f32 },
    #[error("`{key}` must not be negative, got {value}")]
    Negative { key: &'static str, value: f32 },
}
