use glimmer_shader::SourceError;

use crate::driver::ShaderStage;

/// Failures of object creation, shader compilation and program linking.
#[derive(Debug, thiserror::Error)]
pub enum GlError {
    #[error("failed to create {object}: {reason}")]
    Create { object: &'static str, reason: String },

    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link shader program:\n{log}")]
    Link { log: String },

    #[error("uniform `{0}` not found in shader program")]
    UniformNotFound(String),

    #[error("{object} is too large: {len} elements")]
    TooLarge { object: &'static str, len: usize },

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl GlError {
    pub(crate) fn create(object: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| GlError::Create { object, reason }
    }
}
