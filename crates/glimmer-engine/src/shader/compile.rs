use crate::driver::{GlDriver, ShaderId, ShaderStage};
use crate::gl::GlError;
use crate::gl_call;

/// Creates and compiles one shader stage object.
///
/// On failure the compiler log is logged and returned, and the stage object is
/// deleted.
pub fn compile_stage(
    driver: &dyn GlDriver,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, GlError> {
    let id = gl_call!(driver, create_shader(stage)).map_err(GlError::create("shader stage"))?;

    gl_call!(driver, shader_source(id, source));
    gl_call!(driver, compile_shader(id));

    if gl_call!(driver, shader_compile_status(id)) {
        log::debug!("compiled {stage} shader {}", id.get());
        return Ok(id);
    }

    let log = gl_call!(driver, shader_info_log(id));
    log::error!("error compiling {stage} shader:\n{}", log.trim_end());
    gl_call!(driver, delete_shader(id));

    Err(GlError::Compile { stage, log })
}
