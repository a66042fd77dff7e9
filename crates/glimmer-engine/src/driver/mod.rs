//! Graphics driver boundary.
//!
//! [`GlDriver`] is the narrow set of GL entry points the engine issues. The
//! production implementation forwards to [`glow::Context`]; everything above this
//! module only sees the opaque handle types defined here.
//!
//! Handles are non-zero. The GL "zero object" is expressed as `None` wherever a
//! call accepts an optional handle.

mod glow_backend;

#[cfg(test)]
pub(crate) mod recording;

use std::num::NonZeroU32;

pub use glimmer_shader::Stage as ShaderStage;
pub use glow_backend::GlowDriver;

macro_rules! gl_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(pub(crate) NonZeroU32);

        impl $name {
            pub fn get(self) -> u32 {
                self.0.get()
            }
        }
    };
}

gl_handle!(
    /// Buffer object name.
    BufferId
);
gl_handle!(
    /// Vertex array object name.
    VertexArrayId
);
gl_handle!(
    /// Shader stage object name.
    ShaderId
);
gl_handle!(
    /// Program object name.
    ProgramId
);

/// Location of an active uniform within a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub(crate) u32);

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`: vertex attribute data.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`: index data.
    ElementArray,
}

/// Primitive topology for draw calls.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Primitive {
    Triangles,
}

/// GL entry points used by the engine.
///
/// Implementations assume the GL context they wrap is current on the calling
/// thread for as long as the implementation is alive.
pub trait GlDriver {
    /// Pops one flag from the driver error queue; `0` is `GL_NO_ERROR`.
    fn get_error(&self) -> u32;
    fn version_string(&self) -> String;

    fn create_buffer(&self) -> Result<BufferId, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    /// Uploads `data` to the buffer bound at `target` with `GL_STATIC_DRAW` usage.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferId);

    fn create_vertex_array(&self) -> Result<VertexArrayId, String>;
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>);
    fn delete_vertex_array(&self, vertex_array: VertexArrayId);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        components: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderId, String>;
    fn shader_source(&self, shader: ShaderId, source: &str);
    fn compile_shader(&self, shader: ShaderId);
    fn shader_compile_status(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&self, shader: ShaderId);

    fn create_program(&self) -> Result<ProgramId, String>;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&self, program: ProgramId, shader: ShaderId);
    fn link_program(&self, program: ProgramId);
    fn program_link_status(&self, program: ProgramId) -> bool;
    fn validate_program(&self, program: ProgramId);
    fn program_validate_status(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn use_program(&self, program: Option<ProgramId>);
    fn delete_program(&self, program: ProgramId);

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn uniform_4f(&self, location: UniformLocation, value: [f32; 4]);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color_buffer(&self);
    /// Draws `count` `u32` indices from the bound element buffer, starting at
    /// byte `offset`.
    fn draw_elements(&self, mode: Primitive, count: i32, offset: i32);
}
