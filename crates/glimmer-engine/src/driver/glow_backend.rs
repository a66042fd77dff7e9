use std::ffi::{CStr, c_void};

use glow::HasContext;

use super::{
    BufferId, BufferTarget, GlDriver, Primitive, ProgramId, ShaderId, ShaderStage,
    UniformLocation, VertexArrayId,
};

type ValidateProgramFn = unsafe extern "system" fn(program: u32);
type GetProgramivFn = unsafe extern "system" fn(program: u32, pname: u32, params: *mut i32);

/// Program validation entry points, which `glow` does not wrap.
struct Validation {
    validate_program: ValidateProgramFn,
    get_programiv: GetProgramivFn,
}

impl Validation {
    /// # Safety
    ///
    /// `loader` must resolve symbols for the current GL context.
    unsafe fn load(loader: &mut impl FnMut(&CStr) -> *const c_void) -> Option<Self> {
        let validate_program = loader(c"glValidateProgram");
        let get_programiv = loader(c"glGetProgramiv");
        if validate_program.is_null() || get_programiv.is_null() {
            return None;
        }
        // SAFETY: non-null pointers returned for these names have the GL
        // signatures declared above.
        unsafe {
            Some(Self {
                validate_program: std::mem::transmute::<*const c_void, ValidateProgramFn>(
                    validate_program,
                ),
                get_programiv: std::mem::transmute::<*const c_void, GetProgramivFn>(get_programiv),
            })
        }
    }
}

/// [`GlDriver`] backed by a loaded `glow` context.
///
/// Construct only after the GL context has been made current (see
/// [`crate::device::Gpu::load_gl`]); the context must stay current while this
/// value is alive.
pub struct GlowDriver {
    gl: glow::Context,
    validation: Option<Validation>,
}

impl GlowDriver {
    /// Loads all entry points through `loader`.
    ///
    /// # Safety
    ///
    /// The GL context must be current on this thread and `loader` must resolve
    /// symbols for it.
    pub unsafe fn load(mut loader: impl FnMut(&CStr) -> *const c_void) -> Self {
        let validation = unsafe { Validation::load(&mut loader) };
        if validation.is_none() {
            log::warn!("glValidateProgram unavailable; shader programs will not be validated");
        }
        let gl = unsafe { glow::Context::from_loader_function_cstr(loader) };
        Self { gl, validation }
    }
}

fn target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn primitive(mode: Primitive) -> u32 {
    match mode {
        Primitive::Triangles => glow::TRIANGLES,
    }
}

fn buffer(id: BufferId) -> glow::Buffer {
    glow::NativeBuffer(id.0)
}

fn vertex_array(id: VertexArrayId) -> glow::VertexArray {
    glow::NativeVertexArray(id.0)
}

fn shader(id: ShaderId) -> glow::Shader {
    glow::NativeShader(id.0)
}

fn program(id: ProgramId) -> glow::Program {
    glow::NativeProgram(id.0)
}

// SAFETY (all blocks below): `GlowDriver` is only constructed from a context that
// is current on this thread, and every handle passed in was issued by the same
// context through this driver.
impl GlDriver for GlowDriver {
    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn version_string(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }

    fn create_buffer(&self) -> Result<BufferId, String> {
        unsafe { self.gl.create_buffer() }.map(|b| BufferId(b.0))
    }

    fn bind_buffer(&self, t: BufferTarget, id: Option<BufferId>) {
        unsafe { self.gl.bind_buffer(target(t), id.map(buffer)) }
    }

    fn buffer_data(&self, t: BufferTarget, data: &[u8]) {
        unsafe { self.gl.buffer_data_u8_slice(target(t), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, id: BufferId) {
        unsafe { self.gl.delete_buffer(buffer(id)) }
    }

    fn create_vertex_array(&self) -> Result<VertexArrayId, String> {
        unsafe { self.gl.create_vertex_array() }.map(|v| VertexArrayId(v.0))
    }

    fn bind_vertex_array(&self, id: Option<VertexArrayId>) {
        unsafe { self.gl.bind_vertex_array(id.map(vertex_array)) }
    }

    fn delete_vertex_array(&self, id: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(vertex_array(id)) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        components: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, normalized, stride, offset)
        }
    }

    fn create_shader(&self, s: ShaderStage) -> Result<ShaderId, String> {
        unsafe { self.gl.create_shader(stage(s)) }.map(|sh| ShaderId(sh.0))
    }

    fn shader_source(&self, id: ShaderId, source: &str) {
        unsafe { self.gl.shader_source(shader(id), source) }
    }

    fn compile_shader(&self, id: ShaderId) {
        unsafe { self.gl.compile_shader(shader(id)) }
    }

    fn shader_compile_status(&self, id: ShaderId) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader(id)) }
    }

    fn shader_info_log(&self, id: ShaderId) -> String {
        unsafe { self.gl.get_shader_info_log(shader(id)) }
    }

    fn delete_shader(&self, id: ShaderId) {
        unsafe { self.gl.delete_shader(shader(id)) }
    }

    fn create_program(&self) -> Result<ProgramId, String> {
        unsafe { self.gl.create_program() }.map(|p| ProgramId(p.0))
    }

    fn attach_shader(&self, p: ProgramId, s: ShaderId) {
        unsafe { self.gl.attach_shader(program(p), shader(s)) }
    }

    fn detach_shader(&self, p: ProgramId, s: ShaderId) {
        unsafe { self.gl.detach_shader(program(p), shader(s)) }
    }

    fn link_program(&self, p: ProgramId) {
        unsafe { self.gl.link_program(program(p)) }
    }

    fn program_link_status(&self, p: ProgramId) -> bool {
        unsafe { self.gl.get_program_link_status(program(p)) }
    }

    fn validate_program(&self, p: ProgramId) {
        if let Some(validation) = &self.validation {
            unsafe { (validation.validate_program)(p.get()) }
        }
    }

    /// Reports success when validation is unavailable.
    fn program_validate_status(&self, p: ProgramId) -> bool {
        let Some(validation) = &self.validation else {
            return true;
        };
        let mut status: i32 = 0;
        unsafe { (validation.get_programiv)(p.get(), glow::VALIDATE_STATUS, &mut status) };
        status != 0
    }

    fn program_info_log(&self, p: ProgramId) -> String {
        unsafe { self.gl.get_program_info_log(program(p)) }
    }

    fn use_program(&self, p: Option<ProgramId>) {
        unsafe { self.gl.use_program(p.map(program)) }
    }

    fn delete_program(&self, p: ProgramId) {
        unsafe { self.gl.delete_program(program(p)) }
    }

    fn uniform_location(&self, p: ProgramId, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(program(p), name) }.map(|l| UniformLocation(l.0))
    }

    fn uniform_4f(&self, location: UniformLocation, [x, y, z, w]: [f32; 4]) {
        let location = glow::NativeUniformLocation(location.0);
        unsafe { self.gl.uniform_4_f32(Some(&location), x, y, z, w) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_elements(&self, mode: Primitive, count: i32, offset: i32) {
        unsafe { self.gl.draw_elements(primitive(mode), count, glow::UNSIGNED_INT, offset) }
    }
}
