use std::path::Path;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glimmer_shader::ShaderSource;

use crate::buffer::{IndexBuffer, VertexBuffer};
use crate::driver::{Primitive, UniformLocation};
use crate::gl::{GlContext, GlError};
use crate::gl_call;
use crate::paint::Color;
use crate::shader::Program;
use crate::vertex::{VertexArray, VertexLayout};

/// 2-D clip-space vertex position.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub xy: [f32; 2],
}

/// Corners of a unit quad centered on the origin, counter-clockwise from
/// bottom-left.
pub const QUAD_POSITIONS: [Position; 4] = [
    Position { xy: [-0.5, -0.5] },
    Position { xy: [0.5, -0.5] },
    Position { xy: [0.5, 0.5] },
    Position { xy: [-0.5, 0.5] },
];

/// Two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Uniform the fragment stage reads its fill color from.
pub const COLOR_UNIFORM: &str = "u_Color";

/// One colored quad: vertex array, buffers, program and color uniform.
pub struct QuadScene {
    ctx: Rc<GlContext>,
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    index_buffer: IndexBuffer,
    program: Program,
    color_location: UniformLocation,
    pub color: Color,
}

impl QuadScene {
    /// Builds the scene with the shader program read from `shader_path`.
    pub fn new(ctx: &Rc<GlContext>, shader_path: impl AsRef<Path>) -> Result<Self, GlError> {
        let shader_path = shader_path.as_ref();
        log::info!("loading shader {}", shader_path.display());
        Self::build(ctx, |ctx| Program::from_file(ctx, shader_path))
    }

    pub fn from_source(ctx: &Rc<GlContext>, source: &ShaderSource) -> Result<Self, GlError> {
        Self::build(ctx, |ctx| Program::from_source(ctx, source))
    }

    fn build(
        ctx: &Rc<GlContext>,
        program: impl FnOnce(&Rc<GlContext>) -> Result<Program, GlError>,
    ) -> Result<Self, GlError> {
        let vertex_array = VertexArray::new(ctx)?;
        let vertex_buffer = VertexBuffer::from_slice(ctx, &QUAD_POSITIONS)?;
        vertex_array.add_buffer(&vertex_buffer, &VertexLayout::new().with_f32(2));
        let index_buffer = IndexBuffer::new(ctx, &QUAD_INDICES)?;

        let program = program(ctx)?;
        program.bind();
        let color_location = program.require_uniform(COLOR_UNIFORM);

        // Leave nothing bound; `draw` binds everything it uses.
        ctx.unbind_all();

        log::info!(
            "quad scene ready ({} bytes of vertices, {} indices)",
            vertex_buffer.size(),
            index_buffer.count()
        );

        Ok(Self {
            ctx: Rc::clone(ctx),
            vertex_array,
            vertex_buffer,
            index_buffer,
            program,
            color_location,
            color: Color::rgba(1.0, 0.5, 0.8, 1.0),
        })
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &IndexBuffer {
        &self.index_buffer
    }

    /// Clears the color buffer and draws the quad.
    pub fn draw(&self) {
        self.ctx.clear();

        self.program.bind();
        self.program.set_color(self.color_location, self.color);

        self.vertex_array.bind();
        self.index_buffer.bind();

        let count = self.index_buffer.count();
        gl_call!(self.ctx.driver(), draw_elements(Primitive::Triangles, count, 0));
    }
}
