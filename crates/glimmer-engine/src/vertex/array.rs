use std::rc::Rc;

use crate::buffer::VertexBuffer;
use crate::driver::VertexArrayId;
use crate::gl::{GlContext, GlError};
use crate::gl_call;

use super::VertexLayout;

/// A vertex array object: the attribute wiring for draw calls.
pub struct VertexArray {
    ctx: Rc<GlContext>,
    id: VertexArrayId,
}

impl VertexArray {
    /// Creates a vertex array and leaves it bound.
    pub fn new(ctx: &Rc<GlContext>) -> Result<Self, GlError> {
        let id = gl_call!(ctx.driver(), create_vertex_array())
            .map_err(GlError::create("vertex array"))?;
        let vao = Self { ctx: Rc::clone(ctx), id };
        vao.bind();
        Ok(vao)
    }

    pub fn id(&self) -> VertexArrayId {
        self.id
    }

    pub fn bind(&self) {
        self.ctx.bind_vertex_array(Some(self.id));
    }

    pub fn unbind(&self) {
        self.ctx.bind_vertex_array(None);
    }

    /// Binds `buffer` and describes `layout` for it on this vertex array.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexLayout) {
        self.bind();
        buffer.bind();

        let stride = layout.stride();
        let driver = self.ctx.driver();
        for (location, attr, offset) in layout.offsets() {
            gl_call!(driver, enable_vertex_attrib_array(location));
            gl_call!(
                driver,
                vertex_attrib_pointer_f32(location, attr.components, attr.normalized, stride, offset)
            );
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.ctx.delete_vertex_array(self.id);
    }
}
