use std::rc::Rc;

use bytemuck::Pod;

use crate::driver::{BufferId, BufferTarget};
use crate::gl::{GlContext, GlError};

use super::raw::RawBuffer;

/// Vertex attribute data on the array-buffer target.
///
/// The attribute layout is not part of the buffer; it is described when the
/// buffer is attached to a [`crate::vertex::VertexArray`].
pub struct VertexBuffer {
    raw: RawBuffer,
    size: usize,
}

impl VertexBuffer {
    /// Uploads `data` once; the buffer is left bound.
    pub fn new(ctx: &Rc<GlContext>, data: &[u8]) -> Result<Self, GlError> {
        let raw = RawBuffer::upload(ctx, BufferTarget::Array, "vertex buffer", data)?;
        Ok(Self { raw, size: data.len() })
    }

    /// Uploads a slice of plain-old-data vertices.
    pub fn from_slice<T: Pod>(ctx: &Rc<GlContext>, vertices: &[T]) -> Result<Self, GlError> {
        Self::new(ctx, bytemuck::cast_slice(vertices))
    }

    pub fn id(&self) -> BufferId {
        self.raw.id()
    }

    /// Uploaded size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bind(&self) {
        self.raw.bind();
    }

    pub fn unbind(&self) {
        self.raw.unbind();
    }
}
