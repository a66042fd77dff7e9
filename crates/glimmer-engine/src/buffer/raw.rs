use std::rc::Rc;

use crate::driver::{BufferId, BufferTarget};
use crate::gl::{GlContext, GlError};
use crate::gl_call;

/// One driver buffer object bound to a fixed target.
pub(super) struct RawBuffer {
    ctx: Rc<GlContext>,
    id: BufferId,
    target: BufferTarget,
}

impl RawBuffer {
    /// Allocates a buffer on `target` and uploads `data` with static-draw usage.
    ///
    /// Leaves the new buffer bound.
    pub(super) fn upload(
        ctx: &Rc<GlContext>,
        target: BufferTarget,
        object: &'static str,
        data: &[u8],
    ) -> Result<Self, GlError> {
        let id = gl_call!(ctx.driver(), create_buffer()).map_err(GlError::create(object))?;
        let buffer = Self { ctx: Rc::clone(ctx), id, target };

        buffer.bind();
        gl_call!(ctx.driver(), buffer_data(target, data));

        log::debug!("created {object} {} ({} bytes)", id.get(), data.len());
        Ok(buffer)
    }

    pub(super) fn id(&self) -> BufferId {
        self.id
    }

    pub(super) fn bind(&self) {
        self.ctx.bind_buffer(self.target, Some(self.id));
    }

    pub(super) fn unbind(&self) {
        self.ctx.bind_buffer(self.target, None);
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        log::debug!("deleting buffer {}", self.id.get());
        self.ctx.delete_buffer(self.id);
    }
}
