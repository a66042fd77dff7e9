use std::rc::Rc;

use crate::driver::{BufferId, BufferTarget};
use crate::gl::{GlContext, GlError};

use super::raw::RawBuffer;

/// `u32` index data on the element-array target.
pub struct IndexBuffer {
    raw: RawBuffer,
    count: i32,
}

/// Draw calls take the index count as a `GLsizei`.
fn draw_count(len: usize) -> Result<i32, GlError> {
    i32::try_from(len).map_err(|_| GlError::TooLarge { object: "index buffer", len })
}

impl IndexBuffer {
    /// Uploads `indices` once; the buffer is left bound.
    pub fn new(ctx: &Rc<GlContext>, indices: &[u32]) -> Result<Self, GlError> {
        let count = draw_count(indices.len())?;

        let raw = RawBuffer::upload(
            ctx,
            BufferTarget::ElementArray,
            "index buffer",
            bytemuck::cast_slice(indices),
        )?;
        Ok(Self { raw, count })
    }

    pub fn id(&self) -> BufferId {
        self.raw.id()
    }

    /// Number of indices supplied at creation, as passed to draw calls.
    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn bind(&self) {
        self.raw.bind();
    }

    pub fn unbind(&self) {
        self.raw.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::recording::{Call, RecordingDriver};

    #[test]
    fn count_matches_input() {
        let ctx = GlContext::new(RecordingDriver::new());
        let ib = IndexBuffer::new(&ctx, &[0, 1, 2, 2, 3, 0]).unwrap();
        assert_eq!(ib.count(), 6);
    }

    #[test]
    fn uploads_four_bytes_per_index() {
        let driver = RecordingDriver::new();
        let ctx = GlContext::new(driver.clone());
        let _ib = IndexBuffer::new(&ctx, &[0, 1, 2]).unwrap();
        assert!(driver
            .calls()
            .contains(&Call::BufferData { target: BufferTarget::ElementArray, len: 12 }));
    }

    #[test]
    fn bind_then_unbind_leaves_nothing_bound() {
        let ctx = GlContext::new(RecordingDriver::new());
        let ib = IndexBuffer::new(&ctx, &[0, 1, 2]).unwrap();

        ib.bind();
        assert_eq!(ctx.bound_buffer(BufferTarget::ElementArray), Some(ib.id()));
        ib.unbind();
        assert_eq!(ctx.bound_buffer(BufferTarget::ElementArray), None);
        assert_eq!(ctx.bound_buffer(BufferTarget::Array), None);
    }

    #[test]
    fn empty_index_buffer() {
        let ctx = GlContext::new(RecordingDriver::new());
        let ib = IndexBuffer::new(&ctx, &[]).unwrap();
        assert_eq!(ib.count(), 0);
    }

    #[test]
    fn count_beyond_gl_sizei_is_rejected() {
        assert_eq!(draw_count(6).unwrap(), 6);
        assert_eq!(draw_count(i32::MAX as usize).unwrap(), i32::MAX);

        let len = i32::MAX as usize + 1;
        match draw_count(len) {
            Err(GlError::TooLarge { object, len: rejected }) => {
                assert_eq!(object, "index buffer");
                assert_eq!(rejected, len);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn each_buffer_gets_its_own_handle() {
        let driver = RecordingDriver::new();
        let ctx = GlContext::new(driver.clone());
        let a = IndexBuffer::new(&ctx, &[0]).unwrap();
        let b = IndexBuffer::new(&ctx, &[0]).unwrap();
        assert_ne!(a.id(), b.id());

        drop(a);
        assert_eq!(driver.live_objects(), vec![b.id().get()]);
    }
}
