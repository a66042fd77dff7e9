use std::cell::Cell;
use std::rc::Rc;

use crate::driver::{BufferId, BufferTarget, GlDriver, ProgramId, VertexArrayId};
use crate::gl_call;

/// Snapshot of the objects currently bound on the context.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Bindings {
    pub array_buffer: Option<BufferId>,
    pub element_array_buffer: Option<BufferId>,
    pub vertex_array: Option<VertexArrayId>,
    pub program: Option<ProgramId>,
}

impl Bindings {
    pub fn buffer(&self, target: BufferTarget) -> Option<BufferId> {
        match target {
            BufferTarget::Array => self.array_buffer,
            BufferTarget::ElementArray => self.element_array_buffer,
        }
    }

    fn buffer_mut(&mut self, target: BufferTarget) -> &mut Option<BufferId> {
        match target {
            BufferTarget::Array => &mut self.array_buffer,
            BufferTarget::ElementArray => &mut self.element_array_buffer,
        }
    }
}

/// Owns the driver and the binding state of one GL context.
///
/// Single-threaded: shared through `Rc` by every object created on it. All
/// objects must be dropped before the underlying window context is destroyed;
/// [`crate::window::Runtime`] enforces that order.
///
/// The driver is only reachable inside the engine, so a handle kept from a
/// dropped wrapper cannot be bound again:
///
/// ```compile_fail
/// use glimmer_engine::driver::{BufferId, BufferTarget, GlDriver};
/// use glimmer_engine::gl::GlContext;
///
/// fn rebind(ctx: &GlContext, stale: BufferId) {
///     ctx.driver().bind_buffer(BufferTarget::Array, Some(stale));
/// }
/// ```
pub struct GlContext {
    driver: Box<dyn GlDriver>,
    bindings: Cell<Bindings>,
}

impl GlContext {
    pub fn new(driver: impl GlDriver + 'static) -> Rc<Self> {
        Rc::new(Self {
            driver: Box::new(driver),
            bindings: Cell::new(Bindings::default()),
        })
    }

    pub(crate) fn driver(&self) -> &dyn GlDriver {
        self.driver.as_ref()
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings.get()
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferId> {
        self.bindings().buffer(target)
    }

    fn update(&self, f: impl FnOnce(&mut Bindings)) {
        let mut b = self.bindings.get();
        f(&mut b);
        self.bindings.set(b);
    }

    pub(crate) fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        gl_call!(self.driver(), bind_buffer(target, buffer));
        self.update(|b| *b.buffer_mut(target) = buffer);
    }

    pub(crate) fn bind_vertex_array(&self, vertex_array: Option<VertexArrayId>) {
        gl_call!(self.driver(), bind_vertex_array(vertex_array));
        self.update(|b| b.vertex_array = vertex_array);
    }

    pub(crate) fn use_program(&self, program: Option<ProgramId>) {
        gl_call!(self.driver(), use_program(program));
        self.update(|b| b.program = program);
    }

    /// Deleting a bound object reverts its binding point to zero.
    pub(crate) fn delete_buffer(&self, buffer: BufferId) {
        gl_call!(self.driver(), delete_buffer(buffer));
        self.update(|b| {
            for target in [BufferTarget::Array, BufferTarget::ElementArray] {
                let slot = b.buffer_mut(target);
                if *slot == Some(buffer) {
                    *slot = None;
                }
            }
        });
    }

    pub(crate) fn delete_vertex_array(&self, vertex_array: VertexArrayId) {
        gl_call!(self.driver(), delete_vertex_array(vertex_array));
        self.update(|b| {
            if b.vertex_array == Some(vertex_array) {
                b.vertex_array = None;
            }
        });
    }

    /// A program in use stays installed after deletion in GL; the model only
    /// forgets it so the handle cannot be observed again.
    pub(crate) fn delete_program(&self, program: ProgramId) {
        gl_call!(self.driver(), delete_program(program));
        self.update(|b| {
            if b.program == Some(program) {
                b.program = None;
            }
        });
    }

    /// Unbinds program, vertex array and both buffer targets.
    pub fn unbind_all(&self) {
        self.bind_vertex_array(None);
        self.use_program(None);
        self.bind_buffer(BufferTarget::Array, None);
        self.bind_buffer(BufferTarget::ElementArray, None);
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        gl_call!(self.driver(), viewport(0, 0, w, h));
    }

    pub fn clear(&self) {
        gl_call!(self.driver(), clear_color_buffer());
    }
}
