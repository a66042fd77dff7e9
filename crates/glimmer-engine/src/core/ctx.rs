use std::rc::Rc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::gl::GlContext;
use crate::time::FrameTime;

/// Per-frame context passed to [`super::App::on_frame`].
pub struct FrameCtx<'a> {
    pub gl: &'a Rc<GlContext>,
    pub window: &'a Window,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub time: FrameTime,
}
