//! GL context + window surface management.
//!
//! This module is responsible for:
//! - picking a framebuffer config and creating the window with it
//! - creating the GL context and window surface and making them current
//! - loading the GL entry points for the driver
//! - presenting frames and resizing the surface

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GlInit;
