//! Glimmer engine crate.
//!
//! Owns the GL driver boundary, the object wrappers built on it, and the
//! window + context runtime that drives frames.

pub mod debug;
pub mod driver;
pub mod gl;

pub mod buffer;
pub mod shader;
pub mod vertex;

pub mod device;
pub mod window;
pub mod core;
pub mod time;

pub mod logging;
pub mod paint;
pub mod scene;
