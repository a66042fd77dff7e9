//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single window, and wires them to the GL
//! layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
