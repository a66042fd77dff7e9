//! Shader stage compilation and program linking.
//!
//! Source text comes from [`glimmer_shader`]; this module turns it into a linked
//! [`Program`]. Compile and link failures are returned as [`GlError`] values
//! after being logged with the compiler output.
//!
//! [`GlError`]: crate::gl::GlError

mod compile;
mod program;

pub use compile::compile_stage;
pub use program::Program;
