//! Color values passed to shader uniforms.

mod color;

pub use color::Color;
