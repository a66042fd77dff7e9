//! GPU buffer wrappers.
//!
//! [`VertexBuffer`] and [`IndexBuffer`] each own exactly one driver buffer. They
//! are move-only; the driver object is deleted when the wrapper is dropped.

mod index;
mod raw;
mod vertex;

pub use index::IndexBuffer;
pub use vertex::VertexBuffer;
