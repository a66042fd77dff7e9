//! Vertex array objects and attribute layouts.

mod array;
mod layout;

pub use array::VertexArray;
pub use layout::{VertexAttribute, VertexLayout};
