//! Drawable scenes.

mod quad;

pub use quad::{Position, QuadScene, COLOR_UNIFORM, QUAD_INDICES, QUAD_POSITIONS};
