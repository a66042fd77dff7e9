//! Render context: driver ownership and modelled binding state.
//!
//! GL keeps "currently bound" objects as ambient global state. [`GlContext`]
//! mirrors that state explicitly so bind/unbind are observable transitions, and
//! every object wrapper holds an `Rc<GlContext>` to issue its calls through.

mod context;
mod error;

pub use context::{Bindings, GlContext};
pub use error::GlError;
