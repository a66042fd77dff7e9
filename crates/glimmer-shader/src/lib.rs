//! Splitter for the two-stage `#shader` source format.
//!
//! A shader file holds the vertex and fragment stage code in one text file,
//! each section introduced by a marker line:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! ...
//! #shader fragment
//! #version 330 core
//! ...
//! ```
//!
//! This crate is dependency-free so that tooling can read shader files without
//! pulling in a GL context or windowing code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`source`] | `ShaderSource`, `Stage` |
//! | [`splitter`] | `parse_str`, `parse_file` and the reporting variants |
//! | [`error`] | `SourceError` |
//!
//! # Quick start
//!
//! ```rust
//! use glimmer_shader::parse_str;
//!
//! let src = "#shader vertex\nvoid main() {}\n#shader fragment\nout vec4 c;\n";
//! let shader = parse_str(src);
//! assert_eq!(shader.vertex, "void main() {}\n");
//! assert_eq!(shader.fragment, "out vec4 c;\n");
//! ```

pub mod error;
pub mod source;
pub mod splitter;

pub use error::SourceError;
pub use source::{ShaderSource, Stage};
pub use splitter::{
    parse_file, parse_file_with_report, parse_str, parse_str_with_report, IgnoredMarker,
    SplitReport, MARKER,
};
