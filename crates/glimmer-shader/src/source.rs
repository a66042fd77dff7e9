use std::fmt;

/// Programmable pipeline stage a section of shader code belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// Keyword that selects this stage on a `#shader` marker line.
    pub const fn keyword(self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The two code blocks of a shader file.
///
/// Each block is the concatenation of its lines in file order, each with its
/// original terminator (`\n` or `\r\n`); an unterminated last line gets `\n`.
/// A stage with no section in the file is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }

    pub fn stage(&self, stage: Stage) -> &str {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }

    pub(crate) fn stage_mut(&mut self, stage: Stage) -> &mut String {
        match stage {
            Stage::Vertex => &mut self.vertex,
            Stage::Fragment => &mut self.fragment,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex.is_empty() && self.fragment.is_empty()
    }

    /// Renders both blocks back into the marker-delimited file format.
    ///
    /// Splitting the result with [`crate::parse_str`] yields `self` again as long
    /// as neither block contains a marker line and both blocks are either empty
    /// or end with `\n`.
    pub fn to_source_string(&self) -> String {
        let mut out = String::with_capacity(self.vertex.len() + self.fragment.len() + 34);
        out.push_str("#shader vertex\n");
        out.push_str(&self.vertex);
        out.push_str("#shader fragment\n");
        out.push_str(&self.fragment);
        out
    }
}
