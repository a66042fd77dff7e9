use std::mem::size_of;

/// One floating-point vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Number of `f32` components (1..=4).
    pub components: i32,
    pub normalized: bool,
}

/// Interleaved attribute layout of a vertex buffer.
///
/// Attribute `i` is bound to shader location `i`. Offsets and stride are derived
/// from the attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unnormalized `f32` attribute with `components` components.
    pub fn with_f32(mut self, components: i32) -> Self {
        debug_assert!((1..=4).contains(&components), "attribute must have 1..=4 components");
        self.attributes.push(VertexAttribute { components, normalized: false });
        self
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> i32 {
        self.attributes.iter().map(attribute_size).sum()
    }

    /// `(location, attribute, byte offset)` for each attribute.
    pub fn offsets(&self) -> impl Iterator<Item = (u32, VertexAttribute, i32)> + '_ {
        self.attributes.iter().enumerate().scan(0, |offset, (index, attr)| {
            let this = *offset;
            *offset += attribute_size(attr);
            Some((index as u32, *attr, this))
        })
    }
}

fn attribute_size(attr: &VertexAttribute) -> i32 {
    attr.components * size_of::<f32>() as i32
}
