/// Initialization parameters for the GL layer.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Synchronize buffer swaps with the display refresh.
    pub vsync: bool,

    /// Requested core-profile version `(major, minor)`.
    ///
    /// When the platform cannot provide it, the default context the platform
    /// offers is used instead.
    pub version: (u8, u8),
}

impl Default for GlInit {
    fn default() -> Self {
        Self { vsync: true, version: (3, 3) }
    }
}
