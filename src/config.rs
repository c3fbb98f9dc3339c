/// Render-resource options, held by the [`Loader`](crate::Loader) for its
/// lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Generate mipmaps for loaded textures and sample them with
    /// linear-mipmap-nearest filtering.
    pub mipmapping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { mipmapping: true }
    }
}
