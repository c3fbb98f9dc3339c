//! GPU resource and shader management for a small OpenGL renderer: mesh and
//! texture upload with tracked teardown, plus compile/link/uniform plumbing
//! for the draw techniques built on top.
//!
//! Everything device side runs through the [`Device`] boundary from the one
//! thread that owns the context; [`GlDevice`] is the production
//! implementation. The renderer owns one [`Loader`] and one [`Shaders`] set
//! for its lifetime and calls their `clean_up` at shutdown.

mod config;
mod device;
mod error;
mod loader;
mod shaders;

pub use config::Config;
pub use device::{BufferKind, Device, GlDevice, MinFilter, ShaderStage};
pub use error::RenderError;
pub use loader::{ATTR_NORMAL, ATTR_POSITION, ATTR_TEX_COORD, Loader, UploadedMesh};
pub use shaders::{
    AttributeBinder, EntityShader, GuiShader, ShaderProgram, Shaders, Technique, UniformResolver,
};
