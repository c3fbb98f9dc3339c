use thiserror::Error;

use crate::device::ShaderStage;

/// Failures of the render-resource layer. None of these are recoverable
/// here: the loader and shader code report them and the application decides
/// how to shut down.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("missing asset '{0}'")]
    MissingAsset(String),

    #[error("shader source '{0}' is not valid utf-8")]
    ShaderNotUtf8(String),

    #[error("failed to decode texture '{name}': {source}")]
    TextureDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("compiling {stage} shader '{name}' failed: {log}")]
    Compile {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    #[error("linking shader '{name}' failed: {log}")]
    Link { name: String, log: String },

    #[error("device refused allocation: {0}")]
    Device(String),
}
