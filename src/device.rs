//! The slice of the graphics API this crate consumes. Everything device
//! side goes through the [`Device`] trait so the upload and shader code can
//! run against the real context or a recording stand-in in tests.

use std::fmt::Debug;

use crate::error::RenderError;

mod gl;
pub use gl::GlDevice;

#[cfg(test)]
pub(crate) mod trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Array,
    ElementArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    LinearMipmapNearest,
}

/// Immediate-mode device boundary. All calls block on the thread that owns
/// the context; handle types are opaque and only valid on that device.
///
/// Creation can be refused by the device and returns `Result`; binds,
/// uploads and deletes are fire-and-forget, matching the way the renderer
/// treats them (a delete on a dead handle is not guarded anywhere).
pub trait Device {
    type VertexArray: Copy + Eq + Debug;
    type Buffer: Copy + Eq + Debug;
    type Texture: Copy + Eq + Debug;
    type Shader: Copy + Eq + Debug;
    type Program: Copy + Eq + Debug;
    type UniformLocation: Clone + Debug;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, RenderError>;
    fn bind_vertex_array(&self, array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, array: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer, RenderError>;
    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>);
    /// Uploads `data` into the buffer bound to `kind`, as static draw data.
    fn buffer_data(&self, kind: BufferKind, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Declares `slot` of the bound vertex array as tightly packed f32
    /// data read from the bound array buffer.
    fn vertex_attrib_pointer(&self, slot: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, slot: u32);

    fn create_texture(&self) -> Result<Self::Texture, RenderError>;
    fn bind_texture(&self, texture: Option<Self::Texture>);
    fn upload_texture_rgba(&self, width: i32, height: i32, pixels: &[u8]);
    fn set_min_filter(&self, filter: MinFilter);
    fn generate_mipmaps(&self);
    fn delete_texture(&self, texture: Self::Texture);

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, RenderError>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, RenderError>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, slot: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;
    fn uniform_1_f32(&self, location: &Self::UniformLocation, value: f32);
    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32);
    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, values: &[f32; 16]);
}
