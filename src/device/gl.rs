use glow::HasContext;

use super::{BufferKind, Device, MinFilter, ShaderStage};
use crate::error::RenderError;

/// [`Device`] backed by a live OpenGL context. Every call must come from
/// the thread that owns the context.
pub struct GlDevice {
    gl: glow::Context,
}

impl GlDevice {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl std::fmt::Debug for GlDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlDevice").finish()
    }
}

impl BufferKind {
    fn gl_target(self) -> u32 {
        match self {
            BufferKind::Array => glow::ARRAY_BUFFER,
            BufferKind::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

impl ShaderStage {
    fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl MinFilter {
    fn gl_value(self) -> i32 {
        match self {
            MinFilter::Nearest => glow::NEAREST as i32,
            MinFilter::Linear => glow::LINEAR as i32,
            MinFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST as i32,
        }
    }
}

impl Device for GlDevice {
    type VertexArray = glow::VertexArray;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, RenderError> {
        unsafe { self.gl.create_vertex_array() }.map_err(RenderError::Device)
    }

    fn bind_vertex_array(&self, array: Option<Self::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(array) }
    }

    fn delete_vertex_array(&self, array: Self::VertexArray) {
        unsafe { self.gl.delete_vertex_array(array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, RenderError> {
        unsafe { self.gl.create_buffer() }.map_err(RenderError::Device)
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(kind.gl_target(), buffer) }
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(kind.gl_target(), data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn vertex_attrib_pointer(&self, slot: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(slot, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(slot) }
    }

    fn create_texture(&self) -> Result<Self::Texture, RenderError> {
        unsafe { self.gl.create_texture() }.map_err(RenderError::Device)
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn upload_texture_rgba(&self, width: i32, height: i32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn set_min_filter(&self, filter: MinFilter) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter.gl_value())
        }
    }

    fn generate_mipmaps(&self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, RenderError> {
        unsafe { self.gl.create_shader(stage.gl_kind()) }.map_err(RenderError::Device)
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, RenderError> {
        unsafe { self.gl.create_program() }.map_err(RenderError::Device)
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, slot: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, slot, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_1_f32(&self, location: &Self::UniformLocation, value: f32) {
        unsafe { self.gl.uniform_1_f32(Some(location), value) }
    }

    fn uniform_3_f32(&self, location: &Self::UniformLocation, x: f32, y: f32, z: f32) {
        unsafe { self.gl.uniform_3_f32(Some(location), x, y, z) }
    }

    fn uniform_matrix_4_f32(&self, location: &Self::UniformLocation, values: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(Some(location), false, values) }
    }
}
