use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::{BufferKind, Device, MinFilter, ShaderStage};
use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(BufferKind, Option<u32>),
    BufferData(BufferKind, usize),
    DeleteBuffer(u32),
    VertexAttribPointer { slot: u32, components: i32 },
    EnableVertexAttribArray(u32),
    CreateTexture(u32),
    BindTexture(Option<u32>),
    UploadTexture { width: i32, height: i32 },
    SetMinFilter(MinFilter),
    GenerateMipmaps,
    DeleteTexture(u32),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    BindAttribLocation { program: u32, slot: u32, name: String },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformLocation(u32, String),
    Uniform1F32(f32),
    Uniform3F32(f32, f32, f32),
    UniformMatrix4([f32; 16]),
}

/// Records every device call in order so tests can assert lifecycle and
/// ordering properties without a GL context. Handles are u32s from a shared
/// counter, so no two created objects ever alias.
pub struct TraceDevice {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    broken_stages: RefCell<HashSet<ShaderStage>>,
    missing_uniforms: RefCell<HashSet<String>>,
}

impl TraceDevice {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            shader_stages: RefCell::new(HashMap::new()),
            broken_stages: RefCell::new(HashSet::new()),
            missing_uniforms: RefCell::new(HashSet::new()),
        }
    }

    /// Every shader of `stage` reports a failed compile from now on.
    pub fn break_stage(&self, stage: ShaderStage) {
        self.broken_stages.borrow_mut().insert(stage);
    }

    /// `uniform_location` resolves `name` to nothing from now on.
    pub fn drop_uniform(&self, name: &str) {
        self.missing_uniforms.borrow_mut().insert(name.to_owned());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh_handle(&self) -> u32 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        handle
    }
}

impl Device for TraceDevice {
    type VertexArray = u32;
    type Buffer = u32;
    type Texture = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn create_vertex_array(&self) -> Result<u32, RenderError> {
        let handle = self.fresh_handle();
        self.record(Call::CreateVertexArray(handle));
        Ok(handle)
    }

    fn bind_vertex_array(&self, array: Option<u32>) {
        self.record(Call::BindVertexArray(array));
    }

    fn delete_vertex_array(&self, array: u32) {
        self.record(Call::DeleteVertexArray(array));
    }

    fn create_buffer(&self) -> Result<u32, RenderError> {
        let handle = self.fresh_handle();
        self.record(Call::CreateBuffer(handle));
        Ok(handle)
    }

    fn bind_buffer(&self, kind: BufferKind, buffer: Option<u32>) {
        self.record(Call::BindBuffer(kind, buffer));
    }

    fn buffer_data(&self, kind: BufferKind, data: &[u8]) {
        self.record(Call::BufferData(kind, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(&self, slot: u32, components: i32, _stride: i32, _offset: i32) {
        self.record(Call::VertexAttribPointer { slot, components });
    }

    fn enable_vertex_attrib_array(&self, slot: u32) {
        self.record(Call::EnableVertexAttribArray(slot));
    }

    fn create_texture(&self) -> Result<u32, RenderError> {
        let handle = self.fresh_handle();
        self.record(Call::CreateTexture(handle));
        Ok(handle)
    }

    fn bind_texture(&self, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn upload_texture_rgba(&self, width: i32, height: i32, _pixels: &[u8]) {
        self.record(Call::UploadTexture { width, height });
    }

    fn set_min_filter(&self, filter: MinFilter) {
        self.record(Call::SetMinFilter(filter));
    }

    fn generate_mipmaps(&self) {
        self.record(Call::GenerateMipmaps);
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, RenderError> {
        let handle = self.fresh_handle();
        self.shader_stages.borrow_mut().insert(handle, stage);
        self.record(Call::CreateShader(stage, handle));
        Ok(handle)
    }

    fn shader_source(&self, shader: u32, _source: &str) {
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let stage = self.shader_stages.borrow()[&shader];
        !self.broken_stages.borrow().contains(&stage)
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "0:1(1): error: syntax error".to_owned()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, RenderError> {
        let handle = self.fresh_handle();
        self.record(Call::CreateProgram(handle));
        Ok(handle)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn bind_attrib_location(&self, program: u32, slot: u32, name: &str) {
        self.record(Call::BindAttribLocation {
            program,
            slot,
            name: name.to_owned(),
        });
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        true
    }

    fn program_info_log(&self, _program: u32) -> String {
        String::new()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.record(Call::UniformLocation(program, name.to_owned()));
        if self.missing_uniforms.borrow().contains(name) {
            None
        } else {
            Some(self.fresh_handle())
        }
    }

    fn uniform_1_f32(&self, _location: &u32, value: f32) {
        self.record(Call::Uniform1F32(value));
    }

    fn uniform_3_f32(&self, _location: &u32, x: f32, y: f32, z: f32) {
        self.record(Call::Uniform3F32(x, y, z));
    }

    fn uniform_matrix_4_f32(&self, _location: &u32, values: &[f32; 16]) {
        self.record(Call::UniformMatrix4(*values));
    }
}
