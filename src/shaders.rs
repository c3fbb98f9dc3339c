use std::collections::HashMap;

use glam::{Mat4, Vec3};
use include_dir::{Dir, include_dir};

use crate::device::{Device, ShaderStage};
use crate::error::RenderError;

static SHADERS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/shaders");

mod entity;
mod gui;

pub use entity::EntityShader;
pub use gui::GuiShader;

/// One draw technique: a named vert/frag pair in the embedded bundle plus
/// the two hooks every technique provides during program construction.
pub trait Technique<D: Device> {
    /// Directory under `src/shaders/` holding `vert.glsl` and `frag.glsl`.
    const SHADER: &'static str;

    /// Declare the slot for every vertex input. Runs after the stages are
    /// attached and before the program links; slots are fixed at link time.
    fn bind_attributes(binder: &mut AttributeBinder<'_, D>);

    /// Resolve every uniform the technique uploads. Runs once, right after
    /// linking; the upload helpers only ever read the resulting cache.
    fn resolve_uniforms(uniforms: &mut UniformResolver<'_, D>);
}

pub struct AttributeBinder<'a, D: Device> {
    gl: &'a D,
    program: D::Program,
}

impl<D: Device> AttributeBinder<'_, D> {
    pub fn bind(&mut self, slot: u32, name: &str) {
        self.gl.bind_attrib_location(self.program, slot, name);
    }
}

pub struct UniformResolver<'a, D: Device> {
    gl: &'a D,
    program: D::Program,
    cache: &'a mut HashMap<String, Option<D::UniformLocation>>,
}

impl<D: Device> UniformResolver<'_, D> {
    pub fn resolve(&mut self, name: &str) {
        let location = self.gl.uniform_location(self.program, name);
        if location.is_none() {
            log::warn!("uniform '{name}' not found, uploads to it will be dropped");
        }
        self.cache.insert(name.to_owned(), location);
    }
}

/// A linked vertex+fragment program with its uniform locations resolved up
/// front. Constructed once per technique; per frame the renderer brackets
/// its draws with [`start`](Self::start)/[`stop`](Self::stop) and feeds
/// per-draw values through the typed load helpers.
pub struct ShaderProgram<D: Device> {
    program: D::Program,
    vertex_shader: D::Shader,
    fragment_shader: D::Shader,
    uniforms: HashMap<String, Option<D::UniformLocation>>,
    matrix_scratch: [f32; 16],
}

impl<D: Device> ShaderProgram<D> {
    pub fn new<T: Technique<D>>(gl: &D) -> Result<Self, RenderError> {
        let vertex_shader = compile_stage(gl, T::SHADER, ShaderStage::Vertex)?;
        let fragment_shader = compile_stage(gl, T::SHADER, ShaderStage::Fragment)?;

        let program = gl.create_program()?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);

        T::bind_attributes(&mut AttributeBinder { gl, program });

        gl.link_program(program);
        if !gl.program_link_status(program) {
            let link_log = gl.program_info_log(program);
            log::error!("linking shader '{}' failed: {link_log}", T::SHADER);
            return Err(RenderError::Link {
                name: T::SHADER.to_owned(),
                log: link_log,
            });
        }

        let mut uniforms = HashMap::new();
        T::resolve_uniforms(&mut UniformResolver {
            gl,
            program,
            cache: &mut uniforms,
        });

        Ok(Self {
            program,
            vertex_shader,
            fragment_shader,
            uniforms,
            matrix_scratch: [0.0; 16],
        })
    }

    /// Makes this the active program for subsequent draw calls.
    pub fn start(&self, gl: &D) {
        gl.use_program(Some(self.program));
    }

    pub fn stop(&self, gl: &D) {
        gl.use_program(None);
    }

    /// Consumes the program: deactivates it, detaches and deletes both
    /// stages, then deletes the program object.
    pub fn clean_up(self, gl: &D) {
        self.stop(gl);
        gl.detach_shader(self.program, self.vertex_shader);
        gl.detach_shader(self.program, self.fragment_shader);
        gl.delete_shader(self.vertex_shader);
        gl.delete_shader(self.fragment_shader);
        gl.delete_program(self.program);
    }

    pub fn load_float(&self, gl: &D, name: &str, value: f32) {
        if let Some(location) = self.location(name) {
            gl.uniform_1_f32(location, value);
        }
    }

    pub fn load_vector(&self, gl: &D, name: &str, vector: Vec3) {
        if let Some(location) = self.location(name) {
            gl.uniform_3_f32(location, vector.x, vector.y, vector.z);
        }
    }

    pub fn load_boolean(&self, gl: &D, name: &str, value: bool) {
        self.load_float(gl, name, if value { 1.0 } else { 0.0 });
    }

    /// Uploads column-major, staged through the per-program scratch array.
    pub fn load_matrix(&mut self, gl: &D, name: &str, matrix: &Mat4) {
        let Some(location) = self.uniforms.get(name).and_then(|l| l.clone()) else {
            return;
        };
        self.matrix_scratch = matrix.to_cols_array();
        gl.uniform_matrix_4_f32(&location, &self.matrix_scratch);
    }

    fn location(&self, name: &str) -> Option<&D::UniformLocation> {
        self.uniforms.get(name).and_then(|location| location.as_ref())
    }
}

impl<D: Device> std::fmt::Debug for ShaderProgram<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram").finish()
    }
}

fn compile_stage<D: Device>(
    gl: &D,
    name: &str,
    stage: ShaderStage,
) -> Result<D::Shader, RenderError> {
    let file = match stage {
        ShaderStage::Vertex => "vert.glsl",
        ShaderStage::Fragment => "frag.glsl",
    };
    let path = format!("{name}/{file}");
    let source = SHADERS_DIR
        .get_file(&path)
        .ok_or_else(|| RenderError::MissingAsset(path.clone()))?
        .contents_utf8()
        .ok_or_else(|| RenderError::ShaderNotUtf8(path.clone()))?;

    let shader = gl.create_shader(stage)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.shader_compile_status(shader) {
        let compile_log = gl.shader_info_log(shader);
        log::error!("compiling {stage} shader '{name}' failed: {compile_log}");
        return Err(RenderError::Compile {
            stage,
            name: name.to_owned(),
            log: compile_log,
        });
    }

    Ok(shader)
}

/// Every technique the renderer draws with, built once at startup.
pub struct Shaders<D: Device> {
    pub entity: EntityShader<D>,
    pub gui: GuiShader<D>,
}

impl<D: Device> Shaders<D> {
    pub fn new(gl: &D) -> Result<Self, RenderError> {
        Ok(Self {
            entity: EntityShader::new(gl)?,
            gui: GuiShader::new(gl)?,
        })
    }

    pub fn clean_up(self, gl: &D) {
        self.entity.clean_up(gl);
        self.gui.clean_up(gl);
    }
}

impl<D: Device> std::fmt::Debug for Shaders<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shaders").finish()
    }
}
