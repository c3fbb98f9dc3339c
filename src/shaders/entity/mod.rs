use glam::{Mat4, Vec3};

use super::{AttributeBinder, ShaderProgram, Technique, UniformResolver};
use crate::device::Device;
use crate::error::RenderError;
use crate::loader::{ATTR_NORMAL, ATTR_POSITION, ATTR_TEX_COORD};

/// Textured, lit technique for the static scene meshes.
pub struct EntityShader<D: Device> {
    program: ShaderProgram<D>,
}

impl<D: Device> Technique<D> for EntityShader<D> {
    const SHADER: &'static str = "entity";

    fn bind_attributes(binder: &mut AttributeBinder<'_, D>) {
        binder.bind(ATTR_POSITION, "position");
        binder.bind(ATTR_TEX_COORD, "tex_coord");
        binder.bind(ATTR_NORMAL, "normal");
    }

    fn resolve_uniforms(uniforms: &mut UniformResolver<'_, D>) {
        uniforms.resolve("model");
        uniforms.resolve("view");
        uniforms.resolve("proj");
        uniforms.resolve("light_pos");
        uniforms.resolve("light_color");
        uniforms.resolve("shine_damper");
        uniforms.resolve("reflectivity");
        uniforms.resolve("fake_lighting");
    }
}

impl<D: Device> EntityShader<D> {
    pub fn new(gl: &D) -> Result<Self, RenderError> {
        Ok(Self {
            program: ShaderProgram::new::<Self>(gl)?,
        })
    }

    pub fn start(&self, gl: &D) {
        self.program.start(gl);
    }

    pub fn stop(&self, gl: &D) {
        self.program.stop(gl);
    }

    pub fn clean_up(self, gl: &D) {
        self.program.clean_up(gl);
    }

    pub fn load_model_matrix(&mut self, gl: &D, model: &Mat4) {
        self.program.load_matrix(gl, "model", model);
    }

    pub fn load_view_matrix(&mut self, gl: &D, view: &Mat4) {
        self.program.load_matrix(gl, "view", view);
    }

    pub fn load_projection_matrix(&mut self, gl: &D, proj: &Mat4) {
        self.program.load_matrix(gl, "proj", proj);
    }

    pub fn load_light(&self, gl: &D, position: Vec3, color: Vec3) {
        self.program.load_vector(gl, "light_pos", position);
        self.program.load_vector(gl, "light_color", color);
    }

    pub fn load_shine(&self, gl: &D, damper: f32, reflectivity: f32) {
        self.program.load_float(gl, "shine_damper", damper);
        self.program.load_float(gl, "reflectivity", reflectivity);
    }

    /// Lights the mesh as if every normal pointed straight up, for assets
    /// authored without usable normals.
    pub fn load_fake_lighting(&self, gl: &D, enabled: bool) {
        self.program.load_boolean(gl, "fake_lighting", enabled);
    }
}

impl<D: Device> std::fmt::Debug for EntityShader<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityShader").finish()
    }
}
