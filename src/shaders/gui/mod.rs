use glam::Mat4;

use super::{AttributeBinder, ShaderProgram, Technique, UniformResolver};
use crate::device::Device;
use crate::error::RenderError;
use crate::loader::ATTR_POSITION;

/// Flat textured-quad technique for screen-space elements. Meshes for it
/// come from the position-only upload path and are drawn unindexed.
pub struct GuiShader<D: Device> {
    program: ShaderProgram<D>,
}

impl<D: Device> Technique<D> for GuiShader<D> {
    const SHADER: &'static str = "gui";

    fn bind_attributes(binder: &mut AttributeBinder<'_, D>) {
        binder.bind(ATTR_POSITION, "position");
    }

    fn resolve_uniforms(uniforms: &mut UniformResolver<'_, D>) {
        uniforms.resolve("model");
    }
}

impl<D: Device> GuiShader<D> {
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
}

impl<D: Device> std::fmt::Debug for GuiShader<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiShader").finish()
    }
}
