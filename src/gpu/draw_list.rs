//! Recording side of the wgpu backend.
//!
//! Composition is immediate-mode: uniforms are set, then a mesh is drawn,
//! and every draw sees whatever uniform state is current. wgpu records a
//! whole pass up front instead, so a [`DrawList`] keeps the current uniform
//! values and takes a copy of the object block at each draw. The renderer
//! then uploads all copies into one dynamic-offset buffer.

use std::collections::HashSet;

use crate::{
    mesh::{MeshDrawer, MeshKind},
    pass::{PipelineKey, RenderPassState},
    shader::{ObjectUniform, ShaderUniforms, Uniform, UniformSink, UniformValue},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    pub key: PipelineKey,
    pub object: ObjectUniform,
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    uniforms: ShaderUniforms,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded draws. Uniform values persist, as they would on a
    /// real shader program.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Distinct pipeline configurations the recorded draws need.
    pub fn pipeline_keys(&self) -> HashSet<PipelineKey> {
        self.commands.iter().map(|c| c.key).collect()
    }
}

impl UniformSink for DrawList {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        self.uniforms.set_uniform(uniform, value);
    }
}

impl MeshDrawer for DrawList {
    fn draw_mesh(&mut self, mesh: MeshKind, state: &RenderPassState) {
        self.commands.push(DrawCommand {
            mesh,
            key: state.pipeline_key(),
            object: self.uniforms.object,
        });
    }
}
