//! Resolves tags against the registries and pushes the result as uniforms.
//!
//! Every call writes through immediately. Nothing is reset between draws, so
//! whatever an object does not overwrite is inherited from the previous one.

use cgmath::Matrix4;

use super::{Uniform, UniformSink, UniformValue};
use crate::registry::{MaterialRegistry, TextureRegistry};

#[derive(Clone, Copy)]
pub struct ShaderBinder<'a> {
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
}

impl<'a> ShaderBinder<'a> {
    pub fn new(textures: &'a TextureRegistry, materials: &'a MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
        }
    }

    pub fn push_transform<S: UniformSink + ?Sized>(&self, sink: &mut S, model: Matrix4<f32>) {
        sink.set_uniform(Uniform::Model, UniformValue::Mat4(model));
    }

    /// Solid colour; also switches texturing and tinting off.
    pub fn push_flat_color<S: UniformSink + ?Sized>(&self, sink: &mut S, rgba: [f32; 4]) {
        sink.set_uniform(Uniform::ObjectColor, UniformValue::Vec4(rgba));
        sink.set_uniform(Uniform::UseTexture, UniformValue::Bool(false));
        sink.set_uniform(Uniform::UseTint, UniformValue::Bool(false));
    }

    /// Colour multiplied into the texture, texturing flag untouched.
    ///
    /// Must follow [`push_texture`](Self::push_texture), which clears it.
    pub fn push_tint<S: UniformSink + ?Sized>(&self, sink: &mut S, rgba: [f32; 4]) {
        sink.set_uniform(Uniform::ObjectColor, UniformValue::Vec4(rgba));
        sink.set_uniform(Uniform::UseTint, UniformValue::Bool(true));
    }

    /// Switches texturing on and points the sampler at the unit of `tag`.
    /// The texel is drawn as is until a tint is pushed, whatever colour an
    /// earlier object left behind.
    ///
    /// An unknown tag writes slot `-1`. The shader treats that as "no
    /// texture", it is not a fault.
    pub fn push_texture<S: UniformSink + ?Sized>(&self, sink: &mut S, tag: &str) {
        let slot = self.textures.slot_index(tag);
        if slot < 0 {
            log::warn!("texture '{}' is not loaded", tag);
        }
        sink.set_uniform(Uniform::UseTexture, UniformValue::Bool(true));
        sink.set_uniform(Uniform::UseTint, UniformValue::Bool(false));
        sink.set_uniform(Uniform::ObjectTexture, UniformValue::Int(slot));
    }

    /// Writes diffuse, specular and shininess of `tag`.
    ///
    /// Returns `false` on a miss, in which case the previous material stays in
    /// effect.
    pub fn push_material<S: UniformSink + ?Sized>(&self, sink: &mut S, tag: &str) -> bool {
        match self.materials.lookup(tag) {
            Some(material) => {
                sink.set_uniform(Uniform::MaterialDiffuse, UniformValue::Vec3(material.diffuse));
                sink.set_uniform(Uniform::MaterialSpecular, UniformValue::Vec3(material.specular));
                sink.set_uniform(Uniform::MaterialShininess, UniformValue::Float(material.shininess));
                true
            }
            None => {
                log::warn!("material '{}' is not defined, keeping the previous one", tag);
                false
            }
        }
    }

    pub fn push_uv_scale<S: UniformSink + ?Sized>(&self, sink: &mut S, u: f32, v: f32) {
        sink.set_uniform(Uniform::UvScale, UniformValue::Vec2([u, v]));
    }

    pub fn push_lighting<S: UniformSink + ?Sized>(&self, sink: &mut S, enabled: bool) {
        sink.set_uniform(Uniform::UseLighting, UniformValue::Bool(enabled));
    }

    pub fn textures(&self) -> &'a TextureRegistry {
        self.textures
    }

    pub fn materials(&self) -> &'a MaterialRegistry {
        self.materials
    }
}
