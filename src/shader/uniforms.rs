//! CPU mirror of the shader's uniform blocks.
//!
//! The layouts below match `scene.wgsl` byte for byte. Object state lives in
//! [`ObjectUniform`] and is snapshotted per draw; camera and lights live in
//! [`FrameUniform`] and are written once per frame.

use cgmath::{Matrix4, SquareMatrix};

use super::{LightField, Uniform, UniformSink, UniformValue};
use crate::registry::NO_TEXTURE_SLOT;

/// Size of the point light array in the shader.
pub const POINT_LIGHT_COUNT: usize = 5;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub diffuse: [f32; 3],
    pub shininess: f32,
    pub specular: [f32; 3],
    pub use_texture: u32,
    pub uv_scale: [f32; 2],
    pub use_lighting: u32,
    pub texture_slot: i32,
    /// Multiply the texel by `color`. Only set by a tint push.
    pub use_tint: u32,
    pub _pad: [u32; 3],
}

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::identity().into(),
            color: [1.0; 4],
            diffuse: [0.0; 3],
            shininess: 1.0,
            specular: [0.0; 3],
            use_texture: 0,
            uv_scale: [1.0, 1.0],
            use_lighting: 1,
            texture_slot: NO_TEXTURE_SLOT,
            use_tint: 0,
            _pad: [0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub _pad0: f32,
    pub diffuse: [f32; 3],
    pub _pad1: f32,
    pub specular: [f32; 3],
    pub _pad2: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    pub constant: f32,
    pub diffuse: [f32; 3],
    pub linear: f32,
    pub specular: [f32; 3],
    pub quadratic: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 3],
    pub _pad: f32,
    pub directional: DirectionalLightRaw,
    pub points: [PointLightRaw; POINT_LIGHT_COUNT],
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
            view_position: [0.0; 3],
            _pad: 0.0,
            directional: DirectionalLightRaw::default(),
            points: [PointLightRaw::default(); POINT_LIGHT_COUNT],
        }
    }
}

/// Current value of every uniform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaderUniforms {
    pub object: ObjectUniform,
    pub frame: FrameUniform,
}

impl ShaderUniforms {
    pub fn new() -> Self {
        Self::default()
    }
}

fn flag(b: bool) -> u32 {
    b as u32
}

impl UniformSink for ShaderUniforms {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        use UniformValue as V;
        let obj = &mut self.object;
        let frame = &mut self.frame;
        match (uniform, value) {
            (Uniform::Model, V::Mat4(m)) => obj.model = m.into(),
            (Uniform::View, V::Mat4(m)) => frame.view = m.into(),
            (Uniform::Projection, V::Mat4(m)) => frame.projection = m.into(),
            (Uniform::ViewPosition, V::Vec3(v)) => frame.view_position = v,
            (Uniform::ObjectColor, V::Vec4(v)) => obj.color = v,
            (Uniform::ObjectTexture, V::Int(i)) => obj.texture_slot = i,
            (Uniform::UseTexture, V::Bool(b)) => obj.use_texture = flag(b),
            (Uniform::UseLighting, V::Bool(b)) => obj.use_lighting = flag(b),
            (Uniform::UseTint, V::Bool(b)) => obj.use_tint = flag(b),
            (Uniform::UvScale, V::Vec2(v)) => obj.uv_scale = v,
            (Uniform::MaterialDiffuse, V::Vec3(v)) => obj.diffuse = v,
            (Uniform::MaterialSpecular, V::Vec3(v)) => obj.specular = v,
            (Uniform::MaterialShininess, V::Float(f)) => obj.shininess = f,
            (Uniform::Directional(field), value) => {
                let light = &mut frame.directional;
                match (field, value) {
                    (LightField::Direction, V::Vec3(v)) => light.direction = v,
                    (LightField::Ambient, V::Vec3(v)) => light.ambient = v,
                    (LightField::Diffuse, V::Vec3(v)) => light.diffuse = v,
                    (LightField::Specular, V::Vec3(v)) => light.specular = v,
                    (LightField::Active, V::Bool(b)) => light.active = flag(b),
                    _ => mismatch(uniform, value),
                }
            }
            (Uniform::Point(i, field), value) => {
                let Some(light) = frame.points.get_mut(i) else {
                    log::warn!(
                        "ignoring {}: the shader has only {} point lights",
                        uniform,
                        POINT_LIGHT_COUNT
                    );
                    return;
                };
                match (field, value) {
                    (LightField::Position, V::Vec3(v)) => light.position = v,
                    (LightField::Ambient, V::Vec3(v)) => light.ambient = v,
                    (LightField::Diffuse, V::Vec3(v)) => light.diffuse = v,
                    (LightField::Specular, V::Vec3(v)) => light.specular = v,
                    (LightField::Constant, V::Float(f)) => light.constant = f,
                    (LightField::Linear, V::Float(f)) => light.linear = f,
                    (LightField::Quadratic, V::Float(f)) => light.quadratic = f,
                    (LightField::Active, V::Bool(b)) => light.active = flag(b),
                    _ => mismatch(uniform, value),
                }
            }
            (uniform, value) => mismatch(uniform, value),
        }
    }
}

fn mismatch(uniform: Uniform, value: UniformValue) {
    log::warn!("uniform {} does not accept {:?}, ignored", uniform, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_the_shader() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);
        assert_eq!(std::mem::size_of::<DirectionalLightRaw>(), 64);
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 64);
        assert_eq!(std::mem::size_of::<FrameUniform>(), 528);
    }

    #[test]
    fn wrong_value_type_leaves_state_alone() {
        let mut u = ShaderUniforms::new();
        u.set_uniform(Uniform::UvScale, UniformValue::Float(3.0));
        assert_eq!(u.object.uv_scale, [1.0, 1.0]);
    }

    #[test]
    fn out_of_range_point_light_is_ignored() {
        let mut u = ShaderUniforms::new();
        let before = u;
        u.set_uniform(
            Uniform::Point(POINT_LIGHT_COUNT, LightField::Active),
            UniformValue::Bool(true),
        );
        assert_eq!(u, before);
    }
}
