//! The uniform interface between scene composition and the shader.
//!
//! Composition never talks to the GPU directly. It writes [`Uniform`] keys
//! with [`UniformValue`]s into a [`UniformSink`]; the sink decides what that
//! means (a CPU mirror of the uniform blocks, a recording for tests, ...).
//! Values persist in the sink until overwritten.

pub mod binder;
pub mod uniforms;

use std::fmt;

use cgmath::{Matrix4, Vector3};

pub use binder::ShaderBinder;
pub use uniforms::{FrameUniform, ObjectUniform, POINT_LIGHT_COUNT, ShaderUniforms};

/// A field of a light uniform block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightField {
    Direction,
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
    Active,
}

impl LightField {
    fn name(self) -> &'static str {
        match self {
            LightField::Direction => "direction",
            LightField::Position => "position",
            LightField::Ambient => "ambient",
            LightField::Diffuse => "diffuse",
            LightField::Specular => "specular",
            LightField::Constant => "constant",
            LightField::Linear => "linear",
            LightField::Quadratic => "quadratic",
            LightField::Active => "bActive",
        }
    }
}

/// Every uniform the scene shader exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Uniform {
    Model,
    View,
    Projection,
    ViewPosition,
    ObjectColor,
    /// Texture unit to sample, `-1` for none.
    ObjectTexture,
    UseTexture,
    UseLighting,
    /// Whether `ObjectColor` tints the texture.
    UseTint,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    Directional(LightField),
    Point(usize, LightField),
}

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uniform::Model => f.write_str("model"),
            Uniform::View => f.write_str("view"),
            Uniform::Projection => f.write_str("projection"),
            Uniform::ViewPosition => f.write_str("viewPosition"),
            Uniform::ObjectColor => f.write_str("objectColor"),
            Uniform::ObjectTexture => f.write_str("objectTexture"),
            Uniform::UseTexture => f.write_str("bUseTexture"),
            Uniform::UseLighting => f.write_str("bUseLighting"),
            Uniform::UseTint => f.write_str("bUseTint"),
            Uniform::UvScale => f.write_str("UVscale"),
            Uniform::MaterialDiffuse => f.write_str("material.diffuseColor"),
            Uniform::MaterialSpecular => f.write_str("material.specularColor"),
            Uniform::MaterialShininess => f.write_str("material.shininess"),
            Uniform::Directional(field) => write!(f, "directionalLight.{}", field.name()),
            Uniform::Point(i, field) => write!(f, "pointLights[{}].{}", i, field.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4([f32; 4]),
    Vec3([f32; 3]),
    Vec2([f32; 2]),
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl From<Matrix4<f32>> for UniformValue {
    fn from(m: Matrix4<f32>) -> Self {
        UniformValue::Mat4(m)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(v: Vector3<f32>) -> Self {
        UniformValue::Vec3(v.into())
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        UniformValue::Bool(v)
    }
}

/// Receiver of uniform writes.
pub trait UniformSink {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue);
}

impl<S: UniformSink + ?Sized> UniformSink for &mut S {
    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) {
        (**self).set_uniform(uniform, value);
    }
}
