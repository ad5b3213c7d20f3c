//! Scene lights.
//!
//! Lights are pushed once after the registries are populated and then stay
//! in the frame uniform block for the lifetime of the scene.

use cgmath::{InnerSpace, Vector3};

use crate::shader::{LightField, POINT_LIGHT_COUNT, Uniform, UniformSink, UniformValue};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub active: bool,
}

impl PointLight {
    /// Light with the common 1 / 0.09 / 0.032 attenuation.
    fn new(position: [f32; 3], ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        Self {
            position: position.into(),
            ambient,
            diffuse,
            specular,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            active: true,
        }
    }

    /// Attenuation factor at `distance`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLights {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl SceneLights {
    /// Warm key light from the bulb, a soft overhead fill and two dim washes
    /// on the back wall.
    pub fn room() -> Self {
        let directional = DirectionalLight {
            direction: Vector3::new(-0.2, -1.0, -0.3),
            ambient: [0.28; 3],
            diffuse: [0.38; 3],
            specular: [0.5; 3],
            active: true,
        };

        let bulb = PointLight {
            linear: 0.11,
            quadratic: 0.038,
            ..PointLight::new(
                [0.0, 10.15, -3.5],
                [0.22, 0.20, 0.15],
                [1.08, 0.95, 0.78],
                [1.25, 1.10, 0.90],
            )
        };
        let fill = PointLight::new([0.0, 5.5, -1.0], [0.2; 3], [0.4; 3], [0.2; 3]);
        let dome = PointLight::new(
            [0.0, 10.9, -3.5],
            [0.12, 0.10, 0.08],
            [0.45, 0.38, 0.28],
            [0.55, 0.50, 0.40],
        );
        let wash = |x: f32| {
            PointLight::new(
                [x, 11.5, -6.0],
                [0.05, 0.045, 0.035],
                [0.15, 0.13, 0.11],
                [0.05, 0.045, 0.035],
            )
        };

        Self {
            directional,
            points: vec![bulb, fill, dome, wash(-1.2), wash(1.2)],
        }
    }

    /// Write every light into `sink`. Point lights past the shader's array
    /// size are dropped with a warning; unused shader slots are deactivated.
    pub fn push<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        let d = &self.directional;
        let dir = |field| Uniform::Directional(field);
        sink.set_uniform(
            dir(LightField::Direction),
            UniformValue::Vec3(d.direction.normalize().into()),
        );
        sink.set_uniform(dir(LightField::Ambient), UniformValue::Vec3(d.ambient));
        sink.set_uniform(dir(LightField::Diffuse), UniformValue::Vec3(d.diffuse));
        sink.set_uniform(dir(LightField::Specular), UniformValue::Vec3(d.specular));
        sink.set_uniform(dir(LightField::Active), UniformValue::Bool(d.active));

        if self.points.len() > POINT_LIGHT_COUNT {
            log::warn!(
                "{} point lights defined, only the first {} are used",
                self.points.len(),
                POINT_LIGHT_COUNT
            );
        }
        for i in 0..POINT_LIGHT_COUNT {
            let at = |field| Uniform::Point(i, field);
            let Some(p) = self.points.get(i) else {
                sink.set_uniform(at(LightField::Active), UniformValue::Bool(false));
                continue;
            };
            sink.set_uniform(at(LightField::Position), UniformValue::Vec3(p.position.into()));
            sink.set_uniform(at(LightField::Ambient), UniformValue::Vec3(p.ambient));
            sink.set_uniform(at(LightField::Diffuse), UniformValue::Vec3(p.diffuse));
            sink.set_uniform(at(LightField::Specular), UniformValue::Vec3(p.specular));
            sink.set_uniform(at(LightField::Constant), UniformValue::Float(p.constant));
            sink.set_uniform(at(LightField::Linear), UniformValue::Float(p.linear));
            sink.set_uniform(at(LightField::Quadratic), UniformValue::Float(p.quadratic));
            sink.set_uniform(at(LightField::Active), UniformValue::Bool(p.active));
        }
    }
}
