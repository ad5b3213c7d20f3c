//! Camera state and the per-frame view/projection push.
//!
//! The camera is a plain value owned by the scene. Input handling that moves
//! it lives outside this crate.

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::shader::{Uniform, UniformSink, UniformValue};

/// cgmath produces OpenGL clip space (z in -1..1), wgpu wants 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Unit viewing direction.
    pub front: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
    pub projection: ProjectionKind,
    /// Visible world height of the orthographic projection.
    pub ortho_height: f32,
}

impl Default for Camera {
    /// Elevated view looking slightly down at the cabinet and lamp.
    fn default() -> Self {
        Self {
            position: Point3::new(0.5, 8.0, 16.0),
            front: Vector3::new(-0.1, -0.4, -1.0).normalize(),
            up: Vector3::unit_y(),
            zoom: 80.0,
            near: 0.1,
            far: 100.0,
            projection: ProjectionKind::Perspective,
            ortho_height: 16.0,
        }
    }
}

impl Camera {
    /// High and back, angled down.
    pub fn perspective_preset(&mut self) {
        self.projection = ProjectionKind::Perspective;
        self.position = Point3::new(0.5, 10.5, 22.0);
        self.front = Vector3::new(-0.1, -0.45, -1.0).normalize();
        self.up = Vector3::unit_y();
    }

    /// Head-on at lamp height.
    pub fn orthographic_preset(&mut self) {
        self.projection = ProjectionKind::Orthographic;
        self.position = Point3::new(0.0, 7.5, 12.0);
        self.front = -Vector3::unit_z();
        self.up = Vector3::unit_y();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        let proj = match self.projection {
            ProjectionKind::Perspective => {
                cgmath::perspective(Deg(self.zoom), aspect, self.near, self.far)
            }
            ProjectionKind::Orthographic => {
                let half_h = self.ortho_height / 2.0;
                let half_w = half_h * aspect;
                cgmath::ortho(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        };
        OPENGL_TO_WGPU_MATRIX * proj
    }

    /// Write view, projection and eye position.
    pub fn push<S: UniformSink + ?Sized>(&self, sink: &mut S, aspect: f32) {
        sink.set_uniform(Uniform::View, UniformValue::Mat4(self.view_matrix()));
        sink.set_uniform(
            Uniform::Projection,
            UniformValue::Mat4(self.projection_matrix(aspect)),
        );
        let eye: [f32; 3] = self.position.into();
        sink.set_uniform(Uniform::ViewPosition, UniformValue::Vec3(eye));
    }
}
