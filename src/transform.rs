//! Model matrix composition.
//!
//! Every object in the room is described by a scale, a rotation in degrees
//! around the three axes and a position. These collapse into one model matrix
//! in a fixed order: scale first, then X, Y and Z rotation, then translation.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees per axis) and position of one draw.
///
/// No validation happens here. Zero or negative scale is passed through
/// untouched, the glass shade relies on a negative Y scale to flip its funnel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

impl Transform {
    pub fn new(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation: rotation.into(),
            position: position.into(),
        }
    }

    /// Uniform scale, no rotation.
    pub fn scaled(scale: f32, position: [f32; 3]) -> Self {
        Self::new([scale; 3], [0.0; 3], position)
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.position,
        )
    }
}

/// `Translate(position) * Rz * Ry * Rx * Scale`.
pub fn compose(
    scale: Vector3<f32>,
    rot_x: f32,
    rot_y: f32,
    rot_z: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(rot_z))
        * Matrix4::from_angle_y(Deg(rot_y))
        * Matrix4::from_angle_x(Deg(rot_x))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn identity_parameters_give_identity_matrix() {
        assert_eq!(Transform::default().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn translation_is_applied_last() {
        let m = Transform::new([3.0, 3.0, 3.0], [0.0; 3], [1.0, 2.0, 3.0]).to_matrix();
        let p = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 4.0).abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
        assert!((p.z - 3.0).abs() < 1e-5);
    }
}
