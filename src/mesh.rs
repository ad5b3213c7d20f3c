//! Primitive meshes the room is built from, and the draw seam.

use std::fmt;

use crate::{pass::RenderPassState, shader::UniformSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Box,
    Cylinder,
    TaperedCylinder,
    Sphere,
    Torus,
    Plane,
    /// Triangular pyramid.
    Pyramid3,
    Prism,
}

impl MeshKind {
    pub const ALL: [MeshKind; 8] = [
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::TaperedCylinder,
        MeshKind::Sphere,
        MeshKind::Torus,
        MeshKind::Plane,
        MeshKind::Pyramid3,
        MeshKind::Prism,
    ];
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeshKind::Box => "box",
            MeshKind::Cylinder => "cylinder",
            MeshKind::TaperedCylinder => "tapered cylinder",
            MeshKind::Sphere => "sphere",
            MeshKind::Torus => "torus",
            MeshKind::Plane => "plane",
            MeshKind::Pyramid3 => "pyramid",
            MeshKind::Prism => "prism",
        };
        f.write_str(name)
    }
}

/// Issues one draw of a preloaded mesh with the uniforms currently set and
/// the given fixed-function state.
pub trait MeshDrawer {
    fn draw_mesh(&mut self, mesh: MeshKind, state: &RenderPassState);
}

/// Anything a frame can be rendered into.
pub trait RenderTarget: UniformSink + MeshDrawer {}

impl<T: UniformSink + MeshDrawer + ?Sized> RenderTarget for T {}
