//! Declarative description of one drawn object.

use crate::{
    mesh::MeshKind,
    pass::{Emission, Face},
    transform::Transform,
};

/// How an object is coloured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Look {
    /// Material, then texture, then UV scale, then an optional tint.
    Textured {
        material: &'static str,
        texture: &'static str,
        uv: [f32; 2],
        tint: Option<[f32; 4]>,
    },
    /// Flat colour, then an optional material. Without a material the
    /// previously pushed one stays in effect.
    Flat {
        color: [f32; 4],
        material: Option<&'static str>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub look: Look,
    /// Cull this face while drawing the part.
    pub cull: Option<Face>,
}

impl Part {
    pub fn textured(
        name: &'static str,
        mesh: MeshKind,
        transform: Transform,
        material: &'static str,
        texture: &'static str,
        uv: [f32; 2],
    ) -> Self {
        Self {
            name,
            mesh,
            transform,
            look: Look::Textured {
                material,
                texture,
                uv,
                tint: None,
            },
            cull: None,
        }
    }

    pub fn flat(name: &'static str, mesh: MeshKind, transform: Transform, color: [f32; 4]) -> Self {
        Self {
            name,
            mesh,
            transform,
            look: Look::Flat {
                color,
                material: None,
            },
            cull: None,
        }
    }

    /// Tint multiplied into the texture. No effect on flat parts.
    pub fn tinted(mut self, rgba: [f32; 4]) -> Self {
        if let Look::Textured { tint, .. } = &mut self.look {
            *tint = Some(rgba);
        }
        self
    }

    /// Material for a flat part. No effect on textured parts, they always
    /// carry one.
    pub fn with_material(mut self, tag: &'static str) -> Self {
        if let Look::Flat { material, .. } = &mut self.look {
            *material = Some(tag);
        }
        self
    }

    pub fn culled(mut self, face: Face) -> Self {
        self.cull = Some(face);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionPass {
    Opaque,
    Translucent,
    Emissive(Emission),
}

/// A run of parts drawn under one pass configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: &'static str,
    pub pass: SectionPass,
    pub parts: Vec<Part>,
}

impl Section {
    pub fn new(name: &'static str, pass: SectionPass, parts: Vec<Part>) -> Self {
        Self { name, pass, parts }
    }
}
