//! Named material property sets.

use serde::{Deserialize, Serialize};

/// Diffuse and specular colour plus shininess exponent under one tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub tag: String,
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub fn new(tag: &str, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Self {
        Self {
            tag: tag.to_string(),
            diffuse,
            specular,
            shininess,
        }
    }
}

/// Append-only list of materials.
///
/// Tags are not deduplicated. A lookup scans in definition order and returns
/// the first entry carrying the tag, so redefining a tag has no visible effect.
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The materials used by the room.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for material in builtin_materials() {
            registry.push(material);
        }
        registry
    }

    pub fn define(&mut self, tag: &str, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) {
        self.push(Material::new(tag, diffuse, specular, shininess));
    }

    pub fn push(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn lookup(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

pub fn builtin_materials() -> Vec<Material> {
    vec![
        Material::new("copper", [0.72, 0.43, 0.20], [0.95, 0.70, 0.45], 256.0),
        Material::new("plasticBlack", [0.06, 0.06, 0.06], [0.2, 0.2, 0.2], 8.0),
        // specular above 1 gives the glass its hot highlights
        Material::new("glass", [0.55, 0.60, 0.70], [1.5, 1.5, 1.5], 160.0),
        Material::new("floorMat", [0.22, 0.22, 0.24], [0.85, 0.85, 0.90], 128.0),
        Material::new("wallMat", [0.60, 0.55, 0.45], [0.02, 0.02, 0.02], 4.0),
        Material::new("zebraMat", [0.9, 0.9, 0.9], [0.2, 0.2, 0.2], 10.0),
        Material::new("mirrorMat", [0.75, 0.75, 0.75], [1.0, 1.0, 1.0], 256.0),
        Material::new("chevronMat", [0.85, 0.85, 0.85], [0.15, 0.15, 0.15], 12.0),
        Material::new("boxFurMat", [0.6, 0.6, 0.6], [0.2, 0.2, 0.2], 10.0),
    ]
}
