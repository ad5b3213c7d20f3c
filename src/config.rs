//! Scene configuration.
//!
//! Everything here has a default reproducing the lamp room, so an empty TOML
//! file (or no file at all) gives the full scene. Configuration can add
//! materials and swap textures or camera settings; it cannot change the
//! object list.

use std::path::{Path, PathBuf};

use cgmath::{InnerSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    registry::Material,
    view::{Camera, ProjectionKind},
};

/// One texture to load at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSpec {
    /// Relative to [`SceneConfig::texture_dir`].
    pub file: String,
    pub tag: String,
}

impl TextureSpec {
    pub fn new(file: &str, tag: &str) -> Self {
        Self {
            file: file.to_string(),
            tag: tag.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub front: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub projection: ProjectionKind,
    pub ortho_height: f32,
    /// One of the two fixed viewpoints. Overrides `position`, `front`, `up`
    /// and `projection`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<ProjectionKind>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position.into(),
            front: [-0.1, -0.4, -1.0],
            up: camera.up.into(),
            fov: camera.zoom,
            near: camera.near,
            far: camera.far,
            projection: camera.projection,
            ortho_height: camera.ortho_height,
            preset: None,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> Camera {
        let mut camera = Camera {
            position: Point3::from(self.position),
            front: Vector3::from(self.front).normalize(),
            up: self.up.into(),
            zoom: self.fov,
            near: self.near,
            far: self.far,
            projection: self.projection,
            ortho_height: self.ortho_height,
        };
        match self.preset {
            Some(ProjectionKind::Perspective) => camera.perspective_preset(),
            Some(ProjectionKind::Orthographic) => camera.orthographic_preset(),
            None => {}
        }
        camera
    }
}

/// Output size and background of the offscreen render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub clear_colour: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            clear_colour: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn wgpu_clear_colour(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_colour;
        wgpu::Color { r, g, b, a }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub texture_dir: PathBuf,
    pub textures: Vec<TextureSpec>,
    /// Defined after the built-in materials. A tag that already exists is
    /// shadowed by the built-in one.
    pub materials: Vec<Material>,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
            textures: default_textures(),
            materials: Vec::new(),
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

pub fn default_textures() -> Vec<TextureSpec> {
    vec![
        TextureSpec::new("agedrustic.jpg", "Copper"),
        TextureSpec::new("frostedglass.jpg", "FrostedGlass"),
        TextureSpec::new("DarkBrownEpoxyFloor.jpg", "Floor"),
        TextureSpec::new("Wall_Plaster_Cream_Dark.jpg", "Wall"),
        TextureSpec::new("Zebra_Top.jpg", "ZebraFur"),
        TextureSpec::new("Mirror.jpg", "Mirror"),
        TextureSpec::new("FeltChevron.jpg", "ChevronFur"),
        TextureSpec::new("BoxFur.jpg", "BoxFur"),
    ]
}

impl SceneConfig {
    /// Load from a `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Where the texture of `spec` lives on disk.
    pub fn texture_path(&self, spec: &TextureSpec) -> PathBuf {
        self.texture_dir.join(&spec.file)
    }
}
