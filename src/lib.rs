//! lamplight
//!
//! Scene composition for a small lit room: a mirrored cabinet, a copper
//! desk lamp with a glass shade and a glowing bulb. This crate turns a
//! declarative list of parts into shader uniform writes and draw calls, and
//! ships a wgpu backend that renders the result offscreen.
//!
//! High-level modules
//! - `transform`: scale, rotate, translate into one model matrix
//! - `registry`: tag-keyed textures (bound to units) and materials
//! - `shader`: the uniform interface and the binder that writes it
//! - `pass`: render-pass state (opaque, translucent, emissive) and pipeline keys
//! - `lighting`: directional and point lights of the room
//! - `view`: camera and projection
//! - `scene`: parts, sections, the scoped frame and the room itself
//! - `config`: TOML scene configuration
//! - `gpu`: wgpu device setup, texture units, pipelines and the renderer
//!

pub mod config;
pub mod error;
pub mod gpu;
pub mod lighting;
pub mod logging;
pub mod mesh;
pub mod pass;
pub mod registry;
pub mod scene;
pub mod shader;
pub mod transform;
pub mod view;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use config::SceneConfig;
pub use error::{ConfigError, TextureError};
pub use mesh::{MeshDrawer, MeshKind, RenderTarget};
pub use pass::{Emission, PassKind, RenderPassState};
pub use scene::Scene;
pub use transform::Transform;
pub use wgpu;
