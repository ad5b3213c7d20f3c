//! wgpu backend: texture units, pipelines per pass state and an offscreen
//! renderer that replays recorded draws.

mod context;
mod draw_list;
mod mesh;
mod pipeline;
mod renderer;
mod texture;

pub use context::{GpuContext, OffscreenTarget};
pub use draw_list::{DrawCommand, DrawList};
pub use mesh::{GpuMesh, MeshLibrary, SceneVertex};
pub use pipeline::{PipelineCache, blend_state, mk_render_pipeline};
pub use renderer::SceneRenderer;
pub use texture::{Texture, TextureUnits, mip_levels};
