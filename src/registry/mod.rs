//! Tag-keyed resource registries for textures and materials.

pub mod material;
pub mod texture;

pub use material::{Material, MaterialRegistry};
pub use texture::{
    DecodedImage, MAX_TEXTURE_UNITS, NO_TEXTURE_SLOT, TextureBackend, TextureEntry,
    TextureHandle, TextureRegistry,
};
