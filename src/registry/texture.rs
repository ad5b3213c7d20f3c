//! Tagged texture registry.
//!
//! Textures are decoded on the CPU, flipped vertically so row 0 is the
//! bottom of the image, handed to a [`TextureBackend`] for upload and then
//! remembered under a caller-chosen tag. The unit slot of a texture is the
//! registry size at the moment it was loaded. Slots are never reused or
//! compacted while the registry lives; [`TextureRegistry::release`] empties it
//! and numbering starts over at zero.

use std::{collections::HashMap, path::Path};

use crate::error::TextureError;

/// Number of texture units a shader can address.
pub const MAX_TEXTURE_UNITS: usize = 16;

/// Written into the sampler uniform when a tag is not registered.
pub const NO_TEXTURE_SLOT: i32 = -1;

/// Opaque identifier the backend hands out for an uploaded texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Pixels ready for upload: tightly packed, bottom row first.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
    pub data: Vec<u8>,
}

impl DecodedImage {
    /// Decode an image file from disk.
    pub fn open(path: &Path, tag: &str) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            source_name: path.display().to_string(),
            source,
        })?;
        Self::from_image(img, tag)
    }

    /// Decode an in-memory encoded image (PNG, JPEG).
    pub fn from_bytes(bytes: &[u8], tag: &str) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
            source_name: tag.to_string(),
            source,
        })?;
        Self::from_image(img, tag)
    }

    pub fn from_image(img: image::DynamicImage, tag: &str) -> Result<Self, TextureError> {
        let channels = img.color().channel_count();
        let img = img.flipv();
        let (width, height) = (img.width(), img.height());
        let data = match channels {
            3 => img.into_rgb8().into_raw(),
            4 => img.into_rgba8().into_raw(),
            _ => {
                return Err(TextureError::UnsupportedFormat {
                    tag: tag.to_string(),
                    channels,
                });
            }
        };
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Expand to RGBA8, alpha 255 where the source had none.
    pub fn to_rgba8(&self) -> Vec<u8> {
        match self.channels {
            4 => self.data.clone(),
            _ => self
                .data
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        }
    }
}

/// Whatever owns the actual GPU textures.
///
/// The registry only keeps handles; creating, binding and destroying the
/// underlying objects is up to the backend.
pub trait TextureBackend {
    /// Upload pixels as a new texture with repeat wrapping, linear filtering
    /// and a full mip chain.
    fn upload(&mut self, tag: &str, image: &DecodedImage) -> TextureHandle;

    /// Make `handle` visible on texture unit `slot`.
    fn bind(&mut self, slot: u32, handle: TextureHandle);

    /// Free the texture behind `handle`. The handle is dead afterwards.
    fn release(&mut self, handle: TextureHandle);
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
    pub slot: u32,
}

/// Insertion-ordered textures with O(1) tag lookup.
///
/// Duplicate tags are allowed. The later entry occupies its own slot but
/// lookups keep resolving to the first one.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_tag: HashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Returns the assigned unit slot. On failure nothing is registered and
    /// the next successful load receives the slot this one would have had.
    pub fn load<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<u32, TextureError> {
        let path = path.as_ref();
        self.ensure_capacity(tag)
            .and_then(|_| DecodedImage::open(path, tag))
            .map(|image| self.register(backend, tag, &image))
            .inspect_err(|e| log::error!("failed to load texture {}: {}", path.display(), e))
    }

    /// Same as [`load`](Self::load) for an encoded image already in memory.
    pub fn load_bytes<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        bytes: &[u8],
        tag: &str,
    ) -> Result<u32, TextureError> {
        self.ensure_capacity(tag)
            .and_then(|_| DecodedImage::from_bytes(bytes, tag))
            .map(|image| self.register(backend, tag, &image))
            .inspect_err(|e| log::error!("failed to load texture '{}': {}", tag, e))
    }

    /// Register pixels that were decoded elsewhere.
    pub fn insert<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        image: &DecodedImage,
        tag: &str,
    ) -> Result<u32, TextureError> {
        if image.channels != 3 && image.channels != 4 {
            return Err(TextureError::UnsupportedFormat {
                tag: tag.to_string(),
                channels: image.channels,
            });
        }
        self.ensure_capacity(tag)?;
        Ok(self.register(backend, tag, image))
    }

    fn ensure_capacity(&self, tag: &str) -> Result<(), TextureError> {
        if self.entries.len() >= MAX_TEXTURE_UNITS {
            return Err(TextureError::RegistryFull {
                tag: tag.to_string(),
                limit: MAX_TEXTURE_UNITS,
            });
        }
        Ok(())
    }

    fn register<B: TextureBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        tag: &str,
        image: &DecodedImage,
    ) -> u32 {
        let handle = backend.upload(tag, image);
        let index = self.entries.len();
        let slot = index as u32;
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
            slot,
        });
        self.by_tag.entry(tag.to_string()).or_insert(index);
        log::info!(
            "texture '{}' {}x{} ({} channels) on unit {}",
            tag,
            image.width,
            image.height,
            image.channels,
            slot
        );
        slot
    }

    /// Bind every texture to the unit matching its slot, in slot order.
    pub fn bind_all<B: TextureBackend + ?Sized>(&self, backend: &mut B) {
        for entry in &self.entries {
            backend.bind(entry.slot, entry.handle);
        }
    }

    pub fn find(&self, tag: &str) -> Option<&TextureEntry> {
        self.by_tag.get(tag).map(|&i| &self.entries[i])
    }

    pub fn find_slot(&self, tag: &str) -> Option<u32> {
        self.find(tag).map(|e| e.slot)
    }

    /// Slot as written to the sampler uniform, [`NO_TEXTURE_SLOT`] on a miss.
    pub fn slot_index(&self, tag: &str) -> i32 {
        self.find_slot(tag).map_or(NO_TEXTURE_SLOT, |s| s as i32)
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.find(tag).map(|e| e.handle)
    }

    /// Free every texture and forget all tags.
    pub fn release<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) {
        for entry in self.entries.drain(..) {
            backend.release(entry.handle);
        }
        self.by_tag.clear();
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
