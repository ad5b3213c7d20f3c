//! GPU textures and the texture-unit backend.
//!
//! wgpu has no numbered texture units, so a unit is modelled as a bind group
//! (texture at binding 0, sampler at binding 1) stored at the unit's index.
//! Draws look the group up by the slot in their object uniform; slot `-1`
//! and empty units resolve to a 1x1 white fallback so untextured draws
//! still have something valid bound.

use image::{RgbaImage, imageops::FilterType};

use crate::registry::{DecodedImage, MAX_TEXTURE_UNITS, TextureBackend, TextureHandle};

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// Solid white, sampled when a draw has no texture.
    pub fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let white = DecodedImage {
            width: 1,
            height: 1,
            channels: 4,
            data: vec![255; 4],
        };
        Self::from_decoded(device, queue, &white, "fallback white")
    }

    /// Upload decoded pixels as sRGB with a full mip chain, repeat wrapping and
    /// linear filtering.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Self {
        let (width, height) = (image.width.max(1), image.height.max(1));
        let mip_level_count = mip_levels(width, height);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let rgba = image.to_rgba8();
        match RgbaImage::from_raw(width, height, rgba) {
            Some(base) => {
                for level in 0..mip_level_count {
                    let w = (width >> level).max(1);
                    let h = (height >> level).max(1);
                    let pixels = if level == 0 {
                        base.clone()
                    } else {
                        image::imageops::resize(&base, w, h, FilterType::Triangle)
                    };
                    write_level(queue, &texture, level, w, h, pixels.as_raw());
                }
            }
            None => log::error!(
                "texture '{}': {} bytes do not cover {}x{}",
                label,
                image.data.len(),
                width,
                height
            ),
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_default_sampler(device));
        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Number of levels down to 1x1.
pub fn mip_levels(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    level: u32,
    width: u32,
    height: u32,
    data: &[u8],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture,
            mip_level: level,
            origin: wgpu::Origin3d::ZERO,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("repeat linear"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

pub fn texture_unit_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_unit_layout"),
    })
}

/// [`TextureBackend`] on wgpu.
pub struct TextureUnits {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// Indexed by handle; `None` once released. Released entries are
    /// handed out again by the next upload.
    textures: Vec<Option<Texture>>,
    units: Vec<Option<(TextureHandle, wgpu::BindGroup)>>,
    fallback: wgpu::BindGroup,
    _fallback_texture: Texture,
}

impl TextureUnits {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_unit_layout(device);
        let sampler = create_default_sampler(device);
        let fallback_texture = Texture::create_fallback(device, queue);
        let fallback = unit_bind_group(device, &layout, &fallback_texture, &sampler, "unit fallback");
        Self {
            device: device.clone(),
            queue: queue.clone(),
            layout,
            sampler,
            textures: Vec::new(),
            units: (0..MAX_TEXTURE_UNITS).map(|_| None).collect(),
            fallback,
            _fallback_texture: fallback_texture,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for the slot written in a draw's uniform.
    pub fn unit(&self, slot: i32) -> &wgpu::BindGroup {
        usize::try_from(slot)
            .ok()
            .and_then(|s| self.units.get(s))
            .and_then(|u| u.as_ref())
            .map_or(&self.fallback, |(_, group)| group)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize).and_then(|t| t.as_ref())
    }

    /// Textures currently alive.
    pub fn live(&self) -> usize {
        self.textures.iter().filter(|t| t.is_some()).count()
    }

    /// Handle entries held, alive or free.
    pub fn allocated(&self) -> usize {
        self.textures.len()
    }
}

/// Store `item` in the first free entry, growing only when none is free.
fn store_in_free_entry<T>(entries: &mut Vec<Option<T>>, item: T) -> usize {
    match entries.iter().position(Option::is_none) {
        Some(index) => {
            entries[index] = Some(item);
            index
        }
        None => {
            entries.push(Some(item));
            entries.len() - 1
        }
    }
}

fn unit_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    let sampler = texture.sampler.as_ref().unwrap_or(sampler);
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(label),
    })
}

impl TextureBackend for TextureUnits {
    fn upload(&mut self, tag: &str, image: &DecodedImage) -> TextureHandle {
        let texture = Texture::from_decoded(&self.device, &self.queue, image, tag);
        TextureHandle(store_in_free_entry(&mut self.textures, texture) as u32)
    }

    fn bind(&mut self, slot: u32, handle: TextureHandle) {
        let Some(unit) = self.units.get_mut(slot as usize) else {
            log::warn!("texture unit {} does not exist", slot);
            return;
        };
        let Some(texture) = self.textures.get(handle.0 as usize).and_then(|t| t.as_ref()) else {
            log::warn!("cannot bind released texture {:?} to unit {}", handle, slot);
            return;
        };
        let label = format!("texture unit {}", slot);
        let group = unit_bind_group(&self.device, &self.layout, texture, &self.sampler, &label);
        *unit = Some((handle, group));
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.get_mut(handle.0 as usize).and_then(Option::take) {
            texture.texture.destroy();
        }
        for unit in &mut self.units {
            if unit.as_ref().is_some_and(|(bound, _)| *bound == handle) {
                *unit = None;
            }
        }
    }
}
