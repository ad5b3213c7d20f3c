//! Replays a [`DrawList`] into a wgpu render pass.
//!
//! Bind groups:
//! - group 0: frame uniform (camera and lights)
//! - group 1: object uniform, one dynamic offset per draw
//! - group 2: texture unit of the draw

use std::{collections::HashSet, num::NonZeroU64};

use super::{
    context::{GpuContext, OffscreenTarget},
    draw_list::DrawList,
    mesh::{MeshLibrary, SceneVertex},
    pipeline::PipelineCache,
    texture::TextureUnits,
};
use crate::{
    config::RenderConfig,
    mesh::MeshKind,
    shader::{FrameUniform, ObjectUniform},
};

const OBJECT_SIZE: u64 = std::mem::size_of::<ObjectUniform>() as u64;

pub struct SceneRenderer {
    frame_buffer: wgpu::Buffer,
    frame_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_group: wgpu::BindGroup,
    object_capacity: u64,
    stride: u64,
    pipelines: PipelineCache,
    pub clear_colour: wgpu::Color,
}

fn align_to(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

impl SceneRenderer {
    /// Renderer clearing to the configured background.
    pub fn from_config(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        units: &TextureUnits,
        config: &RenderConfig,
    ) -> Self {
        let mut renderer = Self::new(device, color_format, units);
        renderer.clear_colour = config.wgpu_clear_colour();
        renderer
    }

    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, units: &TextureUnits) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("frame_bind_group_layout"),
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(OBJECT_SIZE),
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Buffer"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(OBJECT_SIZE, alignment);
        let object_capacity = 128;
        let (object_buffer, object_group) =
            Self::object_resources(device, &object_layout, stride, object_capacity);

        let pipelines = PipelineCache::new(
            device,
            color_format,
            &[&frame_layout, &object_layout, units.layout()],
        );

        Self {
            frame_buffer,
            frame_group,
            object_layout,
            object_buffer,
            object_group,
            object_capacity,
            stride,
            pipelines,
            clear_colour: wgpu::Color::BLACK,
        }
    }

    fn object_resources(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Buffer"),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(OBJECT_SIZE),
                }),
            }],
            label: Some("object_bind_group"),
        });
        (buffer, group)
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Upload the list's uniforms and record every draw into one pass on
    /// `target`. Returns the number of draws actually issued.
    pub fn render(
        &mut self,
        ctx: &GpuContext,
        target: &OffscreenTarget,
        list: &DrawList,
        meshes: &MeshLibrary,
        units: &TextureUnits,
    ) -> usize {
        let device = &ctx.device;
        ctx.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&list.uniforms().frame),
        );

        let count = list.len() as u64;
        if count > self.object_capacity {
            let capacity = count.next_power_of_two();
            log::debug!("growing object buffer to {} draws", capacity);
            let (buffer, group) =
                Self::object_resources(device, &self.object_layout, self.stride, capacity);
            self.object_buffer = buffer;
            self.object_group = group;
            self.object_capacity = capacity;
        }
        if count > 0 {
            let mut staging = vec![0u8; (count * self.stride) as usize];
            for (i, command) in list.commands().iter().enumerate() {
                let at = i * self.stride as usize;
                staging[at..at + OBJECT_SIZE as usize]
                    .copy_from_slice(bytemuck::bytes_of(&command.object));
            }
            ctx.queue.write_buffer(&self.object_buffer, 0, &staging);
        }

        self.pipelines
            .prepare(device, list.pipeline_keys(), &[SceneVertex::desc()]);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });
        let mut issued = 0;
        let mut missing: HashSet<MeshKind> = HashSet::new();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &target.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.frame_group, &[]);
            for (i, command) in list.commands().iter().enumerate() {
                let Some(mesh) = meshes.get(command.mesh) else {
                    missing.insert(command.mesh);
                    continue;
                };
                let Some(pipeline) = self.pipelines.get(&command.key) else {
                    continue;
                };
                let offset = (i as u64 * self.stride) as wgpu::DynamicOffset;
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(1, &self.object_group, &[offset]);
                render_pass.set_bind_group(2, units.unit(command.object.texture_slot), &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
                issued += 1;
            }
        }
        ctx.queue.submit(std::iter::once(encoder.finish()));

        for kind in missing {
            log::warn!("no {} mesh registered, its draws were skipped", kind);
        }
        issued
    }
}
