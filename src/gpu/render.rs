use std::num::NonZeroU64;

use wgpu::{
    BindGroup, BindGroupLayout, BindGroupLayoutEntry, BufferBindingType, Device,
    RenderPipeline as WgpuRenderPipeline, TextureFormat, TextureView,
};

use super::buffers::RenderParams;
use super::GridBuffers;
use throttled_life::config::DEAD_COLOR;

const CELLS_BINDING: u32 = 0;
const PARAMS_BINDING: u32 = 1;

/// Fullscreen pass that maps each pixel to its cell
pub struct RenderPipeline {
    pipeline: WgpuRenderPipeline,
    bind_group_layout: BindGroupLayout,
}

/// Fragment-visible buffer slot of the given kind
fn fragment_buffer(binding: u32, ty: BufferBindingType, min_size: u64) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(min_size),
        },
        count: None,
    }
}

fn clear_color() -> wgpu::Color {
    let [r, g, b, a] = DEAD_COLOR.map(f64::from);
    wgpu::Color { r, g, b, a }
}

impl RenderPipeline {
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/render.wgsl").into()),
        });

        let cell_word = std::mem::size_of::<u32>() as u64;
        let params_size = std::mem::size_of::<RenderParams>() as u64;
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grid-bind-group-layout"),
            entries: &[
                fragment_buffer(
                    CELLS_BINDING,
                    BufferBindingType::Storage { read_only: true },
                    cell_word,
                ),
                fragment_buffer(PARAMS_BINDING, BufferBindingType::Uniform, params_size),
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grid-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let target = wgpu::ColorTargetState {
            format,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(target)],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
        }
    }

    /// Bind a grid's cell and parameter buffers. Rebuilt with the buffers.
    pub fn create_bind_group(&self, device: &Device, buffers: &GridBuffers) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: CELLS_BINDING,
                    resource: buffers.cells_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: PARAMS_BINDING,
                    resource: buffers.render_params_buffer.as_entire_binding(),
                },
            ],
        })
    }

    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &TextureView,
        bind_group: &BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("grid-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        // One triangle covers the whole target.
        pass.draw(0..3, 0..1);
    }
}
