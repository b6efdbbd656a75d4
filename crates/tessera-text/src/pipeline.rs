//! GPU resources for drawing atlas glyph quads: the alpha-blended text
//! pipeline, its bind group layouts, and per-batch buffers.

use std::sync::Arc;

use tessera_core::math::Mat4;
use tessera_core::profiling::profile_function;
use tessera_render::{GpuTexture, GraphicsContext, wgpu};

use crate::emitter::{TextBatch, TextVertex};

const TEXT_SHADER: &str = include_str!("../shaders/text.wgsl");

/// Bind group slot of the atlas texture and sampler.
const ATLAS_GROUP: u32 = 0;
/// Bind group slot of the projection uniform.
const PROJECTION_GROUP: u32 = 1;

/// Vertex and index buffers for one [`TextBatch`].
pub(crate) struct BatchBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

/// The text render pipeline and the state shared by every draw.
pub(crate) struct TextPipeline {
    context: Arc<GraphicsContext>,
    pipeline: wgpu::RenderPipeline,
    atlas_layout: wgpu::BindGroupLayout,
    atlas_sampler: wgpu::Sampler,
    projection: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
}

impl TextPipeline {
    pub fn new(context: Arc<GraphicsContext>, surface_format: wgpu::TextureFormat) -> Self {
        profile_function!();
        let device = context.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Text Shader"),
            source: wgpu::ShaderSource::Wgsl(TEXT_SHADER.into()),
        });

        // Clamp so edge cells never sample the opposite side of the atlas.
        let atlas_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Text Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let atlas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Text Atlas Bind Group Layout"),
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
        });

        let projection_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Text Projection Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let projection = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Text Projection"),
            size: std::mem::size_of::<[[f32; 4]; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        context.queue().write_buffer(
            &projection,
            0,
            bytemuck::cast_slice(&Mat4::IDENTITY.to_cols_array_2d()),
        );

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Text Projection Bind Group"),
            layout: &projection_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&atlas_layout, &projection_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Text Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TextVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                        2 => Float32x4,
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            context,
            pipeline,
            atlas_layout,
            atlas_sampler,
            projection,
            projection_bind_group,
        }
    }

    pub fn set_projection(&self, projection: Mat4) {
        self.context.queue().write_buffer(
            &self.projection,
            0,
            bytemuck::cast_slice(&projection.to_cols_array_2d()),
        );
    }

    /// Bind group sampling `atlas` with the shared linear sampler.
    pub fn atlas_bind_group(&self, atlas: &GpuTexture) -> wgpu::BindGroup {
        let view = atlas
            .as_wgpu()
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.context
            .device()
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Text Atlas Bind Group"),
                layout: &self.atlas_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.atlas_sampler),
                    },
                ],
            })
    }

    /// Copy a batch's quads into freshly created GPU buffers.
    pub fn upload_batch(&self, batch: &TextBatch) -> BatchBuffers {
        profile_function!();
        BatchBuffers {
            vertices: self.create_filled_buffer(
                "Text Vertex Buffer",
                bytemuck::cast_slice(&batch.vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            indices: self.create_filled_buffer(
                "Text Index Buffer",
                bytemuck::cast_slice(&batch.indices),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: batch.indices.len() as u32,
        }
    }

    /// Select the pipeline and projection for the following draws.
    pub fn begin(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(PROJECTION_GROUP, &self.projection_bind_group, &[]);
    }

    /// Draw one batch's quads from `atlas`.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass,
        atlas: &wgpu::BindGroup,
        buffers: &BatchBuffers,
    ) {
        render_pass.set_bind_group(ATLAS_GROUP, atlas, &[]);
        render_pass.set_vertex_buffer(0, buffers.vertices.slice(..));
        render_pass.set_index_buffer(buffers.indices.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..buffers.index_count, 0, 0..1);
    }

    fn create_filled_buffer(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        let buffer = self.context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: contents.len() as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.context.queue().write_buffer(&buffer, 0, contents);
        buffer
    }
}
