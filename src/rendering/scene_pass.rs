use wgpu::{Device, MultisampleState, PipelineCompilationOptions, RenderPassDescriptor, ShaderSource};

use crate::rendering::{
    render_common::RenderCommon,
    vertex_batch::{SceneBatch, Vertex},
};

const SCENE_SHADER: &str = include_str!("scene.wgsl");

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Vertex buffer that grows to the largest batch it has seen.
struct DynamicVertexBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    len: u32,
}

impl DynamicVertexBuffer {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
            len: 0,
        }
    }

    fn upload(&mut self, device: &Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        self.len = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (self.capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
        }
    }

    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        let Some(buffer) = &self.buffer else {
            return;
        };
        if self.len == 0 {
            return;
        }

        render_pass.set_pipeline(pipeline);
        render_pass.set_vertex_buffer(0, buffer.slice(..));
        render_pass.draw(0..self.len, 0..1);
    }
}

/// Draws a [`SceneBatch`]: filled meshes, then lines, then point sprites.
pub struct ScenePass {
    camera_bind_group: wgpu::BindGroup,
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    blended_point_pipeline: wgpu::RenderPipeline,
    additive_point_pipeline: wgpu::RenderPipeline,
    triangles: DynamicVertexBuffer,
    lines: DynamicVertexBuffer,
    blended_points: DynamicVertexBuffer,
    additive_points: DynamicVertexBuffer,
}

impl ScenePass {
    pub fn create(device: &Device, common: &RenderCommon) -> anyhow::Result<Self> {
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("camera_bind_group_layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: common.camera_uniform_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene pipeline layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene shader"),
            source: ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let format = common.output_surface_config.format;
        let pipeline = |label: &str,
                        topology: wgpu::PrimitiveTopology,
                        fragment_entry: &str,
                        blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fragment_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        Ok(Self {
            camera_bind_group,
            triangle_pipeline: pipeline(
                "Mesh pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_solid",
                wgpu::BlendState::ALPHA_BLENDING,
            ),
            line_pipeline: pipeline(
                "Line pipeline",
                wgpu::PrimitiveTopology::LineList,
                "fs_solid",
                wgpu::BlendState::ALPHA_BLENDING,
            ),
            blended_point_pipeline: pipeline(
                "Point pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_point",
                wgpu::BlendState::ALPHA_BLENDING,
            ),
            additive_point_pipeline: pipeline(
                "Additive point pipeline",
                wgpu::PrimitiveTopology::TriangleList,
                "fs_point",
                ADDITIVE_BLENDING,
            ),
            triangles: DynamicVertexBuffer::new("Mesh vertices"),
            lines: DynamicVertexBuffer::new("Line vertices"),
            blended_points: DynamicVertexBuffer::new("Point vertices"),
            additive_points: DynamicVertexBuffer::new("Additive point vertices"),
        })
    }

    pub fn upload(&mut self, device: &Device, queue: &wgpu::Queue, batch: &SceneBatch) {
        self.triangles.upload(device, queue, &batch.triangles);
        self.lines.upload(device, queue, &batch.lines);
        self.blended_points.upload(device, queue, &batch.blended_points);
        self.additive_points.upload(device, queue, &batch.additive_points);
    }

    pub fn render(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        clear_color: wgpu::Color,
    ) {
        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        self.triangles.draw(&mut render_pass, &self.triangle_pipeline);
        self.lines.draw(&mut render_pass, &self.line_pipeline);
        self.blended_points
            .draw(&mut render_pass, &self.blended_point_pipeline);
        self.additive_points
            .draw(&mut render_pass, &self.additive_point_pipeline);
    }
}
