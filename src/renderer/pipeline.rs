//! WebGPU render pipeline setup
//!
//! Geometry is static: every membrane is unique because of the baked noise,
//! so all membranes are concatenated into one vertex buffer and drawn with a
//! per-body base vertex. Nuclei share a single clean sphere and draw as one
//! instanced call. Only the instance buffer (model matrices) and the uniform
//! buffer change per frame.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::vertex::{InstanceData, MeshVertex, colors, mesh_vertices};
use crate::consts::{NUCLEUS_RADIUS, SPHERE_SEGMENTS};
use crate::scene::{AnimationContext, Body, SphereMesh};

/// World-space point light position, with ambient handled in the shader
const LIGHT_POS: [f32; 4] = [10.0, 10.0, 10.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    light_pos: [f32; 4],
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    membrane_vertex_buffer: wgpu::Buffer,
    membrane_index_buffer: wgpu::Buffer,
    membrane_index_count: u32,
    membrane_vertex_stride: u32,
    nucleus_vertex_buffer: wgpu::Buffer,
    nucleus_index_buffer: wgpu::Buffer,
    nucleus_index_count: u32,
    instance_buffer: wgpu::Buffer,
    body_count: u32,
    depth_texture: wgpu::TextureView,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        bodies: &[Body],
    ) -> Self {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("cell-lattice-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cell_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_pos: LIGHT_POS,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cell_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::desc(), InstanceData::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // All membranes share one tessellation, so a single index pattern
        // covers every body via base_vertex offsets.
        let mut membrane_verts = Vec::new();
        let mut membrane_indices: Vec<u32> = Vec::new();
        let mut membrane_vertex_stride = 0u32;
        for body in bodies {
            if membrane_indices.is_empty() {
                membrane_indices = body.membrane.indices.clone();
                membrane_vertex_stride = body.membrane.vertex_count() as u32;
            }
            membrane_verts.extend(mesh_vertices(&body.membrane));
        }

        let membrane_vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("membrane_vertex_buffer"),
                contents: bytemuck::cast_slice(&membrane_verts),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let membrane_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("membrane_index_buffer"),
            contents: bytemuck::cast_slice(&membrane_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let nucleus_mesh =
            SphereMesh::uv_sphere(NUCLEUS_RADIUS, SPHERE_SEGMENTS, SPHERE_SEGMENTS);
        let nucleus_verts = mesh_vertices(&nucleus_mesh);
        let nucleus_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nucleus_vertex_buffer"),
            contents: bytemuck::cast_slice(&nucleus_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let nucleus_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("nucleus_index_buffer"),
            contents: bytemuck::cast_slice(&nucleus_mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Instance layout: membrane entries first, nucleus entries after
        let body_count = bodies.len() as u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (body_count as u64 * 2) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(&device, width, height);

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            membrane_vertex_buffer,
            membrane_index_buffer,
            membrane_index_count: membrane_indices.len() as u32,
            membrane_vertex_stride,
            nucleus_vertex_buffer,
            nucleus_index_buffer,
            nucleus_index_count: nucleus_mesh.indices.len() as u32,
            instance_buffer,
            body_count,
            depth_texture,
            size: (width, height),
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture =
                Self::create_depth_texture(&self.device, new_width, new_height);
        }
    }

    /// Submit one frame from the current animation state
    pub fn render(&mut self, ctx: &AnimationContext) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: ctx.camera.view_projection().to_cols_array_2d(),
                light_pos: LIGHT_POS,
            }),
        );

        let mut instances = Vec::with_capacity(ctx.bodies.len() * 2);
        for body in &ctx.bodies {
            instances.push(InstanceData::new(body.model_matrix(), colors::MEMBRANE));
        }
        for body in &ctx.bodies {
            instances.push(InstanceData::new(body.model_matrix(), colors::NUCLEUS));
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let bg = colors::BACKGROUND;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cell_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            // Membranes: one base-vertex draw per body
            pass.set_vertex_buffer(0, self.membrane_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(
                self.membrane_index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            for i in 0..self.body_count {
                pass.draw_indexed(
                    0..self.membrane_index_count,
                    (i * self.membrane_vertex_stride) as i32,
                    i..i + 1,
                );
            }

            // Nuclei: one instanced draw over the shared clean sphere
            pass.set_vertex_buffer(0, self.nucleus_vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.nucleus_index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(
                0..self.nucleus_index_count,
                0,
                self.body_count..self.body_count * 2,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
