//! WebGPU renderer. Consumes the per-frame transform snapshot from the core
//! animator and submits one render pass: lit solids, then the wireframe
//! insets, then the additive god-ray cones.

use glam::Mat4;
use mandala_core::constants::*;
use mandala_core::mesh::{self, MeshData};
use mandala_core::scene::{LIGHT_COLORS, LIGHT_INTENSITIES, LIGHT_RANGES};
use mandala_core::{Animator, CameraRig, FrameTransforms};
use std::ops::Range;
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightPacked {
    pos_range: [f32; 4],
    color_intensity: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    fog: [f32; 4],
    ambient: [f32; 4],
    lights: [LightPacked; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    misc: [f32; 4], // x: emissive weight, yzw unused
}

impl InstanceData {
    fn new(model: &Mat4, rgb: [f32; 3], alpha: f32, emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], alpha],
            misc: [emissive, 0.0, 0.0, 0.0],
        }
    }
}

const INSTANCE_STRIDE: u64 = std::mem::size_of::<InstanceData>() as u64;
const INSTANCE_CAPACITY: usize =
    1 + CRYSTAL_COUNT * 4 + DUST_COUNT + LEAF_COUNT + GOD_RAY_COUNT;

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

fn upload_mesh(device: &wgpu::Device, label: &str, data: &MeshData) -> MeshBuffers {
    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex,
        index,
        index_count: data.index_count(),
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth24Plus,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    solid_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    additive_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_vb: wgpu::Buffer,
    instance_scratch: Vec<InstanceData>,

    terrain: MeshBuffers,
    crystal: MeshBuffers,
    inset: MeshBuffers,
    chain: MeshBuffers,
    ring: MeshBuffers,
    dust: MeshBuffers,
    leaf: MeshBuffers,
    god_ray: MeshBuffers,

    chain_colors: Vec<[f32; 3]>,
    god_ray_opacities: Vec<f32>,

    width: u32,
    height: u32,
}

impl GpuState {
    /// Acquire the WebGPU surface and build every static GPU resource.
    /// Backend failures surface here once, at initialization; there is no
    /// retry path.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        animator: &Animator,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(mandala_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: mesh vertices
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<mesh::Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 12,
                        shader_location: 1,
                    },
                ],
            },
            // slot 1: per-instance model matrix + color + emissive
            wgpu::VertexBufferLayout {
                array_stride: INSTANCE_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 5,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 64,
                        shader_location: 6,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 80,
                        shader_location: 7,
                    },
                ],
            },
        ];

        let make_pipeline = |label: &str,
                             topology: wgpu::PrimitiveTopology,
                             blend: wgpu::BlendState,
                             depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology,
                    cull_mode: None, // everything in this scene is double-sided
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth24Plus,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };

        let additive = wgpu::BlendState {
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
        let solid_pipeline = make_pipeline(
            "solid_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::ALPHA_BLENDING,
            true,
        );
        let line_pipeline = make_pipeline(
            "line_pipeline",
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        );
        let additive_pipeline = make_pipeline(
            "god_ray_pipeline",
            wgpu::PrimitiveTopology::TriangleList,
            additive,
            false,
        );

        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: INSTANCE_STRIDE * INSTANCE_CAPACITY as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let terrain = upload_mesh(&device, "terrain", &mesh::terrain_mesh());
        let crystal = upload_mesh(&device, "crystal", &mesh::crystal_mesh());
        let inset = upload_mesh(&device, "inset", &mesh::inset_mesh());
        let chain = upload_mesh(&device, "chain", &mesh::chain_mesh());
        let ring = upload_mesh(&device, "connector_ring", &mesh::connector_ring_mesh());
        let dust = upload_mesh(&device, "dust", &mesh::dust_mesh());
        let leaf = upload_mesh(&device, "leaf", &mesh::leaf_mesh());
        let god_ray = upload_mesh(&device, "god_ray", &mesh::god_ray_mesh());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            solid_pipeline,
            line_pipeline,
            additive_pipeline,
            uniform_buffer,
            bind_group,
            instance_vb,
            instance_scratch: Vec::with_capacity(INSTANCE_CAPACITY),
            terrain,
            crystal,
            inset,
            chain,
            ring,
            dust,
            leaf,
            god_ray,
            chain_colors: animator.units().iter().map(|u| u.chain.color()).collect(),
            god_ray_opacities: animator.god_ray_opacities().collect(),
            width,
            height,
        })
    }

    /// Reconfigure the surface and depth target. Called synchronously from
    /// the resize handler so the next frame is drawn at the new size.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    fn write_instances(&mut self, frame: &FrameTransforms) -> [Range<u32>; 8] {
        let scratch = &mut self.instance_scratch;
        scratch.clear();

        let mut segment = |rows: &mut dyn Iterator<Item = InstanceData>,
                           scratch: &mut Vec<InstanceData>| {
            let start = scratch.len() as u32;
            scratch.extend(rows);
            start..scratch.len() as u32
        };

        let terrain = segment(
            &mut std::iter::once(InstanceData::new(&frame.terrain, TERRAIN_COLOR, 1.0, 0.0)),
            scratch,
        );
        let crystals = segment(
            &mut frame
                .crystals
                .iter()
                .map(|m| InstanceData::new(m, CRYSTAL_COLOR, CRYSTAL_OPACITY, 0.0)),
            scratch,
        );
        let chain_colors = &self.chain_colors;
        let chains = segment(
            &mut frame
                .chains
                .iter()
                .zip(chain_colors)
                .map(|(m, c)| InstanceData::new(m, *c, 1.0, 0.08)),
            scratch,
        );
        let rings = segment(
            &mut frame
                .rings
                .iter()
                .zip(chain_colors)
                .map(|(m, c)| InstanceData::new(m, *c, 1.0, 0.08)),
            scratch,
        );
        let dust = segment(
            &mut frame
                .dust
                .iter()
                .map(|m| InstanceData::new(m, DUST_COLOR, DUST_OPACITY, 0.0)),
            scratch,
        );
        let leaves = segment(
            &mut frame
                .leaves
                .iter()
                .map(|m| InstanceData::new(m, LEAF_COLOR, 1.0, 0.0)),
            scratch,
        );
        let insets = segment(
            &mut frame
                .insets
                .iter()
                .map(|m| InstanceData::new(m, INSET_COLOR, INSET_OPACITY, 1.0)),
            scratch,
        );
        let god_ray_opacities = &self.god_ray_opacities;
        let god_rays = segment(
            &mut frame
                .god_rays
                .iter()
                .zip(god_ray_opacities)
                .map(|(m, o)| InstanceData::new(m, GOD_RAY_COLOR, *o, 1.0)),
            scratch,
        );

        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(scratch));
        [
            terrain, crystals, chains, rings, dust, leaves, insets, god_rays,
        ]
    }

    pub fn render(
        &mut self,
        rig: &CameraRig,
        frame: &FrameTransforms,
    ) -> Result<(), wgpu::SurfaceError> {
        let lights = frame.light_positions;
        let mut packed = [LightPacked {
            pos_range: [0.0; 4],
            color_intensity: [0.0; 4],
        }; 3];
        for i in 0..3 {
            packed[i] = LightPacked {
                pos_range: [lights[i].x, lights[i].y, lights[i].z, LIGHT_RANGES[i]],
                color_intensity: [
                    LIGHT_COLORS[i][0],
                    LIGHT_COLORS[i][1],
                    LIGHT_COLORS[i][2],
                    LIGHT_INTENSITIES[i],
                ],
            };
        }
        let uniforms = Uniforms {
            view_proj: rig.view_proj().to_cols_array_2d(),
            camera_pos: [rig.position.x, rig.position.y, rig.position.z, 0.0],
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
            ambient: [
                AMBIENT_COLOR[0] * AMBIENT_INTENSITY,
                AMBIENT_COLOR[1] * AMBIENT_INTENSITY,
                AMBIENT_COLOR[2] * AMBIENT_INTENSITY,
                0.0,
            ],
            lights: packed,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let [terrain, crystals, chains, rings, dust, leaves, insets, god_rays] =
            self.write_instances(frame);

        let surface_tex = self.surface.get_current_texture()?;
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: FOG_COLOR[0] as f64,
                            g: FOG_COLOR[1] as f64,
                            b: FOG_COLOR[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));

            rpass.set_pipeline(&self.solid_pipeline);
            draw_mesh(&mut rpass, &self.terrain, terrain);
            draw_mesh(&mut rpass, &self.crystal, crystals);
            draw_mesh(&mut rpass, &self.chain, chains);
            draw_mesh(&mut rpass, &self.ring, rings);
            draw_mesh(&mut rpass, &self.dust, dust);
            draw_mesh(&mut rpass, &self.leaf, leaves);

            rpass.set_pipeline(&self.line_pipeline);
            draw_mesh(&mut rpass, &self.inset, insets);

            rpass.set_pipeline(&self.additive_pipeline);
            draw_mesh(&mut rpass, &self.god_ray, god_rays);
        }
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}

fn draw_mesh(rpass: &mut wgpu::RenderPass<'_>, mesh: &MeshBuffers, instances: Range<u32>) {
    if instances.is_empty() {
        return;
    }
    rpass.set_vertex_buffer(0, mesh.vertex.slice(..));
    rpass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..mesh.index_count, 0, instances);
}
