//! GPU star renderer: one camera-facing quad per star, additively blended.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use tellus_render::DEPTH_FORMAT;

use crate::catalog::Star;

/// Visual parameters for the rendered stars.
#[derive(Debug, Clone, Copy)]
pub struct StarStyle {
    /// Quad side length in world units. Perspective projection provides
    /// size attenuation with distance.
    pub size: f32,
    /// Base opacity in `[0, 1]`; scaled per star by brightness.
    pub opacity: f32,
}

impl Default for StarStyle {
    fn default() -> Self {
        Self {
            size: 0.02,
            opacity: 0.8,
        }
    }
}

/// Per-instance GPU data for one star.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct StarInstance {
    position: [f32; 3],
    brightness: f32,
}

impl StarInstance {
    const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 12,
                shader_location: 1,
            },
        ],
    };
}

/// GPU uniform carrying the billboard basis and star style.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct StarUniforms {
    /// Camera right vector (xyz), quad size in w.
    right: [f32; 4],
    /// Camera up vector (xyz), base opacity in w.
    up: [f32; 4],
}

/// WGSL shader: expands each instance into a quad spanned by the camera's
/// right/up basis, shaded as a soft round dot.
const STAR_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct StarUniforms {
    right: vec4<f32>,   // xyz = camera right, w = quad size
    up: vec4<f32>,      // xyz = camera up,    w = base opacity
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> stars: StarUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) brightness: f32,
};

@vertex
fn vs_star(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) star_pos: vec3<f32>,
    @location(1) brightness: f32,
) -> VertexOutput {
    // Two triangles per quad, corners in [-1, 1].
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0, -1.0),
    );
    let corner = corners[vertex_index];
    let half_size = stars.right.w * 0.5;
    let world = star_pos
        + stars.right.xyz * corner.x * half_size
        + stars.up.xyz * corner.y * half_size;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 1.0);
    out.corner = corner;
    out.brightness = brightness;
    return out;
}

@fragment
fn fs_star(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.corner);
    // Soft circular falloff inside the quad.
    let falloff = 1.0 - smoothstep(0.0, 1.0, dist);
    let alpha = falloff * stars.up.w * mix(0.4, 1.0, in.brightness);
    return vec4<f32>(vec3<f32>(alpha), alpha);
}
"#;

/// Renders a star catalog as instanced billboards.
pub struct StarRenderer {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    style: StarStyle,
}

impl StarRenderer {
    /// Create the star pipeline and upload the catalog as instance data.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        catalog: &[Star],
        style: StarStyle,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("star-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER_SOURCE.into()),
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star-uniform-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<StarUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[camera_layout, &uniform_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[StarInstance::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                // Stars never occlude the globe; test but do not write.
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::GreaterEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::One,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent::OVER,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let instances: Vec<StarInstance> = catalog
            .iter()
            .map(|star| StarInstance {
                position: star.position.to_array(),
                brightness: star.brightness,
            })
            .collect();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = StarUniforms {
            right: [1.0, 0.0, 0.0, style.size],
            up: [0.0, 1.0, 0.0, style.opacity],
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star-uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("star-uniform-bg"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!("Star renderer initialized: {} stars", instances.len());

        Self {
            pipeline,
            instance_buffer,
            instance_count: instances.len() as u32,
            uniform_buffer,
            uniform_bind_group,
            style,
        }
    }

    /// Update the billboard basis from the camera's current orientation.
    /// Call once per frame before rendering.
    pub fn update(&self, queue: &wgpu::Queue, camera_right: Vec3, camera_up: Vec3) {
        let uniforms = StarUniforms {
            right: [
                camera_right.x,
                camera_right.y,
                camera_right.z,
                self.style.size,
            ],
            up: [camera_up.x, camera_up.y, camera_up.z, self.style.opacity],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw all stars.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.instance_count);
    }
}
