//! Textured globe renderer with a single point light.

use bytemuck::{Pod, Zeroable};
use tellus_render::{DEPTH_FORMAT, IndexData, MeshBuffer, MeshVertex, create_mesh_buffer};

use crate::mesh::generate_uv_sphere;

/// WGSL source for the globe: textured surface lit by a dark ambient term
/// plus one white point light with a narrow specular highlight.
const GLOBE_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct LightingUniform {
    light_pos: vec4<f32>,   // xyz = position, w = intensity
    light_color: vec4<f32>,
    ambient: vec4<f32>,     // rgb = ambient color, w = shininess
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var t_surface: texture_2d<f32>;
@group(1) @binding(1)
var s_surface: sampler;

@group(2) @binding(0)
var<uniform> lighting: LightingUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_globe(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(in.position, 1.0);
    out.world_pos = in.position;
    out.normal = in.normal;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_globe(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(t_surface, s_surface, in.uv).rgb;

    let n = normalize(in.normal);
    let to_light = lighting.light_pos.xyz - in.world_pos;
    let l = normalize(to_light);
    let v = normalize(camera.camera_pos.xyz - in.world_pos);

    let intensity = lighting.light_pos.w;
    let diffuse = max(dot(n, l), 0.0) * intensity;

    let r = reflect(-l, n);
    let shininess = lighting.ambient.w;
    let specular = pow(max(dot(r, v), 0.0), shininess) * intensity * 0.2;

    let lit = base * (lighting.ambient.rgb + lighting.light_color.rgb * diffuse)
        + lighting.light_color.rgb * specular;
    return vec4<f32>(lit, 1.0);
}
"#;

/// GPU uniform for the globe's lighting model.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightingUniform {
    /// Light position (xyz) and intensity (w).
    pub light_pos: [f32; 4],
    /// Light color.
    pub light_color: [f32; 4],
    /// Ambient color (rgb) and specular shininess (w).
    pub ambient: [f32; 4],
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self {
            light_pos: [5.0, 3.0, 5.0, 1.5],
            light_color: [1.0, 1.0, 1.0, 0.0],
            ambient: [0.2, 0.2, 0.2, 10.0],
        }
    }
}

/// Renders the textured globe sphere.
pub struct GlobeRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: MeshBuffer,
    lighting_bind_group: wgpu::BindGroup,
}

impl GlobeRenderer {
    /// Create the globe pipeline and upload its mesh.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        radius: f32,
        segments: u32,
        rings: u32,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe-shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_SHADER_SOURCE.into()),
        });

        let lighting_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globe-lighting-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<LightingUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe-pipeline-layout"),
            bind_group_layouts: &[camera_layout, texture_layout, &lighting_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("globe-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_globe"),
                buffers: &[MeshVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::GreaterEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_globe"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let sphere = generate_uv_sphere(radius, segments, rings);
        let mesh = create_mesh_buffer(
            device,
            "globe",
            bytemuck::cast_slice(&sphere.vertices),
            IndexData::U32(&sphere.indices),
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe-lighting"),
            contents: bytemuck::bytes_of(&LightingUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let lighting_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe-lighting-bg"),
            layout: &lighting_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "Globe renderer initialized: {} triangles",
            sphere.triangle_count()
        );

        Self {
            pipeline,
            mesh,
            lighting_bind_group,
        }
    }

    /// Draw the globe. The camera and texture bind groups are owned by the
    /// caller; lighting is owned here.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        texture_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, texture_bind_group, &[]);
        render_pass.set_bind_group(2, &self.lighting_bind_group, &[]);
        self.mesh.bind(render_pass);
        self.mesh.draw(render_pass);
    }
}
