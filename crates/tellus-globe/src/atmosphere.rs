//! Additive atmosphere rim glow around the globe.
//!
//! A slightly larger sphere rendered back-face-only: the visible inside of
//! the far hemisphere forms a halo just outside the globe's silhouette.
//! Fragments brighten as the surface normal turns away from the viewer.

use tellus_render::{DEPTH_FORMAT, IndexData, MeshBuffer, MeshVertex, create_mesh_buffer};

use crate::mesh::generate_uv_sphere;

/// WGSL source for the atmosphere shell.
const ATMOSPHERE_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_atmosphere(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(in.position, 1.0);
    out.world_pos = in.position;
    out.normal = in.normal;
    return out;
}

@fragment
fn fs_atmosphere(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let view_dir = normalize(camera.camera_pos.xyz - in.world_pos);
    // Rim term: strongest where the shell faces away from the viewer.
    let intensity = pow(max(0.7 - dot(n, view_dir), 0.0), 2.0);
    let glow = vec3<f32>(0.3, 0.6, 1.0);
    return vec4<f32>(glow * intensity * 0.5, 1.0);
}
"#;

/// Renders the atmosphere shell as an additive pass after the globe.
pub struct AtmosphereRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: MeshBuffer,
}

impl AtmosphereRenderer {
    /// Create the atmosphere pipeline and its shell mesh.
    ///
    /// `radius` is the shell radius in world units (globe radius times the
    /// configured atmosphere scale).
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        radius: f32,
        segments: u32,
        rings: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atmosphere-shader"),
            source: wgpu::ShaderSource::Wgsl(ATMOSPHERE_SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("atmosphere-pipeline-layout"),
            bind_group_layouts: &[camera_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("atmosphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_atmosphere"),
                buffers: &[MeshVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Show the inside of the shell only.
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                // Glow layers over the scene without occluding anything.
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::GreaterEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_atmosphere"),
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

        let sphere = generate_uv_sphere(radius, segments, rings);
        let mesh = create_mesh_buffer(
            device,
            "atmosphere",
            bytemuck::cast_slice(&sphere.vertices),
            IndexData::U32(&sphere.indices),
        );

        Self { pipeline, mesh }
    }

    /// Draw the atmosphere shell.
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        self.mesh.bind(render_pass);
        self.mesh.draw(render_pass);
    }
}
