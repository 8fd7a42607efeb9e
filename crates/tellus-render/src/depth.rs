//! Depth buffer for the globe pass.

/// Depth texture format used throughout the viewer.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Clear value for reverse-Z: far plane sits at depth 0.
pub const DEPTH_CLEAR_VALUE: f32 = 0.0;

/// A depth texture sized to the render target, recreated on resize.
pub struct DepthBuffer {
    /// The depth texture.
    pub texture: wgpu::Texture,
    /// View used as the render pass depth attachment.
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    /// Create a depth buffer of the given pixel dimensions.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tellus-depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Recreate the depth texture for a new render size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
