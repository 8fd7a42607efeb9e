//! Texture decode and GPU upload for the globe surface.
//!
//! One texture is loaded at startup. Failure to load is non-fatal: the
//! caller falls back to [`placeholder_texture`] so the globe still renders,
//! and the error is surfaced through the log.

use std::path::Path;

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Failed to open or decode the image file.
    #[error("failed to decode texture {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Image has a zero dimension.
    #[error("texture must have non-zero dimensions, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// A texture uploaded to the GPU with its ready-to-bind group.
pub struct GpuTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// Default view into the texture.
    pub view: wgpu::TextureView,
    /// Bind group (texture + linear sampler) for draw calls.
    pub bind_group: wgpu::BindGroup,
    /// Width and height in texels.
    pub dimensions: (u32, u32),
}

/// The bind group layout shared by all textured pipelines:
/// binding 0 = texture, binding 1 = filtering sampler.
pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("texture-bind-group-layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
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
    })
}

/// Load an image file and upload it as an sRGB texture.
pub fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    path: &Path,
) -> Result<GpuTexture, TextureError> {
    log::info!("Loading texture from {}", path.display());
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Decoded texture: {width}x{height}");

    upload_rgba8(device, queue, layout, "globe-texture", &rgba, width, height)
}

/// Upload raw RGBA8 pixels as an sRGB texture.
pub fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<GpuTexture, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("texture-sampler-linear"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    Ok(GpuTexture {
        texture,
        view,
        bind_group,
        dimensions: (width, height),
    })
}

/// Procedural stand-in texture used when the globe texture fails to load:
/// deep ocean blue with lighter bands toward the equator, so lighting and
/// rotation remain visible.
pub fn placeholder_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> GpuTexture {
    let (width, height) = (64u32, 32u32);
    let pixels = placeholder_pixels(width, height);
    upload_rgba8(
        device,
        queue,
        layout,
        "globe-placeholder",
        &pixels,
        width,
        height,
    )
    .expect("placeholder dimensions are non-zero")
}

fn placeholder_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        // 1.0 at the equator, 0.0 at the poles.
        let latitude = (y as f32 + 0.5) / height as f32;
        let band = 1.0 - (2.0 * latitude - 1.0).abs();
        let r = (20.0 + 30.0 * band) as u8;
        let g = (60.0 + 70.0 * band) as u8;
        let b = (120.0 + 100.0 * band) as u8;
        for _ in 0..width {
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_pixel_buffer_size() {
        let pixels = placeholder_pixels(64, 32);
        assert_eq!(pixels.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_placeholder_is_brighter_at_equator() {
        let pixels = placeholder_pixels(8, 32);
        // Blue channel of the first pixel in the top row vs a middle row.
        let pole_blue = pixels[2];
        let equator_row = 16usize;
        let equator_blue = pixels[equator_row * 8 * 4 + 2];
        assert!(
            equator_blue > pole_blue,
            "Equator ({equator_blue}) should be brighter than pole ({pole_blue})"
        );
    }

    #[test]
    fn test_placeholder_alpha_opaque() {
        let pixels = placeholder_pixels(4, 4);
        for px in pixels.chunks(4) {
            assert_eq!(px[3], 255);
        }
    }
}
