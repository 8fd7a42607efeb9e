//! Vertex and index buffer creation for scene meshes.

use bytemuck::{Pod, Zeroable};

/// Vertex format shared by the globe and atmosphere meshes: position,
/// normal, and equirectangular UV.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex buffer layout for pipelines consuming this format.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Index data in either 16- or 32-bit width.
pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    /// The wgpu index format for this data.
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    /// Number of indices.
    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    /// Raw byte view for buffer creation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// An indexed mesh uploaded to the GPU.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Create a [`MeshBuffer`] from vertex bytes and index data.
pub fn create_mesh_buffer(
    device: &wgpu::Device,
    label: &str,
    vertices: &[u8],
    indices: IndexData,
) -> MeshBuffer {
    use wgpu::util::DeviceExt;

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label}-vertices")),
        contents: vertices,
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label}-indices")),
        contents: indices.as_bytes(),
        usage: wgpu::BufferUsages::INDEX,
    });

    MeshBuffer {
        vertex_buffer,
        index_buffer,
        index_count: indices.count(),
        index_format: indices.format(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_vertex_layout() {
        let layout = MeshVertex::layout();
        // position (f32x3) + normal (f32x3) + uv (f32x2) = 32 bytes
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_index_format_selection() {
        assert_eq!(IndexData::U16(&[0, 1, 2]).format(), wgpu::IndexFormat::Uint16);
        assert_eq!(IndexData::U32(&[0, 1, 2]).format(), wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_index_count_and_bytes() {
        let indices: &[u16] = &[0, 1, 2, 2, 3, 0];
        let data = IndexData::U16(indices);
        assert_eq!(data.count(), 6);
        assert_eq!(data.as_bytes().len(), 12);

        let indices: &[u32] = &[0, 1, 2];
        let data = IndexData::U32(indices);
        assert_eq!(data.count(), 3);
        assert_eq!(data.as_bytes().len(), 12);
    }
}
