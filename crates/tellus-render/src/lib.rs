//! GPU plumbing for the tellus viewer: device and surface management,
//! viewport/DPI tracking, the orbit camera's matrices, depth buffering,
//! mesh buffers, and texture loading.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod texture;
pub mod viewport;

pub use buffer::{IndexData, MeshBuffer, MeshVertex, create_mesh_buffer};
pub use camera::{Camera, CameraUniform, camera_bind_group_layout};
pub use depth::{DEPTH_CLEAR_VALUE, DEPTH_FORMAT, DepthBuffer};
pub use gpu::{FrameError, GpuContext, GpuContextError, init_gpu_blocking};
pub use texture::{
    GpuTexture, TextureError, load_texture, placeholder_texture, texture_bind_group_layout,
};
pub use viewport::{Viewport, ViewportChange};
