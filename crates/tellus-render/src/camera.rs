//! Look-at camera producing view and projection matrices for the scene.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// A perspective camera defined by position and look-at target.
///
/// The orbit controller moves `position` around `target`; the camera itself
/// only turns that pose into matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at (the globe center).
    pub target: Vec3,
    /// Up direction, normally +Y.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
}

impl Camera {
    /// Compute the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Compute the projection matrix with reverse-Z: near maps to depth 1,
    /// far to depth 0, achieved by swapping near/far in the perspective
    /// construction. Depth tests use GreaterEqual accordingly.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a viewport change.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Convert to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [self.position.x, self.position.y, self.position.z, 0.0],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.5),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// GPU uniform for camera matrices. Group 0, binding 0 in every pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// Column-major view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position (xyz) with padding.
    pub camera_pos: [f32; 4],
}

/// The bind group layout every pipeline uses for group 0: one uniform
/// buffer holding a [`CameraUniform`], visible to both shader stages.
pub fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("camera-bind-group-layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: std::num::NonZeroU64::new(
                    std::mem::size_of::<CameraUniform>() as u64
                ),
            },
            count: None,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_on_positive_z() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.fov_y - 60.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_view_matrix_moves_target_onto_view_axis() {
        let camera = Camera {
            position: Vec3::new(0.0, 0.0, 2.5),
            ..Camera::default()
        };
        let view = camera.view_matrix();
        let target_in_view = view.transform_point3(camera.target);
        // The target sits straight ahead, 2.5 units down -Z in view space.
        assert!(target_in_view.x.abs() < 1e-6);
        assert!(target_in_view.y.abs() < 1e-6);
        assert!((target_in_view.z + 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_reverse_z_depth_ordering() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();

        // A near point should map to greater NDC depth than a far point.
        let near_clip = proj * glam::Vec4::new(0.0, 0.0, -0.2, 1.0);
        let far_clip = proj * glam::Vec4::new(0.0, 0.0, -100.0, 1.0);
        let near_depth = near_clip.z / near_clip.w;
        let far_depth = far_clip.z / far_clip.w;
        assert!(
            near_depth > far_depth,
            "Reverse-Z violated: near depth {near_depth} <= far depth {far_depth}"
        );
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(21.0 / 9.0);
        assert!((camera.aspect_ratio - 21.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_carries_position_and_matrix() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            ..Camera::default()
        };
        let uniform = camera.to_uniform();
        assert_eq!(uniform.camera_pos, [1.0, 2.0, 3.0, 0.0]);
        let expected = camera.view_projection_matrix().to_cols_array_2d();
        assert_eq!(uniform.view_proj, expected);
    }

    #[test]
    fn test_uniform_size_is_80_bytes() {
        // mat4x4<f32> + vec4<f32>, matching the WGSL-side layout.
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
