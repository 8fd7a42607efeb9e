//! Latitude/longitude sphere mesh with equirectangular UVs.
//!
//! An icosphere would distribute triangles more evenly, but the globe
//! texture is equirectangular and a lat/long grid maps onto it without
//! seam distortion at a pole-pinch cost that is invisible at this scale.

use glam::Vec3;
use tellus_render::MeshVertex;

/// A generated sphere mesh ready for upload.
pub struct SphereMesh {
    /// Vertices with outward normals and equirectangular UVs.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices, counter-clockwise when seen from outside.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere of the given radius.
///
/// `segments` is the longitude resolution, `rings` the latitude resolution;
/// both are clamped to at least 3. The duplicate seam column carries
/// `u = 1.0` so the texture wraps without interpolation artifacts.
pub fn generate_uv_sphere(radius: f32, segments: u32, rings: u32) -> SphereMesh {
    let segments = segments.max(3);
    let rings = rings.max(3);

    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        // Polar angle from the +Y pole.
        let phi = v * std::f32::consts::PI;
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;

            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            let position = normal * radius;
            vertices.push(MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = (ring + 1) * stride + seg;
            indices.extend_from_slice(&[a, a + 1, b]);
            indices.extend_from_slice(&[a + 1, b + 1, b]);
        }
    }

    SphereMesh { vertices, indices }
}
