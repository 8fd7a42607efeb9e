//! Uniform-direction point sampling within a spherical shell.
//!
//! Drawing independent uniform polar and azimuthal angles bunches points at
//! the poles; the polar angle here is instead drawn through its inverse CDF
//! (`phi = acos(2u - 1)`), which distributes directions uniformly over the
//! sphere. The radius is uniform across the shell band.

use glam::Vec3;

/// A source of uniform random scalars in `[0, 1)`.
///
/// Injected so that sampling is fully deterministic under test: any seeded
/// [`rand::RngCore`] works via the blanket impl, and tests can supply a
/// fixed scripted sequence instead.
pub trait RandomSource {
    /// The next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

impl<R: rand::RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f32 {
        rand::Rng::random::<f32>(self)
    }
}

/// Errors raised by shell sampling. All are argument-validation failures
/// detected before any point is drawn; sampling itself cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// The requested point count was zero.
    #[error("point count must be positive")]
    ZeroCount,

    /// The radius band is empty, inverted, non-positive, or non-finite.
    #[error("radius band [{min}, {max}) must satisfy 0 < min < max")]
    InvalidRadiusBand {
        /// Inner shell radius as supplied.
        min: f32,
        /// Outer shell radius as supplied.
        max: f32,
    },
}

/// An immutable, ordered set of 3D positions produced by one sampling call.
///
/// Created once, then consumed read-only by the renderer. Every contained
/// point lies within the radius band of the sampler that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Vec3>,
}

impl PointCloud {
    /// Number of points in the cloud.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud contains no points. Never true for a cloud returned
    /// by [`ShellSampler::sample`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in generation order.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Flatten into an interleaved `[x, y, z, x, y, z, …]` buffer for
    /// GPU upload.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            flat.extend_from_slice(&[p.x, p.y, p.z]);
        }
        flat
    }
}

/// Samples points with uniform direction and uniform radius within the shell
/// `[min_radius, max_radius)`.
///
/// The radius is uniform across the band rather than uniform in volume,
/// which biases density slightly toward the outer shell. For a starfield
/// this reads as a denser far layer and is kept intentionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSampler {
    min_radius: f32,
    max_radius: f32,
}

impl ShellSampler {
    /// Create a sampler for the band `[min_radius, max_radius)`.
    ///
    /// Both radii must be finite and positive with `min_radius < max_radius`.
    pub fn new(min_radius: f32, max_radius: f32) -> Result<Self, SampleError> {
        let valid = min_radius.is_finite()
            && max_radius.is_finite()
            && min_radius > 0.0
            && min_radius < max_radius;
        if !valid {
            return Err(SampleError::InvalidRadiusBand {
                min: min_radius,
                max: max_radius,
            });
        }
        Ok(Self {
            min_radius,
            max_radius,
        })
    }

    /// Inner shell radius.
    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Outer shell radius (exclusive).
    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Draw `count` independent points into a new [`PointCloud`].
    ///
    /// Each point consumes exactly three values from `rng`, in order:
    /// radius, azimuthal angle, polar angle. A seeded `rng` therefore
    /// reproduces the same cloud bit for bit.
    pub fn sample(
        &self,
        count: u32,
        rng: &mut impl RandomSource,
    ) -> Result<PointCloud, SampleError> {
        if count == 0 {
            return Err(SampleError::ZeroCount);
        }

        let mut points = Vec::with_capacity(count as usize);
        for _ in 0..count {
            points.push(self.sample_one(rng));
        }
        Ok(PointCloud { points })
    }

    /// Draw a single point. Three uniform draws: r, theta, phi.
    fn sample_one(&self, rng: &mut impl RandomSource) -> Vec3 {
        let r = self.min_radius + rng.next_unit() * (self.max_radius - self.min_radius);
        let theta = rng.next_unit() * std::f32::consts::TAU;
        let phi = (2.0 * rng.next_unit() - 1.0).acos();

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Scripted random source that replays a fixed sequence, cycling when
    /// exhausted.
    struct FixedSource {
        values: Vec<f32>,
        next: usize,
    }

    impl FixedSource {
        fn new(values: &[f32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomSource for FixedSource {
        fn next_unit(&mut self) -> f32 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }

    #[test]
    fn test_sample_returns_exact_count() {
        let sampler = ShellSampler::new(15.0, 115.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cloud = sampler.sample(10_000, &mut rng).unwrap();
        assert_eq!(cloud.len(), 10_000);
        assert!(!cloud.is_empty());
    }

    #[test]
    fn test_all_points_within_radius_band() {
        let sampler = ShellSampler::new(15.0, 115.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cloud = sampler.sample(5000, &mut rng).unwrap();
        for (i, p) in cloud.points().iter().enumerate() {
            let r = p.length();
            assert!(
                (15.0..115.0).contains(&r),
                "Point {i} has radius {r}, outside [15, 115)"
            );
        }
    }

    #[test]
    fn test_same_seed_produces_identical_cloud() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(123);
        let mut rng_b = ChaCha8Rng::seed_from_u64(123);
        let cloud_a = sampler.sample(1000, &mut rng_a).unwrap();
        let cloud_b = sampler.sample(1000, &mut rng_b).unwrap();
        // Bit-identical, not merely close.
        assert_eq!(cloud_a, cloud_b);
    }

    #[test]
    fn test_different_seeds_produce_different_clouds() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(1);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9999);
        let cloud_a = sampler.sample(1000, &mut rng_a).unwrap();
        let cloud_b = sampler.sample(1000, &mut rng_b).unwrap();
        let differing = cloud_a
            .points()
            .iter()
            .zip(cloud_b.points())
            .filter(|(a, b)| (**a - **b).length() > 0.01)
            .count();
        assert!(
            differing > 500,
            "Expected most points to differ between seeds, only {differing}/1000 did"
        );
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(sampler.sample(0, &mut rng), Err(SampleError::ZeroCount));
    }

    #[test]
    fn test_equal_radii_rejected() {
        let err = ShellSampler::new(5.0, 5.0).unwrap_err();
        assert_eq!(err, SampleError::InvalidRadiusBand { min: 5.0, max: 5.0 });
    }

    #[test]
    fn test_inverted_band_rejected() {
        assert!(ShellSampler::new(4.0, 2.0).is_err());
    }

    #[test]
    fn test_non_positive_radii_rejected() {
        assert!(ShellSampler::new(0.0, 2.0).is_err());
        assert!(ShellSampler::new(-1.0, 2.0).is_err());
    }

    #[test]
    fn test_non_finite_radii_rejected() {
        assert!(ShellSampler::new(f32::NAN, 2.0).is_err());
        assert!(ShellSampler::new(1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_scripted_sequence_matches_closed_form() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng = FixedSource::new(&[
            0.0, 0.25, 0.5, 0.75, 0.0, 0.25, 0.5, 0.75, 0.0, 0.25, 0.5, 0.75,
        ]);
        let cloud = sampler.sample(4, &mut rng).unwrap();
        assert_eq!(cloud.len(), 4);

        // Each point consumes (r, theta, phi) draws in order.
        let draws: [(f32, f32, f32); 4] = [
            (0.0, 0.25, 0.5),
            (0.75, 0.0, 0.25),
            (0.5, 0.75, 0.0),
            (0.25, 0.5, 0.75),
        ];
        for (i, ((u, u1, u2), p)) in draws.iter().zip(cloud.points()).enumerate() {
            let r = 1.0 + u * (2.0 - 1.0);
            let theta = u1 * std::f32::consts::TAU;
            let phi = (2.0 * u2 - 1.0f32).acos();
            let expected = Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            );
            assert!(
                (*p - expected).length() < 1e-6,
                "Point {i}: got {p:?}, expected {expected:?}"
            );
            let len = p.length();
            assert!(
                (1.0..2.0).contains(&len),
                "Point {i} radius {len} outside [1, 2)"
            );
        }
    }

    #[test]
    fn test_no_pole_bias_in_direction_distribution() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let cloud = sampler.sample(100_000, &mut rng).unwrap();
        let mean_cos: f64 = cloud
            .points()
            .iter()
            .map(|p| (p.z / p.length()) as f64)
            .sum::<f64>()
            / cloud.len() as f64;
        // cos(phi) is uniform in [-1, 1]; its mean over 100k draws should
        // sit well within 0.01 of zero.
        assert!(
            mean_cos.abs() < 0.01,
            "Mean z/r = {mean_cos}, directions are pole-biased"
        );
    }

    #[test]
    fn test_directions_cover_all_octants() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let cloud = sampler.sample(5000, &mut rng).unwrap();
        let mut octant_counts = [0u32; 8];
        for p in cloud.points() {
            let octant = ((p.x >= 0.0) as usize)
                | (((p.y >= 0.0) as usize) << 1)
                | (((p.z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (300..=900).contains(&count),
                "Octant {i} has {count} points, expected roughly 625"
            );
        }
    }

    #[test]
    fn test_interleaved_buffer_layout() {
        let sampler = ShellSampler::new(1.0, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cloud = sampler.sample(16, &mut rng).unwrap();
        let flat = cloud.to_interleaved();
        assert_eq!(flat.len(), 16 * 3);
        for (i, p) in cloud.points().iter().enumerate() {
            assert_eq!(flat[i * 3], p.x);
            assert_eq!(flat[i * 3 + 1], p.y);
            assert_eq!(flat[i * 3 + 2], p.z);
        }
    }
}
