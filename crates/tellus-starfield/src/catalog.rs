//! Seeded star catalog built on the shell sampler.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sampler::{RandomSource, SampleError, ShellSampler};

/// A single star in the background field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position in world space, within the generator's radius band.
    pub position: Vec3,
    /// Brightness in `[0, 1]`; scales the rendered point's alpha.
    pub brightness: f32,
}

/// Generates a deterministic star catalog from a seed.
///
/// The same seed always yields the same catalog, so the field does not
/// shimmer between runs and tests can assert on exact output.
#[derive(Debug, Clone, Copy)]
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    sampler: ShellSampler,
}

impl StarfieldGenerator {
    /// Create a generator placing `star_count` stars in
    /// `[min_radius, max_radius)`.
    pub fn new(
        seed: u64,
        star_count: u32,
        min_radius: f32,
        max_radius: f32,
    ) -> Result<Self, SampleError> {
        Ok(Self {
            seed,
            star_count,
            sampler: ShellSampler::new(min_radius, max_radius)?,
        })
    }

    /// Generate the catalog. Each star consumes four RNG draws: three for
    /// position, one for brightness.
    pub fn generate(&self) -> Result<Vec<Star>, SampleError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let cloud = self.sampler.sample(self.star_count, &mut rng)?;

        let stars = cloud
            .points()
            .iter()
            .map(|&position| {
                // Power-law brightness: many dim stars, few bright ones.
                let raw = rng.next_unit();
                Star {
                    position,
                    brightness: raw.powf(4.0).clamp(0.0, 1.0),
                }
            })
            .collect();
        Ok(stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_requested_count() {
        let generator = StarfieldGenerator::new(42, 2000, 15.0, 115.0).unwrap();
        let stars = generator.generate().unwrap();
        assert_eq!(stars.len(), 2000);
    }

    #[test]
    fn test_catalog_positions_within_band() {
        let generator = StarfieldGenerator::new(42, 2000, 15.0, 115.0).unwrap();
        for (i, star) in generator.generate().unwrap().iter().enumerate() {
            let r = star.position.length();
            assert!(
                (15.0..115.0).contains(&r),
                "Star {i} at radius {r}, outside [15, 115)"
            );
        }
    }

    #[test]
    fn test_catalog_is_deterministic_for_seed() {
        let gen_a = StarfieldGenerator::new(99, 500, 15.0, 115.0).unwrap();
        let gen_b = StarfieldGenerator::new(99, 500, 15.0, 115.0).unwrap();
        assert_eq!(gen_a.generate().unwrap(), gen_b.generate().unwrap());
    }

    #[test]
    fn test_brightness_in_unit_range_and_skews_dim() {
        let generator = StarfieldGenerator::new(42, 5000, 15.0, 115.0).unwrap();
        let stars = generator.generate().unwrap();
        let mut dim = 0usize;
        let mut bright = 0usize;
        for (i, star) in stars.iter().enumerate() {
            assert!(
                (0.0..=1.0).contains(&star.brightness),
                "Star {i} brightness {} outside [0, 1]",
                star.brightness
            );
            if star.brightness < 0.1 {
                dim += 1;
            }
            if star.brightness > 0.5 {
                bright += 1;
            }
        }
        assert!(
            dim > bright * 3,
            "Expected many more dim stars ({dim}) than bright ones ({bright})"
        );
    }

    #[test]
    fn test_invalid_band_propagates() {
        assert!(StarfieldGenerator::new(1, 100, 115.0, 15.0).is_err());
    }

    #[test]
    fn test_zero_star_count_rejected_at_generate() {
        let generator = StarfieldGenerator::new(1, 0, 15.0, 115.0).unwrap();
        assert_eq!(generator.generate(), Err(SampleError::ZeroCount));
    }
}
