//! Coherent noise field shared by the terrain layers and the camera director.
//!
//! One seeded OpenSimplex instance serves every consumer; terrain and the
//! director's zoom signal stay uncorrelated by sampling different coordinate
//! slices, not different seeds.

use noise::{NoiseFn, OpenSimplex};

/// Large-scale terrain octave: frequency and height weight (meters)
const OCTAVE_SHAPE: (f32, f32) = (0.03, 14.0);

/// Secondary shape octave
const OCTAVE_RIDGES: (f32, f32) = (0.1, 4.0);

/// Fine detail octave
const OCTAVE_DETAIL: (f32, f32) = (0.3, 1.0);

/// Seeded 3D coherent noise field
pub struct NoiseField {
    simplex: OpenSimplex,
}

impl NoiseField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }

    /// Sample 3D simplex noise at position
    ///
    /// Returns value in range [-1, 1], deterministic for fixed inputs.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self.simplex.get([x as f64, y as f64, z as f64]) as f32
    }

    /// Composed terrain height at a 2D grid coordinate (meters)
    ///
    /// Fixed three-octave fractal recipe: large-scale shape, secondary
    /// ridges, fine detail, summed with decreasing amplitude. The weights
    /// encode the tuned look of the landscape and are not configurable.
    pub fn terrain_height(&self, x: f32, z: f32) -> f32 {
        self.sample(x * OCTAVE_SHAPE.0, z * OCTAVE_SHAPE.0, 0.0) * OCTAVE_SHAPE.1
            + self.sample(x * OCTAVE_RIDGES.0, z * OCTAVE_RIDGES.0, 0.0) * OCTAVE_RIDGES.1
            + self.sample(x * OCTAVE_DETAIL.0, z * OCTAVE_DETAIL.0, 0.0) * OCTAVE_DETAIL.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deterministic() {
        let field = NoiseField::new(42);

        let a = field.sample(1.25, -3.5, 0.0);
        let b = field.sample(1.25, -3.5, 0.0);
        assert_eq!(a, b);

        // Same seed in a fresh instance gives the same value
        let other = NoiseField::new(42);
        assert_eq!(a, other.sample(1.25, -3.5, 0.0));
    }

    #[test]
    fn test_sample_bounded() {
        let field = NoiseField::new(7);

        for i in 0..1000 {
            let x = i as f32 * 0.37;
            let z = i as f32 * -0.21;
            let v = field.sample(x, 0.0, z);
            assert!(v >= -1.0 && v <= 1.0, "noise {} out of range at {}", v, i);
        }
    }

    #[test]
    fn test_terrain_height_deterministic() {
        let field = NoiseField::new(42);

        for i in 0..100 {
            let x = i as f32 * 2.8 - 140.0;
            let z = i as f32 * 1.2 - 60.0;
            assert_eq!(field.terrain_height(x, z), field.terrain_height(x, z));
        }
    }

    #[test]
    fn test_terrain_height_bounded_by_octave_weights() {
        let field = NoiseField::new(42);

        // Sum of octave weights bounds the composed height
        let max_height = OCTAVE_SHAPE.1 + OCTAVE_RIDGES.1 + OCTAVE_DETAIL.1;
        for i in 0..500 {
            let h = field.terrain_height(i as f32 * 0.9, i as f32 * -0.6);
            assert!(h.abs() <= max_height);
            assert!(h.is_finite());
        }
    }
}
