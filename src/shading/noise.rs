//! Coherent noise driving the foam mask.
//!
//! Gradient (Perlin) noise, sampled in world XZ and drifting slowly in time so
//! foam patches shimmer rather than sit frozen on the crests.

use noise::{NoiseFn, Perlin};

/// Default Perlin seed
pub const DEFAULT_NOISE_SEED: u32 = 42;

/// Rate at which the noise field evolves (noise units per second)
const DRIFT_PER_S: f64 = 0.15;

/// Noise generator for foam breakup
#[derive(Debug, Clone)]
pub struct FoamNoise {
    perlin: Perlin,
}

impl Default for FoamNoise {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl FoamNoise {
    /// Create new noise generator with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample two octaves of 3D noise at a world position
    ///
    /// # Arguments
    /// * `x`, `z` - World position (meters)
    /// * `scale` - Spatial frequency (cycles per meter)
    /// * `time_s` - Elapsed time in seconds
    ///
    /// Returns value in range [-1, 1]
    pub fn sample(&self, x: f32, z: f32, scale: f32, time_s: f32) -> f32 {
        let nx = (x * scale) as f64;
        let nz = (z * scale) as f64;
        let nt = time_s as f64 * DRIFT_PER_S;

        let base = self.perlin.get([nx, nz, nt]);
        // Offset the second octave so it is not aligned with the first
        let detail = self.perlin.get([nx * 2.0 + 17.3, nz * 2.0 - 31.7, nt * 2.0]);

        (((base + 0.5 * detail) / 1.5) as f32).clamp(-1.0, 1.0)
    }
}
