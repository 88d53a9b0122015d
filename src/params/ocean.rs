//! Ocean surface grid parameters.

/// Physical constant used by the deep-water dispersion relation (m/s²)
pub const GRAVITY_M_PER_S2: f32 = 9.81;

/// Flat grid that the wave evaluator displaces every frame
#[derive(Debug, Clone)]
pub struct SurfaceGridConfig {
    /// Side length of the square plane in world units (meters)
    pub size_m: f32,

    /// Quads per side (512 = 263,169 vertices)
    pub segments: usize,
}

impl Default for SurfaceGridConfig {
    fn default() -> Self {
        Self {
            size_m: 2048.0, // Reaches well into the fog at default density
            segments: 512,  // 4m quads, enough for the 3m chop wave
        }
    }
}

impl SurfaceGridConfig {
    /// Spacing between neighbouring vertices (meters)
    pub fn spacing_m(&self) -> f32 {
        self.size_m / self.segments.max(1) as f32
    }

    /// Vertices the grid is built with; zero segments build a single quad
    pub fn vertex_count(&self) -> usize {
        (self.segments.max(1) + 1).pow(2)
    }
}
