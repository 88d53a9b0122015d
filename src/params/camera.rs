//! Camera placement for the headless renderer.

/// Perspective camera looking at the ocean
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Eye position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters); rays past this see the background
    pub far_plane_m: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [100.0, 40.0, 200.0], // Slightly above the swell, looking back at origin
            target: [0.0, 0.0, 0.0],
            fov_degrees: 55.0,
            near_plane_m: 0.1,
            far_plane_m: 10000.0,
        }
    }
}
