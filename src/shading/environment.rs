//! Environment reflection sources.

use glam::Vec3;

use crate::params::{srgb_hex, ShadingParameters};

/// Image-based lighting source sampled along a reflection direction
pub trait EnvironmentMap: Send + Sync {
    /// Linear RGB radiance arriving from `direction` (unit vector, y-up)
    fn sample(&self, direction: Vec3) -> Vec3;
}

/// Constant color, used when no environment map was supplied
#[derive(Debug, Clone, Copy)]
pub struct NeutralEnvironment {
    pub color: Vec3,
}

impl Default for NeutralEnvironment {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.5),
        }
    }
}

impl EnvironmentMap for NeutralEnvironment {
    fn sample(&self, _direction: Vec3) -> Vec3 {
        self.color
    }
}

/// Analytic sky: zenith-to-horizon gradient plus a glow around the sun
#[derive(Debug, Clone)]
pub struct ProceduralSky {
    pub zenith_color: Vec3,
    pub horizon_color: Vec3,
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    /// Exponent of the sun glow lobe
    pub sun_sharpness: f32,
}

impl ProceduralSky {
    /// Sky matching the scene's sun and fog
    pub fn from_shading(params: &ShadingParameters) -> Self {
        Self {
            zenith_color: srgb_hex(0x87ceeb),
            horizon_color: params.fog_color,
            sun_direction: params.sun_direction.try_normalize().unwrap_or(Vec3::Y),
            sun_color: params.sun_color,
            sun_sharpness: 256.0,
        }
    }
}

impl EnvironmentMap for ProceduralSky {
    fn sample(&self, direction: Vec3) -> Vec3 {
        let d = direction.try_normalize().unwrap_or(Vec3::Y);

        // Rays below the horizon see the horizon haze
        let elevation = d.y.max(0.0);
        let sky = self
            .zenith_color
            .lerp(self.horizon_color, (1.0 - elevation).powi(3));

        let glow = d.dot(self.sun_direction).max(0.0).powf(self.sun_sharpness);
        sky + self.sun_color * glow
    }
}
