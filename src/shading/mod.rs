//! Ocean surface shading.
//!
//! Stages run in a fixed order, each blending into the running color:
//! base water color, sun lighting, subsurface scattering, Fresnel
//! reflection, foam and finally distance fog.

mod environment;
mod noise;
pub mod stages;

use glam::Vec3;

use crate::ocean::SurfacePoint;
use crate::params::ShadingParameters;

pub use self::environment::{EnvironmentMap, NeutralEnvironment, ProceduralSky};
pub use self::noise::{FoamNoise, DEFAULT_NOISE_SEED};

use stages::{
    base_color, foam_mask, foam_signal, fog_weight, fresnel_weight, reflect, subsurface,
    sun_lighting, FOAM_COLOR,
};

/// Height at which a crest counts as fully raised for subsurface scattering (meters)
const CREST_HEIGHT_M: f32 = 2.0;

/// Reflection color used when no environment map is bound
const NEUTRAL_REFLECTION: Vec3 = Vec3::splat(0.5);

/// Per-sample shader over a frame's parameters
///
/// Holds only borrows; construct one per frame and share it across threads.
pub struct SurfaceShader<'a> {
    params: &'a ShadingParameters,
    noise: &'a FoamNoise,
    environment: Option<&'a dyn EnvironmentMap>,
}

impl<'a> SurfaceShader<'a> {
    pub fn new(
        params: &'a ShadingParameters,
        noise: &'a FoamNoise,
        environment: Option<&'a dyn EnvironmentMap>,
    ) -> Self {
        Self {
            params,
            noise,
            environment,
        }
    }

    /// Final display color of a displaced surface point
    ///
    /// # Arguments
    /// * `point` - Displaced position, normal and height
    /// * `camera` - Eye position in world space
    /// * `time_s` - Elapsed time in seconds (animates the foam noise)
    ///
    /// # Returns
    /// Linear RGB, every channel in [0, 1]
    pub fn shade(&self, point: &SurfacePoint, camera: Vec3, time_s: f32) -> Vec3 {
        let p = self.params;
        let normal = point.normal;
        let to_eye = camera - point.position;
        let distance = to_eye.length();
        let view = to_eye.try_normalize().unwrap_or(normal);
        let sun = p.sun_direction.try_normalize().unwrap_or(Vec3::Y);

        let mut color = base_color(p.water_color, p.deep_color, normal, view);

        color = sun_lighting(color, normal, view, sun, p.sun_color, p.shininess);

        let crest = point.height / CREST_HEIGHT_M;
        color += subsurface(normal, view, sun, p.sss_color, p.sss_strength, crest);

        let reflected = self.reflection(reflect(-view, normal));
        color = color.lerp(reflected, fresnel_weight(normal, view, p.fresnel_power));

        color = color.lerp(FOAM_COLOR, self.foam_amount(point, time_s));

        color = color.lerp(p.fog_color, fog_weight(distance, p.fog_density, p.fog_offset));

        displayable(color, p.fog_color)
    }

    /// Foam coverage of a point in [0, 1]
    pub fn foam_amount(&self, point: &SurfacePoint, time_s: f32) -> f32 {
        let p = self.params;
        let noise = self
            .noise
            .sample(point.position.x, point.position.z, p.noise_scale, time_s);
        foam_mask(
            foam_signal(point.height, noise, p.noise_strength),
            p.foam_threshold,
        )
    }

    fn reflection(&self, direction: Vec3) -> Vec3 {
        match self.environment {
            Some(env) => env.sample(direction),
            None => NEUTRAL_REFLECTION,
        }
    }
}

/// Clamp into display range, replacing non-finite results
fn displayable(color: Vec3, fallback: Vec3) -> Vec3 {
    if color.is_finite() {
        color.clamp(Vec3::ZERO, Vec3::ONE)
    } else if fallback.is_finite() {
        fallback.clamp(Vec3::ZERO, Vec3::ONE)
    } else {
        Vec3::ZERO
    }
}
