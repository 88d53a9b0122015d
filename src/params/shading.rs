//! Surface shading parameters and color helpers.

use glam::Vec3;

use crate::error::{OceanError, Result};

/// Tunable shading inputs, all colors in linear RGB
///
/// Owned by the scene; the shader only borrows it for the duration of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingParameters {
    /// Unit vector pointing from the surface toward the sun
    pub sun_direction: Vec3,

    pub sun_color: Vec3,

    /// Shallow water tint, seen at grazing angles and on crests
    pub water_color: Vec3,

    /// Deep water tint, seen looking straight down
    pub deep_color: Vec3,

    /// Subsurface scattering tint for back-lit crests
    pub sss_color: Vec3,

    /// Subsurface scattering strength (dimensionless, 0..2)
    pub sss_strength: f32,

    /// Exponent of the Fresnel term (0.5..5, higher = reflections only at grazing angles)
    pub fresnel_power: f32,

    /// Specular exponent (16..512)
    pub shininess: f32,

    /// Foam appears where height + noise exceeds this (meters, 0..5)
    pub foam_threshold: f32,

    /// Amplitude of the foam noise (meters, 0..3)
    pub noise_strength: f32,

    /// Spatial frequency of the foam noise (cycles per meter, 0.001..0.05)
    pub noise_scale: f32,

    pub fog_color: Vec3,

    /// Exponential-squared fog density (per meter, 0.001..0.1)
    pub fog_density: f32,

    /// Relative shift of the fog distance (-0.2..0.5, 0.5 = fog as if 1.5x farther)
    pub fog_offset: f32,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self {
            sun_direction: sun_direction_from_spherical(88.0, 220.0), // Low sun, just above horizon
            sun_color: srgb_hex(0xfff4e6),
            water_color: srgb_hex(0x0077be),
            deep_color: srgb_hex(0x004488),
            sss_color: srgb_hex(0x1a8c5e),
            sss_strength: 0.8,
            fresnel_power: 1.0,
            shininess: 128.0,
            foam_threshold: 2.0,
            noise_strength: 0.6,
            noise_scale: 0.012,
            fog_color: srgb_hex(0x8dabc4),
            fog_density: 0.008,
            fog_offset: 0.0,
        }
    }
}

/// Sun direction from spherical coordinates (y-up)
///
/// # Arguments
/// * `polar_deg` - Angle from zenith (90 = on the horizon)
/// * `azimuth_deg` - Angle around Y, measured from +Z toward +X
pub fn sun_direction_from_spherical(polar_deg: f32, azimuth_deg: f32) -> Vec3 {
    let (sin_phi, cos_phi) = polar_deg.to_radians().sin_cos();
    let (sin_theta, cos_theta) = azimuth_deg.to_radians().sin_cos();
    Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
}

/// sRGB transfer function, single channel
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB transfer function, single channel
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// `0xRRGGBB` (sRGB) to linear RGB
pub fn srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Parse `#rrggbb` or `rrggbb` (sRGB) into linear RGB
pub fn parse_hex_color(text: &str) -> Result<Vec3> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OceanError::InvalidColor(text.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(srgb_hex)
        .map_err(|_| OceanError::InvalidColor(text.to_string()))
}
