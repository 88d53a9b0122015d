//! Individual shading terms.
//!
//! Every function here is pure. Vectors are unit length: `normal` is the
//! surface normal, `view` points from the surface toward the eye and `sun`
//! points from the surface toward the sun.

use glam::Vec3;

/// Light reaching the surface when the sun is behind it
pub const AMBIENT_LIGHT: f32 = 0.25;

/// How far the normal bends the light path through a crest
pub const SSS_DISTORTION: f32 = 0.3;

/// Exponent focusing transmitted light toward the view-sun axis
pub const SSS_POWER: f32 = 4.0;

/// Signal range (meters) over which foam ramps from none to full coverage
pub const FOAM_FEATHER: f32 = 0.5;

/// Near-white, slightly cool
pub const FOAM_COLOR: Vec3 = Vec3::new(0.92, 0.95, 0.97);

/// Shallow-to-deep blend: looking straight down sees deep water
pub fn base_color(water: Vec3, deep: Vec3, normal: Vec3, view: Vec3) -> Vec3 {
    let facing = normal.dot(view).clamp(0.0, 1.0);
    water.lerp(deep, facing)
}

/// Lambert diffuse with an ambient floor, plus a Blinn-Phong highlight
pub fn sun_lighting(
    base: Vec3,
    normal: Vec3,
    view: Vec3,
    sun: Vec3,
    sun_color: Vec3,
    shininess: f32,
) -> Vec3 {
    let diffuse = normal.dot(sun).max(0.0);
    let lit = base * (Vec3::splat(AMBIENT_LIGHT) + sun_color * ((1.0 - AMBIENT_LIGHT) * diffuse));

    // No highlight from a sun below the surface's horizon
    let specular = if diffuse > 0.0 {
        let half = (sun + view).try_normalize().unwrap_or(normal);
        normal.dot(half).max(0.0).powf(shininess.max(1.0))
    } else {
        0.0
    };

    lit + sun_color * specular
}

/// Light transmitted through a back-lit wave toward the viewer
///
/// `crest` in [0, 1] weights thin, raised parts of the surface more.
pub fn subsurface(
    normal: Vec3,
    view: Vec3,
    sun: Vec3,
    sss_color: Vec3,
    strength: f32,
    crest: f32,
) -> Vec3 {
    let through = (sun + normal * SSS_DISTORTION).try_normalize().unwrap_or(sun);
    let transmission = view.dot(-through).clamp(0.0, 1.0).powf(SSS_POWER);
    sss_color * (transmission * strength.max(0.0) * (0.5 + 0.5 * crest.clamp(0.0, 1.0)))
}

/// Power-law Fresnel weight, rising toward 1 at grazing angles
pub fn fresnel_weight(normal: Vec3, view: Vec3, power: f32) -> f32 {
    (1.0 - normal.dot(view).max(0.0))
        .clamp(0.0, 1.0)
        .powf(power.max(0.0))
}

/// Mirror `incident` about `normal`
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Value compared against the foam threshold: crest height broken up by noise
pub fn foam_signal(height: f32, noise: f32, noise_strength: f32) -> f32 {
    height + noise_strength * noise
}

/// Foam coverage in [0, 1]: exactly 0 up to the threshold, ramping in above it
pub fn foam_mask(signal: f32, threshold: f32) -> f32 {
    if signal > threshold {
        ((signal - threshold) / FOAM_FEATHER).min(1.0)
    } else {
        0.0
    }
}

/// Exponential-squared fog weight at `distance`
///
/// `offset` moves the fog start as a fraction of the distance: 0.5 fogs a point
/// as if it were half again as far away, -0.2 as if a fifth closer. Any nonzero
/// distance therefore still fogs strictly more as density rises.
pub fn fog_weight(distance: f32, density: f32, offset: f32) -> f32 {
    let fog_distance = distance.max(0.0) * (1.0 + offset).max(0.0);
    let optical_depth = density.max(0.0) * fog_distance;
    (1.0 - (-(optical_depth * optical_depth)).exp()).clamp(0.0, 1.0)
}
