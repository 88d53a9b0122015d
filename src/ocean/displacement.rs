//! Gerstner (trochoidal) wave displacement.
//!
//! Each wave moves a surface point around a circle: up and down by `A cos φ`
//! and back and forth along its direction by `A sin φ`. The sum over all
//! waves is evaluated independently per sample with no state between calls,
//! so the same `(position, time)` always yields the same surface point.
//!
//! Steepness close to 0.5 on short wavelengths can make neighbouring waves
//! fold the surface over itself. That is a tuning risk left to the caller;
//! values are only bounded to [0, 0.5] where they are set.

use glam::{Vec2, Vec3};

use crate::params::{DerivedArrays, WaveComponent, GRAVITY_M_PER_S2};

/// Displaced surface sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// World-space position after displacement
    pub position: Vec3,

    /// Unit surface normal
    pub normal: Vec3,

    /// Vertical displacement (meters, relative to rest plane)
    pub height: f32,
}

impl WaveComponent {
    /// Deep-water dispersion: ω = √(g k)
    pub fn angular_frequency(&self) -> f32 {
        (GRAVITY_M_PER_S2 * self.wavenumber()).sqrt()
    }

    /// Phase speed c = ω / k (meters per second)
    pub fn phase_speed(&self) -> f32 {
        self.angular_frequency() / self.wavenumber()
    }

    /// φ = k (d · p) − ω t
    pub fn phase(&self, position: Vec2, time_s: f32) -> f32 {
        self.wavenumber() * self.direction.dot(position) - self.angular_frequency() * time_s
    }
}

/// Summed displacement offset at a rest-plane position
///
/// # Arguments
/// * `waves` - Derived wave arrays
/// * `position` - Rest position on the XZ plane (x, z)
/// * `time_s` - Elapsed time in seconds
///
/// # Returns
/// Offset (x, y, z) to add to the undisplaced point `(position.x, 0, position.y)`
pub fn displacement(waves: &DerivedArrays, position: Vec2, time_s: f32) -> Vec3 {
    waves
        .components()
        .map(|wave| {
            let a = wave.amplitude();
            let (sin, cos) = wave.phase(position, time_s).sin_cos();
            let d = wave.direction;
            Vec3::new(a * d.x * sin, a * cos, a * d.y * sin)
        })
        .sum()
}

/// Rest position plus displacement
pub fn displaced_position(waves: &DerivedArrays, position: Vec2, time_s: f32) -> Vec3 {
    rest_point(position) + displacement(waves, position, time_s)
}

/// Analytic unit normal of the displaced surface
pub fn surface_normal(waves: &DerivedArrays, position: Vec2, time_s: f32) -> Vec3 {
    evaluate(waves, position, time_s).normal
}

/// Displaced position, normal and height in a single pass over the waves
pub fn evaluate(waves: &DerivedArrays, position: Vec2, time_s: f32) -> SurfacePoint {
    let mut offset = Vec3::ZERO;
    // Partial derivatives of the displaced surface along rest X and rest Z
    let mut tangent_x = Vec3::X;
    let mut tangent_z = Vec3::Z;

    for wave in waves.components() {
        let a = wave.amplitude();
        let q = wave.steepness; // a * k
        let (sin, cos) = wave.phase(position, time_s).sin_cos();
        let d = wave.direction;

        offset += Vec3::new(a * d.x * sin, a * cos, a * d.y * sin);

        tangent_x += Vec3::new(q * d.x * d.x * cos, -q * d.x * sin, q * d.x * d.y * cos);
        tangent_z += Vec3::new(q * d.x * d.y * cos, -q * d.y * sin, q * d.y * d.y * cos);
    }

    let normal = tangent_z.cross(tangent_x).try_normalize().unwrap_or(Vec3::Y);

    SurfacePoint {
        position: rest_point(position) + offset,
        normal,
        height: offset.y,
    }
}

fn rest_point(position: Vec2) -> Vec3 {
    Vec3::new(position.x, 0.0, position.y)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;
    use crate::params::{WaveDescriptor, WaveSet};

    fn single_wave() -> DerivedArrays {
        WaveSet::new(vec![WaveDescriptor::new(0.0, 0.25, 60.0).unwrap()]).derive()
    }

    #[test]
    fn test_single_wave_at_origin() {
        let offset = displacement(&single_wave(), Vec2::ZERO, 0.0);
        let expected = 0.25 / (TAU / 60.0);

        assert!((offset.y - expected).abs() < 1e-4, "y = {}", offset.y);
        assert!(offset.x.abs() < 1e-6);
        assert!(offset.z.abs() < 1e-6);
    }

    #[test]
    fn test_empty_set_is_flat() {
        let waves = WaveSet::empty().derive();
        for p in [Vec2::ZERO, Vec2::new(13.0, -7.5), Vec2::new(-900.0, 1024.0)] {
            assert_eq!(displacement(&waves, p, 0.0), Vec3::ZERO);

            let point = evaluate(&waves, p, 3.0);
            assert_eq!(point.position, Vec3::new(p.x, 0.0, p.y));
            assert_eq!(point.normal, Vec3::Y);
            assert_eq!(point.height, 0.0);
        }
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let waves = WaveSet::default().derive();
        let p = Vec2::new(37.25, -112.5);

        let first = evaluate(&waves, p, 12.345);
        let second = evaluate(&waves, p, 12.345);
        assert_eq!(first, second);

        // Seeking backwards and forwards does not drift
        let _ = evaluate(&waves, p, 500.0);
        assert_eq!(evaluate(&waves, p, 12.345), first);
    }

    #[test]
    fn test_continuous_in_time() {
        let waves = WaveSet::default().derive();
        let p = Vec2::new(10.0, 20.0);
        let a = displaced_position(&waves, p, 4.0);
        let b = displaced_position(&waves, p, 4.0 + 1e-3);
        assert!(a.distance(b) < 0.05);
    }

    #[test]
    fn test_displacement_bounded_by_amplitudes() {
        let set = WaveSet::default();
        let waves = set.derive();
        let max = set.max_crest_height() + 1e-4;

        for i in 0..50 {
            let p = Vec2::new(i as f32 * 17.3 - 400.0, i as f32 * -9.1 + 200.0);
            let offset = displacement(&waves, p, i as f32 * 0.37);
            assert!(offset.y.abs() <= max);
            assert!(Vec2::new(offset.x, offset.z).length() <= max);
        }
    }

    #[test]
    fn test_normals_are_unit_and_upward() {
        let waves = WaveSet::default().derive();
        for i in 0..40 {
            let p = Vec2::new(i as f32 * 3.7, i as f32 * -5.3);
            let n = surface_normal(&waves, p, i as f32 * 0.25);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_crest_normal_points_up() {
        let n = surface_normal(&single_wave(), Vec2::ZERO, 0.0);
        assert!((n - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_normal_tilts_down_slope() {
        // Quarter wavelength ahead of the crest, the surface descends along +Z
        let p = Vec2::new(0.0, 15.0);
        let n = surface_normal(&single_wave(), p, 0.0);
        assert!(n.z > 0.0);
        assert!(n.x.abs() < 1e-5);
    }

    #[test]
    fn test_evaluate_matches_displacement() {
        let waves = WaveSet::default().derive();
        let p = Vec2::new(-42.0, 77.0);
        let point = evaluate(&waves, p, 9.0);
        let position = displaced_position(&waves, p, 9.0);
        assert!(point.position.distance(position) < 1e-4);
        assert!((point.height - position.y).abs() < 1e-6);
    }

    #[test]
    fn test_deep_water_dispersion() {
        let wave = single_wave().components().next().unwrap();
        // c = √(g L / 2π)
        let expected = (GRAVITY_M_PER_S2 * 60.0 / TAU).sqrt();
        assert!((wave.phase_speed() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_wave_travels_along_direction() {
        let waves = single_wave();
        let wave = waves.components().next().unwrap();
        let t = 2.0;
        // The crest at the origin moves to z = c t
        let crest = Vec2::new(0.0, wave.phase_speed() * t);
        let height = displacement(&waves, crest, t).y;
        assert!((height - wave.amplitude()).abs() < 1e-3);
    }
}
