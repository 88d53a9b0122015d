//! Wave descriptors and the flattened arrays the displacement evaluator reads.
//!
//! A [`WaveSet`] is the source of truth; [`DerivedArrays`] is a deterministic
//! cache rebuilt from it whenever the evaluator needs fresh values.

use std::f32::consts::TAU;
use std::str::FromStr;

use glam::Vec2;
use log::warn;

use crate::error::{OceanError, Result};

/// Largest steepness a single wave may carry. Above this the trochoid folds over itself.
pub const MAX_STEEPNESS: f32 = 0.5;

/// Shortest accepted wavelength (meters). Keeps k = 2π / L and ω = √(g k) finite.
pub const MIN_WAVELENGTH: f32 = 1e-3;

/// One traveling wave component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDescriptor {
    /// Propagation direction (degrees, compass style: 0 = +Z, 90 = +X)
    direction_deg: f32,

    /// Steepness (dimensionless, [0, 0.5])
    steepness: f32,

    /// Crest-to-crest distance (world units / meters, >= MIN_WAVELENGTH)
    wavelength: f32,
}

impl WaveDescriptor {
    /// Create a wave, rejecting values outside the valid domain
    pub fn new(direction_deg: f32, steepness: f32, wavelength: f32) -> Result<Self> {
        check_direction(direction_deg)?;
        if !steepness.is_finite() || !(0.0..=MAX_STEEPNESS).contains(&steepness) {
            return Err(OceanError::InvalidSteepness(steepness));
        }
        check_wavelength(wavelength)?;

        Ok(Self {
            direction_deg,
            steepness,
            wavelength,
        })
    }

    pub fn direction_deg(&self) -> f32 {
        self.direction_deg
    }

    pub fn steepness(&self) -> f32 {
        self.steepness
    }

    pub fn wavelength(&self) -> f32 {
        self.wavelength
    }

    /// Unit propagation vector `(sin θ, cos θ)` in the XZ plane
    pub fn direction(&self) -> Vec2 {
        let (sin, cos) = self.direction_deg.to_radians().sin_cos();
        Vec2::new(sin, cos)
    }

    /// This wave as the evaluator sees it
    pub fn component(&self) -> WaveComponent {
        WaveComponent {
            direction: self.direction(),
            steepness: self.steepness,
            wavelength: self.wavelength,
        }
    }

    /// Angular wavenumber k = 2π / L (radians per meter)
    pub fn wavenumber(&self) -> f32 {
        self.component().wavenumber()
    }

    /// Peak vertical displacement A = Q / k (meters)
    pub fn amplitude(&self) -> f32 {
        self.component().amplitude()
    }

    pub fn set_direction_deg(&mut self, direction_deg: f32) -> Result<()> {
        check_direction(direction_deg)?;
        self.direction_deg = direction_deg;
        Ok(())
    }

    /// Set steepness, clamping into [0, 0.5]
    ///
    /// Clamping is logged. Returns the value actually stored.
    pub fn set_steepness(&mut self, steepness: f32) -> Result<f32> {
        if !steepness.is_finite() {
            return Err(OceanError::InvalidSteepness(steepness));
        }
        let clamped = steepness.clamp(0.0, MAX_STEEPNESS);
        if clamped != steepness {
            warn!(
                "Steepness {} outside [0, {}], clamped to {}",
                steepness, MAX_STEEPNESS, clamped
            );
        }
        self.steepness = clamped;
        Ok(clamped)
    }

    /// Set wavelength; values below `MIN_WAVELENGTH` or non-finite are refused and the old value kept
    pub fn set_wavelength(&mut self, wavelength: f32) -> Result<()> {
        check_wavelength(wavelength)?;
        self.wavelength = wavelength;
        Ok(())
    }
}

impl FromStr for WaveDescriptor {
    type Err = OceanError;

    /// Parse `"direction,steepness,wavelength"`
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [direction, steepness, wavelength] = fields.as_slice() else {
            return Err(OceanError::InvalidParameter {
                name: "wave field count",
                value: fields.len() as f32,
            });
        };

        let parse = |name: &'static str, text: &str| {
            text.parse::<f32>()
                .map_err(|_| OceanError::InvalidParameter {
                    name,
                    value: f32::NAN,
                })
        };

        Self::new(
            parse("direction", *direction)?,
            parse("steepness", *steepness)?,
            parse("wavelength", *wavelength)?,
        )
    }
}

fn check_direction(direction_deg: f32) -> Result<()> {
    if direction_deg.is_finite() {
        Ok(())
    } else {
        Err(OceanError::InvalidDirection(direction_deg))
    }
}

fn check_wavelength(wavelength: f32) -> Result<()> {
    if wavelength.is_finite() && wavelength >= MIN_WAVELENGTH {
        Ok(())
    } else {
        Err(OceanError::InvalidWavelength(wavelength))
    }
}

/// Ordered collection of wave components
///
/// Order does not change the summed surface but is kept because the derived
/// arrays are indexed positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveSet {
    waves: Vec<WaveDescriptor>,
}

impl Default for WaveSet {
    /// Six authored components: long swells down to short chop
    fn default() -> Self {
        let wave = |direction_deg, steepness, wavelength| WaveDescriptor {
            direction_deg,
            steepness,
            wavelength,
        };

        Self {
            waves: vec![
                wave(0.0, 0.25, 60.0),
                wave(30.0, 0.25, 31.0),
                wave(60.0, 0.15, 18.0),
                wave(10.0, 0.12, 10.0),
                wave(45.0, 0.1, 5.0),
                wave(-20.0, 0.08, 3.0),
            ],
        }
    }
}

impl WaveSet {
    pub fn new(waves: Vec<WaveDescriptor>) -> Self {
        Self { waves }
    }

    /// Wave set with no components (flat surface)
    pub fn empty() -> Self {
        Self { waves: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaveDescriptor> {
        self.waves.iter()
    }

    pub fn as_slice(&self) -> &[WaveDescriptor] {
        &self.waves
    }

    pub fn get(&self, index: usize) -> Option<&WaveDescriptor> {
        self.waves.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut WaveDescriptor> {
        let count = self.waves.len();
        self.waves
            .get_mut(index)
            .ok_or(OceanError::WaveIndexOutOfRange { index, count })
    }

    pub fn push(&mut self, wave: WaveDescriptor) {
        self.waves.push(wave);
    }

    /// Flatten into the arrays consumed by the evaluators
    pub fn derive(&self) -> DerivedArrays {
        DerivedArrays::from_waves(&self.waves)
    }

    /// Sum of amplitudes: the highest crest the set can produce (meters)
    pub fn max_crest_height(&self) -> f32 {
        self.waves.iter().map(WaveDescriptor::amplitude).sum()
    }
}

/// Interleaved `(sin θ, cos θ)` per wave, 2N values
pub fn directions(waves: &[WaveDescriptor]) -> Vec<f32> {
    waves
        .iter()
        .flat_map(|w| w.direction().to_array())
        .collect()
}

/// Steepness per wave, N values
pub fn steepnesses(waves: &[WaveDescriptor]) -> Vec<f32> {
    waves.iter().map(|w| w.steepness).collect()
}

/// Wavelength per wave, N values
pub fn wavelengths(waves: &[WaveDescriptor]) -> Vec<f32> {
    waves.iter().map(|w| w.wavelength).collect()
}

/// One wave as seen by the evaluator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    /// Unit XZ propagation direction
    pub direction: Vec2,
    pub steepness: f32,
    pub wavelength: f32,
}

impl WaveComponent {
    /// Angular wavenumber k = 2π / L
    pub fn wavenumber(&self) -> f32 {
        TAU / self.wavelength
    }

    /// A = Q / k, so the steepest slope a wave contributes is Q regardless of wavelength
    pub fn amplitude(&self) -> f32 {
        self.steepness / self.wavenumber()
    }
}

/// Parallel flat arrays derived from a [`WaveSet`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedArrays {
    directions: Vec<f32>,
    steepnesses: Vec<f32>,
    wavelengths: Vec<f32>,
}

impl DerivedArrays {
    pub fn from_waves(waves: &[WaveDescriptor]) -> Self {
        Self {
            directions: directions(waves),
            steepnesses: steepnesses(waves),
            wavelengths: wavelengths(waves),
        }
    }

    pub fn wave_count(&self) -> usize {
        self.steepnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steepnesses.is_empty()
    }

    pub fn directions(&self) -> &[f32] {
        &self.directions
    }

    pub fn steepnesses(&self) -> &[f32] {
        &self.steepnesses
    }

    pub fn wavelengths(&self) -> &[f32] {
        &self.wavelengths
    }

    /// Per-wave view zipping the three arrays back together
    pub fn components(&self) -> impl Iterator<Item = WaveComponent> + '_ {
        self.directions
            .chunks_exact(2)
            .zip(self.steepnesses.iter().zip(&self.wavelengths))
            .map(|(dir, (&steepness, &wavelength))| WaveComponent {
                direction: Vec2::new(dir[0], dir[1]),
                steepness,
                wavelength,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_six_waves() {
        let waves = WaveSet::default();
        assert_eq!(waves.len(), 6);
    }

    #[test]
    fn test_derived_lengths() {
        for n in [0, 1, 3, 6] {
            let waves = WaveSet::new(WaveSet::default().as_slice()[..n].to_vec());
            let derived = waves.derive();

            assert_eq!(derived.directions().len(), 2 * n);
            assert_eq!(derived.steepnesses().len(), n);
            assert_eq!(derived.wavelengths().len(), n);
            assert_eq!(derived.wave_count(), n);
            assert_eq!(derived.components().count(), n);
        }
    }

    #[test]
    fn test_empty_set_yields_empty_arrays() {
        let derived = WaveSet::empty().derive();
        assert!(derived.directions().is_empty());
        assert!(derived.steepnesses().is_empty());
        assert!(derived.wavelengths().is_empty());
        assert!(derived.is_empty());
    }

    #[test]
    fn test_directions_are_unit_vectors() {
        let mut waves = WaveSet::default();
        waves.push(WaveDescriptor::new(137.5, 0.1, 7.0).unwrap());
        waves.push(WaveDescriptor::new(-271.0, 0.1, 7.0).unwrap());

        for pair in directions(waves.as_slice()).chunks_exact(2) {
            let len_sq = pair[0] * pair[0] + pair[1] * pair[1];
            assert!((len_sq - 1.0).abs() < 1e-5, "len^2 = {}", len_sq);
        }
    }

    #[test]
    fn test_direction_zero_degrees() {
        let wave = WaveDescriptor::new(0.0, 0.25, 60.0).unwrap();
        let d = directions(&[wave]);
        assert!(d[0].abs() < 1e-5);
        assert!((d[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_direction_ninety_degrees() {
        let wave = WaveDescriptor::new(90.0, 0.25, 60.0).unwrap();
        let d = directions(&[wave]);
        assert!((d[0] - 1.0).abs() < 1e-5);
        assert!(d[1].abs() < 1e-3);
    }

    #[test]
    fn test_default_first_wave_and_ranges() {
        let waves = WaveSet::default();
        let derived = waves.derive();

        assert!((derived.steepnesses()[0] - 0.25).abs() < 1e-6);
        assert!((derived.wavelengths()[0] - 60.0).abs() < 1e-6);

        for wave in waves.iter() {
            assert!(wave.steepness() >= 0.0 && wave.steepness() <= MAX_STEEPNESS);
            assert!(wave.wavelength() > 0.0);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let waves = WaveSet::default();
        assert_eq!(waves.derive(), waves.derive());
        assert_eq!(
            directions(waves.as_slice()),
            directions(waves.as_slice())
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let waves = WaveSet::default();
        let lengths = wavelengths(waves.as_slice());
        assert_eq!(lengths, vec![60.0, 31.0, 18.0, 10.0, 5.0, 3.0]);
    }

    #[test]
    fn test_new_rejects_invalid_values() {
        assert!(WaveDescriptor::new(0.0, 0.25, 0.0).is_err());
        assert!(WaveDescriptor::new(0.0, 0.25, -4.0).is_err());
        assert!(WaveDescriptor::new(0.0, 0.25, f32::NAN).is_err());
        assert!(WaveDescriptor::new(0.0, 0.25, f32::INFINITY).is_err());
        // Subnormal wavelengths would overflow k to infinity
        assert!(WaveDescriptor::new(0.0, 0.25, 1e-39).is_err());
        assert!(WaveDescriptor::new(0.0, 0.25, MIN_WAVELENGTH / 2.0).is_err());
        assert!(WaveDescriptor::new(0.0, 0.25, MIN_WAVELENGTH).is_ok());
        assert!(WaveDescriptor::new(0.0, 0.6, 10.0).is_err());
        assert!(WaveDescriptor::new(0.0, -0.1, 10.0).is_err());
        assert!(WaveDescriptor::new(f32::NAN, 0.1, 10.0).is_err());
        assert!(WaveDescriptor::new(0.0, 0.5, 10.0).is_ok());
    }

    #[test]
    fn test_set_steepness_clamps() {
        let mut wave = WaveDescriptor::new(0.0, 0.25, 60.0).unwrap();

        assert_eq!(wave.set_steepness(0.9).unwrap(), 0.5);
        assert_eq!(wave.steepness(), 0.5);

        assert_eq!(wave.set_steepness(-1.0).unwrap(), 0.0);
        assert_eq!(wave.steepness(), 0.0);

        assert!(wave.set_steepness(f32::NAN).is_err());
        assert_eq!(wave.steepness(), 0.0);
    }

    #[test]
    fn test_set_wavelength_refuses_non_positive() {
        let mut wave = WaveDescriptor::new(0.0, 0.25, 60.0).unwrap();

        assert!(wave.set_wavelength(0.0).is_err());
        assert!(wave.set_wavelength(-3.0).is_err());
        assert!(wave.set_wavelength(1e-39).is_err());
        assert_eq!(wave.wavelength(), 60.0);

        wave.set_wavelength(12.5).unwrap();
        assert_eq!(wave.wavelength(), 12.5);
    }

    #[test]
    fn test_get_mut_out_of_range() {
        let mut waves = WaveSet::default();
        assert!(matches!(
            waves.get_mut(6),
            Err(OceanError::WaveIndexOutOfRange { index: 6, count: 6 })
        ));
    }

    #[test]
    fn test_parse_wave() {
        let wave: WaveDescriptor = "30, 0.2, 25".parse().unwrap();
        assert_eq!(wave.direction_deg(), 30.0);
        assert_eq!(wave.steepness(), 0.2);
        assert_eq!(wave.wavelength(), 25.0);

        assert!("30,0.2".parse::<WaveDescriptor>().is_err());
        assert!("30,abc,25".parse::<WaveDescriptor>().is_err());
        assert!("30,0.2,0".parse::<WaveDescriptor>().is_err());
        assert!("0,0.25,1e-39".parse::<WaveDescriptor>().is_err());
    }

    #[test]
    fn test_descriptor_matches_evaluator_component() {
        let waves = WaveSet::default();
        for (wave, component) in waves.iter().zip(waves.derive().components()) {
            assert_eq!(wave.component(), component);
            assert_eq!(wave.wavenumber(), component.wavenumber());
            assert_eq!(wave.amplitude(), component.amplitude());
        }
    }

    #[test]
    fn test_max_crest_height() {
        let waves = WaveSet::new(vec![WaveDescriptor::new(0.0, 0.25, 60.0).unwrap()]);
        let expected = 0.25 / (TAU / 60.0);
        assert!((waves.max_crest_height() - expected).abs() < 1e-4);
        assert_eq!(WaveSet::empty().max_crest_height(), 0.0);
    }
}
