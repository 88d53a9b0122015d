//! Live tuning surface for wave and shading parameters.
//!
//! A control panel (or any other thread) mutates individual fields through an
//! [`OceanControls`] handle while the frame loop takes one [`OceanState`]
//! snapshot per frame. Mutations are applied field by field; a frame sees
//! either the old or the new value of each field, never a partially written one.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard};

use glam::Vec3;
use log::{debug, warn};

use crate::error::{OceanError, Result};
use crate::params::{parse_hex_color, ShadingParameters, WaveSet};

/// Everything the evaluators read in a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OceanState {
    pub waves: WaveSet,
    pub shading: ShadingParameters,
}

/// Scalar shading fields exposed to the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingScalar {
    SssStrength,
    FresnelPower,
    Shininess,
    FoamThreshold,
    NoiseStrength,
    NoiseScale,
    FogDensity,
    FogOffset,
}

impl ShadingScalar {
    pub const ALL: [ShadingScalar; 8] = [
        ShadingScalar::SssStrength,
        ShadingScalar::FresnelPower,
        ShadingScalar::Shininess,
        ShadingScalar::FoamThreshold,
        ShadingScalar::NoiseStrength,
        ShadingScalar::NoiseScale,
        ShadingScalar::FogDensity,
        ShadingScalar::FogOffset,
    ];

    /// Slider range offered by the control panel
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ShadingScalar::SssStrength => 0.0..=2.0,
            ShadingScalar::FresnelPower => 0.5..=5.0,
            ShadingScalar::Shininess => 16.0..=512.0,
            ShadingScalar::FoamThreshold => 0.0..=5.0,
            ShadingScalar::NoiseStrength => 0.0..=3.0,
            ShadingScalar::NoiseScale => 0.001..=0.05,
            ShadingScalar::FogDensity => 0.001..=0.1,
            ShadingScalar::FogOffset => -0.2..=0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShadingScalar::SssStrength => "sss_strength",
            ShadingScalar::FresnelPower => "fresnel_power",
            ShadingScalar::Shininess => "shininess",
            ShadingScalar::FoamThreshold => "foam_threshold",
            ShadingScalar::NoiseStrength => "noise_strength",
            ShadingScalar::NoiseScale => "noise_scale",
            ShadingScalar::FogDensity => "fog_density",
            ShadingScalar::FogOffset => "fog_offset",
        }
    }

    pub fn get(self, params: &ShadingParameters) -> f32 {
        match self {
            ShadingScalar::SssStrength => params.sss_strength,
            ShadingScalar::FresnelPower => params.fresnel_power,
            ShadingScalar::Shininess => params.shininess,
            ShadingScalar::FoamThreshold => params.foam_threshold,
            ShadingScalar::NoiseStrength => params.noise_strength,
            ShadingScalar::NoiseScale => params.noise_scale,
            ShadingScalar::FogDensity => params.fog_density,
            ShadingScalar::FogOffset => params.fog_offset,
        }
    }

    fn slot(self, params: &mut ShadingParameters) -> &mut f32 {
        match self {
            ShadingScalar::SssStrength => &mut params.sss_strength,
            ShadingScalar::FresnelPower => &mut params.fresnel_power,
            ShadingScalar::Shininess => &mut params.shininess,
            ShadingScalar::FoamThreshold => &mut params.foam_threshold,
            ShadingScalar::NoiseStrength => &mut params.noise_strength,
            ShadingScalar::NoiseScale => &mut params.noise_scale,
            ShadingScalar::FogDensity => &mut params.fog_density,
            ShadingScalar::FogOffset => &mut params.fog_offset,
        }
    }
}

/// Color shading fields exposed to the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingColor {
    Sun,
    Water,
    Deep,
    Sss,
    Fog,
}

impl ShadingColor {
    fn slot(self, params: &mut ShadingParameters) -> &mut Vec3 {
        match self {
            ShadingColor::Sun => &mut params.sun_color,
            ShadingColor::Water => &mut params.water_color,
            ShadingColor::Deep => &mut params.deep_color,
            ShadingColor::Sss => &mut params.sss_color,
            ShadingColor::Fog => &mut params.fog_color,
        }
    }
}

/// Wavelength slider range (meters)
pub const WAVELENGTH_RANGE: RangeInclusive<f32> = 1.0..=100.0;

/// Shared, cloneable handle to the live ocean parameters
#[derive(Debug, Clone, Default)]
pub struct OceanControls {
    state: Arc<Mutex<OceanState>>,
}

impl OceanControls {
    pub fn new(state: OceanState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Copy of the current parameters; call once per frame
    pub fn snapshot(&self) -> OceanState {
        self.lock().clone()
    }

    /// Replace the whole wave set
    pub fn replace_waves(&self, waves: WaveSet) {
        debug!("Replacing wave set ({} waves)", waves.len());
        self.lock().waves = waves;
    }

    pub fn set_wave_direction(&self, index: usize, direction_deg: f32) -> Result<()> {
        self.lock().waves.get_mut(index)?.set_direction_deg(direction_deg)
    }

    /// Set a wave's steepness, clamped into [0, 0.5]; returns the stored value
    pub fn set_wave_steepness(&self, index: usize, steepness: f32) -> Result<f32> {
        self.lock().waves.get_mut(index)?.set_steepness(steepness)
    }

    /// Set a wave's wavelength, clamped to [`WAVELENGTH_RANGE`]; returns the stored value
    ///
    /// Non-finite or non-positive values are refused and the state is left unchanged.
    pub fn set_wave_wavelength(&self, index: usize, wavelength: f32) -> Result<f32> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(OceanError::InvalidWavelength(wavelength));
        }

        let range = WAVELENGTH_RANGE;
        let clamped = wavelength.clamp(*range.start(), *range.end());
        if clamped != wavelength {
            warn!("Wavelength {} outside {:?}, clamped to {}", wavelength, range, clamped);
        }

        self.lock().waves.get_mut(index)?.set_wavelength(clamped)?;
        Ok(clamped)
    }

    /// Set a scalar shading field, clamped to its slider range; returns the stored value
    pub fn set_scalar(&self, field: ShadingScalar, value: f32) -> Result<f32> {
        if !value.is_finite() {
            return Err(OceanError::InvalidParameter {
                name: field.name(),
                value,
            });
        }

        let range = field.range();
        let clamped = value.clamp(*range.start(), *range.end());
        if clamped != value {
            warn!("{} = {} outside {:?}, clamped to {}", field.name(), value, range, clamped);
        }

        *field.slot(&mut self.lock().shading) = clamped;
        Ok(clamped)
    }

    /// Set a color field from `#rrggbb` text
    pub fn set_color(&self, field: ShadingColor, hex: &str) -> Result<()> {
        let color = parse_hex_color(hex)?;
        *field.slot(&mut self.lock().shading) = color;
        Ok(())
    }

    /// Point the sun along a new direction (normalized)
    pub fn set_sun_direction(&self, direction: Vec3) -> Result<()> {
        let direction = direction
            .try_normalize()
            .ok_or(OceanError::InvalidParameter {
                name: "sun_direction",
                value: direction.length(),
            })?;
        self.lock().shading.sun_direction = direction;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, OceanState> {
        // A writer that panicked mid-update leaves at worst one stale field
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
