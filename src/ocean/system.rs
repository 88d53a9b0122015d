//! High-level ocean system driven by the live tuning state.

use log::debug;

use super::mesh::OceanGrid;
use crate::params::{DerivedArrays, ShadingParameters, SurfaceGridConfig};
use crate::tuning::OceanControls;

/// Parameters frozen for one frame
///
/// Every evaluator call within a frame reads from the same `Frame`, so a
/// concurrent edit never shows up halfway through.
#[derive(Debug, Clone)]
pub struct Frame {
    pub time_s: f32,
    pub waves: DerivedArrays,
    pub shading: ShadingParameters,
}

/// Ocean grid plus the controls it is driven by
pub struct OceanSystem {
    pub grid: OceanGrid,
    controls: OceanControls,
}

impl OceanSystem {
    /// Create new ocean system reading parameters from `controls`
    ///
    /// # Arguments
    /// * `config` - Grid size and resolution
    /// * `controls` - Shared tuning handle
    pub fn new(config: &SurfaceGridConfig, controls: OceanControls) -> Self {
        Self {
            grid: OceanGrid::new(config),
            controls,
        }
    }

    pub fn controls(&self) -> &OceanControls {
        &self.controls
    }

    /// Snapshot the parameters without touching the grid
    ///
    /// The CPU renderer only needs this; the grid is for mesh consumers.
    pub fn frame(&self, time_s: f32) -> Frame {
        let state = self.controls.snapshot();
        Frame {
            time_s,
            waves: state.waves.derive(),
            shading: state.shading,
        }
    }

    /// Snapshot parameters once and displace the grid for `time_s`
    pub fn update(&mut self, time_s: f32) -> Frame {
        let frame = self.frame(time_s);
        self.grid.update(&frame.waves, time_s);

        debug!(
            "Ocean frame t={:.3}s: {} waves, {} vertices",
            time_s,
            frame.waves.wave_count(),
            self.grid.vertices.len()
        );

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::displacement;
    use crate::params::WaveSet;
    use crate::tuning::ShadingScalar;

    fn small_system(controls: OceanControls) -> OceanSystem {
        let config = SurfaceGridConfig {
            size_m: 128.0,
            segments: 8,
        };
        OceanSystem::new(&config, controls)
    }

    #[test]
    fn test_update_uses_current_parameters() {
        let controls = OceanControls::default();
        let mut ocean = small_system(controls.clone());

        controls.set_wave_wavelength(0, 80.0).unwrap();
        controls.set_scalar(ShadingScalar::FogDensity, 0.05).unwrap();

        let frame = ocean.update(1.5);
        assert_eq!(frame.waves.wavelengths()[0], 80.0);
        assert_eq!(frame.shading.fog_density, 0.05);

        let rest = ocean.grid.rest_positions()[10];
        let expected = displacement::displaced_position(&frame.waves, rest, 1.5);
        let actual = ocean.grid.vertices[10].position;
        for axis in 0..3 {
            assert!((expected[axis] - actual[axis]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_empty_wave_set_leaves_grid_flat() {
        let controls = OceanControls::default();
        controls.replace_waves(WaveSet::empty());
        let mut ocean = small_system(controls);

        ocean.update(3.0);
        for (vertex, rest) in ocean.grid.vertices.iter().zip(ocean.grid.rest_positions()) {
            assert_eq!(vertex.position, [rest.x, 0.0, rest.y]);
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_frame_is_isolated_from_later_edits() {
        let controls = OceanControls::default();
        let ocean = small_system(controls.clone());

        let frame = ocean.frame(0.0);
        controls.set_wave_steepness(2, 0.0).unwrap();

        assert_eq!(frame.waves.steepnesses()[2], 0.15);
        assert_eq!(ocean.frame(0.0).waves.steepnesses()[2], 0.0);
    }
}
