//! Ocean grid mesh displaced by the wave evaluator.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rayon::prelude::*;

use super::displacement;
use crate::params::{DerivedArrays, SurfaceGridConfig};

/// Vertex data for ocean mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Flat XZ grid whose vertices follow the wave surface
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Undisplaced XZ position of every vertex
    rest_positions: Vec<Vec2>,
    segments: usize,
}

impl OceanGrid {
    /// Create a flat grid centred on the origin
    pub fn new(config: &SurfaceGridConfig) -> Self {
        let segments = config.segments.max(1);
        let spacing = config.spacing_m();
        let half_size = config.size_m / 2.0;

        let mut vertices = Vec::with_capacity((segments + 1).pow(2));
        let mut rest_positions = Vec::with_capacity((segments + 1).pow(2));
        let mut indices = Vec::with_capacity(segments.pow(2) * 6);

        // Generate flat XZ plane grid
        for z in 0..=segments {
            for x in 0..=segments {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                rest_positions.push(Vec2::new(x_pos, z_pos));
                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    normal: [0.0, 1.0, 0.0],
                    uv: [x as f32 / segments as f32, z as f32 / segments as f32],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from above)
        for z in 0..segments {
            for x in 0..segments {
                let top_left = (z * (segments + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (segments + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            rest_positions,
            segments,
        }
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn rest_positions(&self) -> &[Vec2] {
        &self.rest_positions
    }

    /// Displace every vertex for the given time
    ///
    /// Each vertex is evaluated from its rest position, so nothing accumulates
    /// between frames and any time value can be jumped to directly.
    ///
    /// # Arguments
    /// * `waves` - Derived wave arrays for this frame
    /// * `time_s` - Elapsed time in seconds
    pub fn update(&mut self, waves: &DerivedArrays, time_s: f32) {
        self.vertices
            .par_iter_mut()
            .zip(self.rest_positions.par_iter())
            .for_each(|(vertex, rest)| {
                let point = displacement::evaluate(waves, *rest, time_s);
                vertex.position = point.position.to_array();
                vertex.normal = point.normal.to_array();
            });
    }
}
