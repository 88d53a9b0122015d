//! GPU compute backend for surface displacement.
//!
//! Evaluates the same Gerstner sum as [`crate::ocean::displacement`], one
//! compute invocation per sample. Normals and shading stay on the CPU.

use std::sync::mpsc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use log::{debug, info};
use wgpu::util::DeviceExt;

use crate::error::{OceanError, Result};
use crate::params::{DerivedArrays, GRAVITY_M_PER_S2};

/// Wave slots in the uniform buffer
pub const MAX_GPU_WAVES: usize = 16;

const WORKGROUP_SIZE: u32 = 64;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
struct GpuWave {
    direction: [f32; 2],
    steepness: f32,
    wavelength: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct DisplaceParams {
    wave_count: u32,
    time: f32,
    gravity: f32,
    point_count: u32,
    waves: [GpuWave; MAX_GPU_WAVES],
}

impl DisplaceParams {
    fn new(waves: &DerivedArrays, time_s: f32, point_count: u32) -> Result<Self> {
        if waves.wave_count() > MAX_GPU_WAVES {
            return Err(OceanError::TooManyWaves {
                count: waves.wave_count(),
                max: MAX_GPU_WAVES,
            });
        }

        let mut slots = [GpuWave::default(); MAX_GPU_WAVES];
        for (slot, wave) in slots.iter_mut().zip(waves.components()) {
            *slot = GpuWave {
                direction: wave.direction.to_array(),
                steepness: wave.steepness,
                wavelength: wave.wavelength,
            };
        }

        Ok(Self {
            wave_count: waves.wave_count() as u32,
            time: time_s,
            gravity: GRAVITY_M_PER_S2,
            point_count,
            waves: slots,
        })
    }
}

/// Compute pipeline that displaces batches of rest positions
pub struct GpuDisplacer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl GpuDisplacer {
    /// Open the default adapter and build the pipeline (blocking)
    pub fn new() -> Result<Self> {
        pollster::block_on(Self::new_async())
    }

    async fn new_async() -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| OceanError::Gpu("Failed to find GPU adapter".to_string()))?;

        info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Displacement Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| OceanError::Gpu(format!("Failed to request device: {}", e)))?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Displacement Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("displace.wgsl").into()),
        });

        let storage_entry = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Displacement Bind Group Layout"),
            entries: &[
                storage_entry(0, true),
                storage_entry(1, false),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Displacement Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Displacement Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
        })
    }

    /// Displaced world positions for a batch of rest positions
    ///
    /// # Arguments
    /// * `waves` - Derived wave arrays (at most [`MAX_GPU_WAVES`])
    /// * `points` - Rest positions on the XZ plane
    /// * `time_s` - Elapsed time in seconds
    pub fn displace(
        &self,
        waves: &DerivedArrays,
        points: &[Vec2],
        time_s: f32,
    ) -> Result<Vec<Vec3>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let point_count = u32::try_from(points.len())
            .map_err(|_| OceanError::Gpu(format!("{} points exceed one dispatch", points.len())))?;
        let params = DisplaceParams::new(waves, time_s, point_count)?;

        let workgroups = point_count.div_ceil(WORKGROUP_SIZE);
        let max_workgroups = self.device.limits().max_compute_workgroups_per_dimension;
        if workgroups > max_workgroups {
            return Err(OceanError::Gpu(format!(
                "{} points exceed one dispatch ({} workgroups max)",
                points.len(),
                max_workgroups
            )));
        }

        let rest: Vec<[f32; 2]> = points.iter().map(|p| p.to_array()).collect();
        let points_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rest Points Buffer"),
            contents: bytemuck::cast_slice(&rest),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let params_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Displacement Params Buffer"),
            contents: bytemuck::cast_slice(&[params]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let output_size = (points.len() * std::mem::size_of::<[f32; 4]>()) as u64;
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Displaced Points Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Displacement Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: points_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Displacement Encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Displacement Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(workgroups, 1, 1);
        }

        encoder.copy_buffer_to_buffer(&output_buffer, 0, &staging_buffer, 0, output_size);
        self.queue.submit(Some(encoder.finish()));

        // Read back results
        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|e| OceanError::Gpu(format!("Readback channel closed: {}", e)))?
            .map_err(|e| OceanError::Gpu(format!("Failed to map staging buffer: {}", e)))?;

        let positions: Vec<Vec3> = {
            let data = buffer_slice.get_mapped_range();
            let raw: &[[f32; 4]] = bytemuck::cast_slice(&data);
            raw.iter().map(|p| Vec3::new(p[0], p[1], p[2])).collect()
        };
        staging_buffer.unmap();

        debug!("GPU displaced {} points in {} workgroups", points.len(), workgroups);
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::displacement;
    use crate::params::{WaveDescriptor, WaveSet};

    #[test]
    fn test_params_layout() {
        assert_eq!(std::mem::size_of::<GpuWave>(), 16);
        assert_eq!(std::mem::size_of::<DisplaceParams>(), 16 + 16 * MAX_GPU_WAVES);
    }

    #[test]
    fn test_too_many_waves_rejected() {
        let waves: Vec<WaveDescriptor> = (0..MAX_GPU_WAVES + 1)
            .map(|i| WaveDescriptor::new(i as f32 * 10.0, 0.05, 10.0 + i as f32).unwrap())
            .collect();
        let derived = WaveSet::new(waves).derive();
        assert!(matches!(
            DisplaceParams::new(&derived, 0.0, 1),
            Err(OceanError::TooManyWaves { count: 17, max: 16 })
        ));
    }

    #[test]
    fn test_gpu_matches_cpu() {
        let gpu = match GpuDisplacer::new() {
            Ok(gpu) => gpu,
            Err(e) => {
                eprintln!("Skipping GPU comparison: {}", e);
                return;
            }
        };

        let waves = WaveSet::default().derive();
        let points: Vec<Vec2> = (0..1000)
            .map(|i| Vec2::new((i % 40) as f32 * 5.0 - 100.0, (i / 40) as f32 * 5.0 - 60.0))
            .collect();

        let displaced = gpu.displace(&waves, &points, 3.0).unwrap();
        assert_eq!(displaced.len(), points.len());
        for (rest, actual) in points.iter().zip(&displaced) {
            let expected = displacement::displaced_position(&waves, *rest, 3.0);
            assert!((expected - *actual).length() < 1e-2, "{:?} vs {:?}", expected, actual);
        }

        assert!(gpu.displace(&waves, &[], 0.0).unwrap().is_empty());
    }
}
