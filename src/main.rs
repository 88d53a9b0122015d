//! wavefield - A procedural Gerstner ocean, rendered headless
//!
//! A sum of directional trochoidal waves displaces the sea plane; every
//! visible point is lit by the sun, tinted by light passing through the
//! crests, mirrors the sky at grazing angles, foams on the highest crests
//! and fades into the fog.

use std::error::Error;

use clap::Parser;
use log::info;

use wavefield::camera::CameraSystem;
use wavefield::cli::Args;
use wavefield::ocean::OceanSystem;
use wavefield::params::SurfaceGridConfig;
use wavefield::rendering::HeadlessRenderer;
use wavefield::shading::{FoamNoise, ProceduralSky};
use wavefield::tuning::{OceanControls, OceanState};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("wavefield - procedural Gerstner ocean");

    let state = OceanState {
        waves: args.wave_set(),
        ..OceanState::default()
    };
    let sky = ProceduralSky::from_shading(&state.shading);
    let controls = OceanControls::new(state);

    let render_config = args.render_config();
    let mut ocean = OceanSystem::new(&SurfaceGridConfig::default(), controls);

    if args.gpu_check {
        run_gpu_check(&mut ocean, args.time)?;
    }

    let renderer = HeadlessRenderer::new(
        render_config,
        CameraSystem::new(args.camera_config()),
        FoamNoise::new(args.seed),
    )?
    .with_environment(Box::new(sky));

    match args.recording_config() {
        Some(recording) => {
            let frames = renderer.record(&ocean, &recording)?;
            info!(
                "Recorded {} frames to {}",
                frames,
                recording.output_dir.display()
            );
        }
        None => {
            let frame = ocean.frame(args.time);
            renderer.render_to_file(&frame, &args.output)?;
        }
    }

    Ok(())
}

/// Displace the full grid on the GPU and report the largest deviation from the CPU result
#[cfg(feature = "gpu")]
fn run_gpu_check(ocean: &mut OceanSystem, time_s: f32) -> Result<(), Box<dyn Error>> {
    use glam::Vec3;
    use wavefield::gpu::GpuDisplacer;

    let gpu = GpuDisplacer::new()?;
    let frame = ocean.update(time_s);
    let displaced = gpu.displace(&frame.waves, ocean.grid.rest_positions(), time_s)?;

    let max_difference = displaced
        .iter()
        .zip(&ocean.grid.vertices)
        .map(|(gpu_pos, vertex)| (*gpu_pos - Vec3::from_array(vertex.position)).length())
        .fold(0.0, f32::max);

    info!(
        "GPU displaced {} vertices, max difference to CPU {:.2e} m",
        displaced.len(),
        max_difference
    );
    Ok(())
}

#[cfg(not(feature = "gpu"))]
fn run_gpu_check(_ocean: &mut OceanSystem, _time_s: f32) -> Result<(), Box<dyn Error>> {
    log::warn!("--gpu-check needs a build with the `gpu` feature, skipping");
    Ok(())
}
