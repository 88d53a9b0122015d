//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::params::{CameraConfig, RecordingConfig, RenderConfig, WaveDescriptor, WaveSet};
use crate::shading::DEFAULT_NOISE_SEED;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavefield")]
#[command(about = "Procedural Gerstner ocean, rendered headless to PNG", long_about = None)]
pub struct Args {
    /// Output image path (single frame mode)
    #[arg(long, value_name = "PATH", default_value = "ocean.png")]
    pub output: PathBuf,

    /// Image width (pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Image height (pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Elapsed simulation time of the frame (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub time: f32,

    /// Exposure applied before tone mapping
    #[arg(long, default_value_t = 0.5)]
    pub exposure: f32,

    /// Wave as DIRECTION_DEG,STEEPNESS,WAVELENGTH; repeat to build a custom set
    #[arg(long = "wave", value_name = "DIR,STEEPNESS,WAVELENGTH", value_parser = parse_wave)]
    pub waves: Vec<WaveDescriptor>,

    /// Render a flat, motionless surface (no waves)
    #[arg(long, conflicts_with = "waves")]
    pub flat: bool,

    /// Camera position as X,Y,Z (meters); always looks at the origin
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_position)]
    pub camera: Option<[f32; 3]>,

    /// Record a PNG frame sequence of the given duration instead of a single frame
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Recording frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Directory for recorded frames
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output_dir: PathBuf,

    /// Foam noise seed
    #[arg(long, default_value_t = DEFAULT_NOISE_SEED)]
    pub seed: u32,

    /// Displace the grid on the GPU and compare with the CPU evaluator (needs the `gpu` feature)
    #[arg(long)]
    pub gpu_check: bool,
}

impl Args {
    /// Wave set selected on the command line (defaults when none given)
    pub fn wave_set(&self) -> WaveSet {
        if self.flat {
            info!("Waves: flat");
            WaveSet::empty()
        } else if self.waves.is_empty() {
            info!("Waves: default set");
            WaveSet::default()
        } else {
            info!("Waves: {} from command line", self.waves.len());
            WaveSet::new(self.waves.clone())
        }
    }

    pub fn camera_config(&self) -> CameraConfig {
        let mut camera = CameraConfig::default();
        if let Some(position) = self.camera {
            camera.position = position;
        }
        camera
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            exposure: self.exposure,
            ..RenderConfig::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            fps: self.fps,
            output_dir: self.output_dir.clone(),
            ..RecordingConfig::new(duration)
        })
    }
}

fn parse_wave(text: &str) -> Result<WaveDescriptor, String> {
    text.parse().map_err(|e| format!("{}", e))
}

fn parse_position(text: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{}'", text));
    };

    let parse = |value: &str| {
        value
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate '{}'", value))
    };
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wavefield"]);
        assert_eq!(args.output, PathBuf::from("ocean.png"));
        assert_eq!(args.wave_set(), WaveSet::default());
        assert!(args.recording_config().is_none());
        assert_eq!(args.camera_config().position, [100.0, 40.0, 200.0]);
    }

    #[test]
    fn test_custom_waves_replace_defaults() {
        let args = Args::parse_from([
            "wavefield",
            "--wave",
            "0,0.2,40",
            "--wave",
            "90, 0.1, 12",
        ]);
        let waves = args.wave_set();
        assert_eq!(waves.len(), 2);
        assert_eq!(waves.get(1).unwrap().wavelength(), 12.0);
    }

    #[test]
    fn test_invalid_wave_rejected() {
        assert!(Args::try_parse_from(["wavefield", "--wave", "0,0.2,-4"]).is_err());
        assert!(Args::try_parse_from(["wavefield", "--wave", "0,0.9,4"]).is_err());
        assert!(Args::try_parse_from(["wavefield", "--wave", "0,0.2"]).is_err());
    }

    #[test]
    fn test_flat_and_camera() {
        let args = Args::parse_from(["wavefield", "--flat", "--camera", "0,25,-80"]);
        assert!(args.wave_set().is_empty());
        assert_eq!(args.camera_config().position, [0.0, 25.0, -80.0]);
        assert!(Args::try_parse_from(["wavefield", "--camera", "1,2"]).is_err());
    }

    #[test]
    fn test_recording_config() {
        let args = Args::parse_from([
            "wavefield",
            "--record",
            "2",
            "--fps",
            "30",
            "--output-dir",
            "frames",
        ]);
        let recording = args.recording_config().unwrap();
        assert_eq!(recording.total_frames(), 60);
        assert_eq!(recording.output_dir, PathBuf::from("frames"));
    }
}
