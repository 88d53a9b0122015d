//! Rendering and recording configuration.

use std::path::PathBuf;

/// Headless rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// Exposure applied before ACES tone mapping
    pub exposure: f32,

    /// Worker threads for per-row shading (0 = one per available core)
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            exposure: 0.5,
            threads: 0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs.max(0.0) * self.fps as f32).ceil() as usize
    }

    /// Elapsed time of a frame (seconds)
    pub fn frame_time(&self, frame_num: usize) -> f32 {
        frame_num as f32 / self.fps.max(1) as f32
    }

    /// Path of a numbered frame
    pub fn frame_path(&self, frame_num: usize) -> PathBuf {
        self.output_dir.join(format!("frame_{:05}.png", frame_num))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_frame_count() {
        let config = RecordingConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert_eq!(config.frame_time(60), 1.0);
        assert!(config
            .frame_path(7)
            .ends_with("frame_00007.png"));
    }
}
