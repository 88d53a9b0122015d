//! Error types for ocean configuration and output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OceanError {
    #[error("Invalid wavelength: {0} (must be finite and at least 1 mm)")]
    InvalidWavelength(f32),

    #[error("Invalid steepness: {0} (must be within [0, 0.5])")]
    InvalidSteepness(f32),

    #[error("Invalid direction: {0} (must be finite)")]
    InvalidDirection(f32),

    #[error("Wave index {index} out of range (wave count {count})")]
    WaveIndexOutOfRange { index: usize, count: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid value {value} for {name}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("Too many waves: {count} (at most {max} supported)")]
    TooManyWaves { count: usize, max: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gpu")]
    #[error("GPU error: {0}")]
    Gpu(String),
}

pub type Result<T> = std::result::Result<T, OceanError>;
