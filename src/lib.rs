//! wavefield library - Procedural Gerstner ocean simulation and shading

pub mod camera;
pub mod cli;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod ocean;
pub mod params;
pub mod rendering;
pub mod shading;
pub mod tuning;
