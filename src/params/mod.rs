//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, degrees)
//! - Documented ranges and meanings
//! - Validation at the boundary where values enter

mod camera;
mod ocean;
mod render;
mod shading;
pub mod waves;

// Re-export all types
pub use camera::CameraConfig;
pub use ocean::{SurfaceGridConfig, GRAVITY_M_PER_S2};
pub use render::{RecordingConfig, RenderConfig};
pub use shading::{
    linear_to_srgb, parse_hex_color, srgb_hex, srgb_to_linear, sun_direction_from_spherical,
    ShadingParameters,
};
pub use waves::{
    DerivedArrays, WaveComponent, WaveDescriptor, WaveSet, MAX_STEEPNESS, MIN_WAVELENGTH,
};
