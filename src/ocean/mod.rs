//! Ocean surface: Gerstner displacement, the displaced grid and per-frame update.

pub mod displacement;
mod mesh;
mod system;

pub use displacement::SurfacePoint;
pub use mesh::{OceanGrid, Vertex};
pub use system::{Frame, OceanSystem};
