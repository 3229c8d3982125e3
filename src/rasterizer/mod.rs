//! Software wireframe rendering pipeline
//!
//! Geometry flows object space -> view -> clip -> NDC -> viewport pixels:
//! - Hand-rolled vector/matrix math (row-major Mat4)
//! - Fly camera and look-at basis construction
//! - Near-plane line clipping with degenerate-collapse policy
//! - Slope-DDA point/line rasterization into a pluggable surface sink

mod camera;
mod clip;
mod math;
mod render;
mod types;

pub use camera::*;
pub use clip::*;
pub use math::*;
pub use render::*;
pub use types::*;

/// Default screen dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
