//! The textured Earth globe and its atmosphere shell.

mod atmosphere;
mod globe;
mod mesh;

pub use atmosphere::AtmosphereRenderer;
pub use globe::{GlobeRenderer, LightingUniform};
pub use mesh::{SphereMesh, generate_uv_sphere};
