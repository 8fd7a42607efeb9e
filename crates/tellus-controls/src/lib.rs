//! Orbit camera controls for the globe viewer.
//!
//! [`OrbitController`] owns the camera's spherical pose around the globe and
//! integrates drag input with inertial damping, auto-rotation, and eased
//! zoom tweens. [`ViewState`] is the single explicit flag for auto-rotation,
//! flipped by the key handler and read once per update.

mod orbit;
mod state;
mod tween;

pub use orbit::OrbitController;
pub use state::ViewState;
pub use tween::ZoomTween;
