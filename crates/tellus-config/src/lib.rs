//! Configuration for the tellus globe viewer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Unknown fields are ignored and missing fields fall
//! back to defaults, so old config files keep working across versions.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ControlsConfig, DebugConfig, GlobeConfig, StarfieldConfig, WindowConfig,
};
pub use error::ConfigError;
