//! Command-line argument parsing for the tellus viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// tellus command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "tellus", about = "Interactive 3D Earth globe viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Starfield seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to the globe surface texture.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Disable auto-rotation at startup.
    #[arg(long)]
    pub no_auto_rotate: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments from the process environment.
    pub fn from_env() -> Self {
        Self::parse()
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(n) = args.stars {
            self.starfield.star_count = n;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = seed;
        }
        if let Some(ref path) = args.texture {
            self.globe.texture_path = path.clone();
        }
        if args.no_auto_rotate {
            self.controls.auto_rotate = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
