//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera projection settings.
    pub camera: CameraConfig,
    /// Orbit control settings.
    pub controls: ControlsConfig,
    /// Starfield generation settings.
    pub starfield: StarfieldConfig,
    /// Globe geometry and texture settings.
    pub globe: GlobeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
    /// Upper bound on the DPI scale applied to the surface. High-DPI
    /// displays above this render at a reduced internal resolution.
    pub max_pixel_ratio: f64,
}

/// Camera projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Initial camera distance from the globe center.
    pub start_distance: f32,
}

/// Orbit control configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    /// Drag rotation speed multiplier.
    pub rotate_speed: f32,
    /// Inertial damping factor per 60 Hz step, in `(0, 1]`.
    pub damping: f32,
    /// Closest allowed camera distance.
    pub min_distance: f32,
    /// Farthest allowed camera distance.
    pub max_distance: f32,
    /// Start with auto-rotation enabled.
    pub auto_rotate: bool,
    /// Auto-rotation rate in degrees per second.
    pub auto_rotate_speed: f32,
    /// Camera distance change per zoom key press.
    pub zoom_step: f32,
    /// Duration of the zoom tween in seconds.
    pub zoom_duration: f32,
}

/// Starfield generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Seed for deterministic star placement.
    pub seed: u64,
    /// Number of stars to generate.
    pub star_count: u32,
    /// Inner radius of the star shell.
    pub min_radius: f32,
    /// Outer radius of the star shell (exclusive).
    pub max_radius: f32,
    /// Base star size in world units.
    pub star_size: f32,
    /// Base star opacity in `[0, 1]`.
    pub star_opacity: f32,
}

/// Globe geometry and texture configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlobeConfig {
    /// Path to the equirectangular surface texture (PNG or JPEG).
    pub texture_path: PathBuf,
    /// Longitude segments of the sphere mesh.
    pub segments: u32,
    /// Latitude rings of the sphere mesh.
    pub rings: u32,
    /// Atmosphere shell radius as a multiple of the globe radius.
    pub atmosphere_scale: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log frame timing once per second.
    pub log_frame_stats: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "tellus".to_string(),
            max_pixel_ratio: 2.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            start_distance: 2.5,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.5,
            damping: 0.05,
            min_distance: 1.5,
            max_distance: 4.0,
            auto_rotate: true,
            auto_rotate_speed: 3.0,
            zoom_step: 0.5,
            zoom_duration: 0.5,
        }
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            star_count: 10_000,
            min_radius: 15.0,
            max_radius: 115.0,
            star_size: 0.02,
            star_opacity: 0.8,
        }
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            texture_path: PathBuf::from("assets/earth_atmos_2048.jpg"),
            segments: 64,
            rings: 64,
            atmosphere_scale: 1.02,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_frame_stats: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// The platform config directory for tellus, e.g. `~/.config/tellus`.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tellus"))
    }
}
