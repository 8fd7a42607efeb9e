//! Structured logging for the tellus viewer.
//!
//! Console logging via the `tracing` ecosystem: timestamps relative to
//! startup, module paths, and severity levels, filterable per subsystem.
//! The filter comes from `RUST_LOG` when set, otherwise from the config's
//! log level, otherwise a default that quiets wgpu's verbose internals.

use std::path::Path;

use tellus_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter: info everywhere, but only warnings from the GPU stack.
const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Initialize the tracing subscriber.
///
/// * `log_dir` - Optional directory for a plain-text log file.
/// * `config` - Optional configuration supplying a log level override.
///
/// Precedence: `RUST_LOG` env var, then `config.debug.log_level`, then
/// [`DEFAULT_FILTER`].
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let filter_str = config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("tellus.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime());

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_quiets_gpu_stack() {
        let filter = default_env_filter();
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,tellus_render=trace",
            "warn,tellus_starfield=debug",
            "error",
        ];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_config_level_feeds_filter() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        let level = config.debug.log_level.as_str();
        let filter = EnvFilter::new(level);
        assert!(format!("{}", filter).contains("debug"));
    }

    #[test]
    fn test_log_file_path_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("tellus.log");
        assert_eq!(log_file_path.file_name().unwrap(), "tellus.log");
    }
}
