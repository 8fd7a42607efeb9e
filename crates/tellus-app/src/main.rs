//! The binary entry point for the tellus globe viewer.

use tellus_config::{CliArgs, Config};
use tracing::info;

fn main() {
    let args = CliArgs::from_env();

    let config_dir = args.config.clone().or_else(Config::default_config_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    tellus_log::init_logging(None, Some(&config));
    info!(
        "Starting tellus: {} stars, seed {}",
        config.starfield.star_count, config.starfield.seed
    );

    tellus_app::run(config);
}
