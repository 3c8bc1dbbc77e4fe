mod platform;

use std::path::PathBuf;

use anyhow::Context;
use console_logging::console_info;

const DEFAULT_SETTINGS_PATH: &str = "./deadtasks.ron";

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

    let loaded = platform::settings::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;
    let from_file = loaded.is_some();
    let settings = loaded.unwrap_or_default();

    platform::logging::initialize(settings.log_destination, &settings.log_path);
    if !from_file {
        console_info!("No settings at {:?}, using defaults", settings_path);
    }
    platform::app::run_app(settings)
}
