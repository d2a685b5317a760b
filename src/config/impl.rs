use std::sync::{Arc, OnceLock};

use super::StaticConfig;

static CONFIG: OnceLock<Arc<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .clone()
}

/// Initialize the global configuration
///
/// Loads configuration from `path` (or "config.toml" in the current directory)
/// layered under `LINKSHELF__*` environment variables.
pub fn init_config(path: Option<&str>) {
    CONFIG.get_or_init(|| Arc::new(StaticConfig::load(path)));
}
