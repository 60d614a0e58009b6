//! Wall configuration.
//!
//! TOML-based configuration with full validation. Every section uses serde
//! defaults so partial configs work out of the box.
//!
//! ```rust,no_run
//! use wall_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, DisplayConfig, LayoutConfig, LogLevel, LoggingConfig, WallConfig,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use wall_common::ConfigError;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<WallConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path. A missing file is an error here;
/// only the default location gets a generated template.
pub fn load_config_from(path: &Path) -> Result<WallConfig, ConfigError> {
    toml_loader::load_from_path(path)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WallConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
