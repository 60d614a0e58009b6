//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod display;
mod layout;
mod system;

pub use bridge::*;
pub use display::*;
pub use layout::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub display: DisplayConfig,
    pub bridge: BridgeConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wall_display::LayoutMode;

    #[test]
    fn defaults_match_documented_values() {
        let config = WallConfig::default();
        assert_eq!(config.display.default_mode, LayoutMode::Triple);
        assert!(config.display.persist);
        assert_eq!(config.display.state_key, "wall");
        assert_eq!(config.bridge.origin, "http://localhost:5173");
        assert_eq!(config.bridge.channel_name, "monitor_sync");
        assert_eq!(config.bridge.window_name, "MonitorWindow");
        assert_eq!(config.bridge.window_features, "width=1280,height=800");
        assert_eq!(config.bridge.monitor_path, "/monitor");
        assert_eq!(config.layout.gap, 8);
        assert_eq!(config.layout.outer_padding, 10);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_deserializes_with_defaults() {
        let toml_str = r#"
[display]
default_mode = "grid"

[bridge]
origin = "https://wall.example.com"
"#;
        let config: WallConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.default_mode, LayoutMode::Grid);
        assert_eq!(config.bridge.origin, "https://wall.example.com");
        // Defaults preserved
        assert!(config.display.persist);
        assert_eq!(config.bridge.channel_name, "monitor_sync");
        assert_eq!(config.layout.gap, 8);
    }

    #[test]
    fn empty_toml_gives_all_defaults() {
        let config: WallConfig = toml::from_str("").unwrap();
        assert_eq!(config, WallConfig::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result: Result<WallConfig, _> = toml::from_str("[display]\ndefault_mode = \"hex\"\n");
        assert!(result.is_err());
    }
}
