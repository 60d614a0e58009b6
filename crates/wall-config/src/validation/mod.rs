//! Full configuration validation.
//!
//! Each section has its own validator; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bridge;
mod display;
mod helpers;


use wall_common::ConfigError;

use crate::schema::WallConfig;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WallConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    display::validate_display(&mut errors, config);
    bridge::validate_bridge(&mut errors, config);
    validate_range(&mut errors, "layout.gap", config.layout.gap, 0, 40);
    validate_range(
        &mut errors,
        "layout.outer_padding",
        config.layout.outer_padding,
        0,
        80,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
