//! Display state configuration.

use serde::{Deserialize, Serialize};
use wall_display::LayoutMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Mode used when no saved state exists.
    pub default_mode: LayoutMode,
    /// Save and restore the wall between runs.
    pub persist: bool,
    /// Key the wall state is stored under (alphanumeric, `-`, `_`).
    pub state_key: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_mode: LayoutMode::Triple,
            persist: true,
            state_key: "wall".into(),
        }
    }
}
