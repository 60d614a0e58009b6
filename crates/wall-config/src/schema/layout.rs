//! Tile grid geometry configuration.

use serde::{Deserialize, Serialize};
use wall_display::GridLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between cells in pixels (valid range: 0-40).
    pub gap: u32,
    /// Viewport-edge padding in pixels (valid range: 0-80).
    pub outer_padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 8,
            outer_padding: 10,
        }
    }
}

impl From<&LayoutConfig> for GridLayout {
    fn from(config: &LayoutConfig) -> Self {
        GridLayout {
            gap: config.gap,
            outer_padding: config.outer_padding,
        }
    }
}
