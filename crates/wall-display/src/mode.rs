//! Layout modes and their fixed geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of selected sites, independent of mode.
pub const MAX_SELECTION: usize = 9;

/// How many tiles the wall renders at once, and in how many columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// One enlarged tile.
    Single,
    /// Three tiles on a 2-column grid (one empty corner).
    #[default]
    Triple,
    /// Four tiles on a 2x2 grid.
    Quad,
    /// Nine tiles on a 3x3 grid.
    Grid,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Single,
        LayoutMode::Triple,
        LayoutMode::Quad,
        LayoutMode::Grid,
    ];

    /// Number of tiles rendered simultaneously.
    pub fn capacity(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Triple => 3,
            LayoutMode::Quad => 4,
            LayoutMode::Grid => 9,
        }
    }

    /// Column count of the rendering grid. Depends on the mode only.
    pub fn grid_cols(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Triple | LayoutMode::Quad => 2,
            LayoutMode::Grid => 3,
        }
    }

    pub fn grid_rows(self) -> usize {
        self.capacity().div_ceil(self.grid_cols())
    }

    /// How many of `total` tiles fit in this mode.
    pub fn visible_len(self, total: usize) -> usize {
        total.min(self.capacity())
    }

    /// Empty cells needed to complete the grid when `visible` tiles are shown.
    pub fn placeholders_for(self, visible: usize) -> usize {
        self.capacity().saturating_sub(visible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Single => "single",
            LayoutMode::Triple => "triple",
            LayoutMode::Quad => "quad",
            LayoutMode::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the mode name or its capacity (`"grid"` or `"9"`).
impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(LayoutMode::Single),
            "triple" | "3" => Ok(LayoutMode::Triple),
            "quad" | "4" => Ok(LayoutMode::Quad),
            "grid" | "9" => Ok(LayoutMode::Grid),
            other => Err(format!("unknown layout mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacities() {
        assert_eq!(LayoutMode::Single.capacity(), 1);
        assert_eq!(LayoutMode::Triple.capacity(), 3);
        assert_eq!(LayoutMode::Quad.capacity(), 4);
        assert_eq!(LayoutMode::Grid.capacity(), 9);
    }

    #[test]
    fn grid_cols_by_mode() {
        assert_eq!(LayoutMode::Single.grid_cols(), 1);
        assert_eq!(LayoutMode::Triple.grid_cols(), 2);
        assert_eq!(LayoutMode::Quad.grid_cols(), 2);
        assert_eq!(LayoutMode::Grid.grid_cols(), 3);
    }

    #[test]
    fn grid_rows_by_mode() {
        assert_eq!(LayoutMode::Single.grid_rows(), 1);
        assert_eq!(LayoutMode::Triple.grid_rows(), 2);
        assert_eq!(LayoutMode::Quad.grid_rows(), 2);
        assert_eq!(LayoutMode::Grid.grid_rows(), 3);
    }

    #[test]
    fn capacity_never_exceeds_selection_ceiling() {
        for mode in LayoutMode::ALL {
            assert!(mode.capacity() <= MAX_SELECTION);
        }
    }

    #[test]
    fn visible_plus_placeholders_is_capacity() {
        for mode in LayoutMode::ALL {
            for total in 0..=MAX_SELECTION {
                let visible = mode.visible_len(total);
                assert!(visible <= mode.capacity());
                assert_eq!(visible + mode.placeholders_for(visible), mode.capacity());
            }
        }
    }

    #[test]
    fn default_is_triple() {
        assert_eq!(LayoutMode::default(), LayoutMode::Triple);
    }

    #[test]
    fn parse_names_and_capacities() {
        assert_eq!("grid".parse::<LayoutMode>().unwrap(), LayoutMode::Grid);
        assert_eq!("9".parse::<LayoutMode>().unwrap(), LayoutMode::Grid);
        assert_eq!(" Single ".parse::<LayoutMode>().unwrap(), LayoutMode::Single);
        assert_eq!("4".parse::<LayoutMode>().unwrap(), LayoutMode::Quad);
        assert!("hex".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&LayoutMode::Quad).unwrap();
        assert_eq!(json, "\"quad\"");
        let mode: LayoutMode = serde_json::from_str("\"triple\"").unwrap();
        assert_eq!(mode, LayoutMode::Triple);
    }
}
