//! The unit transmitted to secondary surfaces, and the read-only mirror
//! that renders from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mode::LayoutMode;
use crate::site::{Site, SiteId};
use crate::tile::Tile;

/// Complete, self-contained display state. A mirror needs nothing else to
/// reproduce what the primary surface shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySnapshot {
    pub mode: LayoutMode,
    pub selected: Vec<Site>,
    pub tiles: Vec<Tile>,
}

impl DisplaySnapshot {
    pub fn visible_tiles(&self) -> &[Tile] {
        &self.tiles[..self.mode.visible_len(self.tiles.len())]
    }

    pub fn placeholders_count(&self) -> usize {
        self.mode
            .placeholders_for(self.mode.visible_len(self.tiles.len()))
    }

    pub fn grid_cols(&self) -> usize {
        self.mode.grid_cols()
    }

    pub fn is_selected(&self, id: &SiteId) -> bool {
        self.selected.iter().any(|s| &s.id == id)
    }
}

/// Secondary-surface view state.
///
/// Snapshots may arrive more than once (both delivery paths) and in any
/// order relative to reloads, so applying one always replaces the whole
/// state. Applying the same snapshot twice is a no-op.
#[derive(Debug, Default)]
pub struct Mirror {
    current: Option<DisplaySnapshot>,
    applied: u64,
}

impl Mirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mirrored state. Returns `true` if it differed.
    pub fn apply(&mut self, snapshot: DisplaySnapshot) -> bool {
        self.applied += 1;
        if self.current.as_ref() == Some(&snapshot) {
            debug!("duplicate snapshot ignored");
            return false;
        }
        self.current = Some(snapshot);
        true
    }

    pub fn current(&self) -> Option<&DisplaySnapshot> {
        self.current.as_ref()
    }

    /// Whether any snapshot has been received yet.
    pub fn is_synced(&self) -> bool {
        self.current.is_some()
    }

    /// Total snapshots received, duplicates included.
    pub fn applied_count(&self) -> u64 {
        self.applied
    }
}
