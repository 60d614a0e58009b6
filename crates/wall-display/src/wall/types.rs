//! Core state and constructors for the Wall.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::mode::{LayoutMode, MAX_SELECTION};
use crate::site::{Site, SiteId};
use crate::stream::StreamInfo;

/// The display state machine: selected sites (ordered), the active layout
/// mode, and the per-site stream cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wall {
    /// Active layout mode.
    pub(super) mode: LayoutMode,
    /// Selected sites in insertion order. Index 0 is the focus slot.
    pub(super) selected: Vec<Site>,
    /// Resolved stream metadata by site id. Entries outlive deselection.
    pub(super) streams: HashMap<SiteId, StreamInfo>,
}

impl Wall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    // -- Accessors --

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn selected(&self) -> &[Site] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn stream(&self, id: &SiteId) -> Option<&StreamInfo> {
        self.streams.get(id)
    }

    pub fn cached_count(&self) -> usize {
        self.streams.len()
    }

    /// Restore invariants on state that came from outside (a persisted
    /// snapshot, a hand-edited file): first occurrence of an id wins and
    /// the selection is cut to the ceiling.
    pub fn sanitize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.selected.retain(|site| seen.insert(site.id.clone()));
        self.selected.truncate(MAX_SELECTION);
    }
}
