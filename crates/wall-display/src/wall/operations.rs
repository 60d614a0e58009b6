//! Selection and mode mutations.

use tracing::debug;

use crate::commands::WallCommand;
use crate::mode::{LayoutMode, MAX_SELECTION};
use crate::site::{Site, SiteId};

use super::Wall;

impl Wall {
    /// Execute a command. Returns `true` if the state changed.
    pub fn execute(&mut self, cmd: WallCommand) -> bool {
        match cmd {
            WallCommand::SetMode { mode } => self.set_mode(mode),
            WallCommand::Toggle { site } => self.toggle(site),
            WallCommand::Remove { id } => self.remove(&id),
            WallCommand::Clear => self.clear(),
            WallCommand::Focus { id } => self.focus(&id),
        }
    }

    /// Switch layout. The selection is never truncated: entries past the
    /// new capacity stay selected but hidden.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Remove the site if it is selected, otherwise append it.
    ///
    /// Appending past [`MAX_SELECTION`] is silently ignored.
    pub fn toggle(&mut self, site: Site) -> bool {
        if let Some(idx) = self.position(&site.id) {
            self.selected.remove(idx);
            return true;
        }
        if self.selected.len() >= MAX_SELECTION {
            debug!(site_id = %site.id, "selection full, toggle ignored");
            return false;
        }
        self.selected.push(site);
        true
    }

    pub fn remove(&mut self, id: &SiteId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.selected.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empty the selection. The stream cache is kept for reselection.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Move a selected site to the first slot and switch to single mode.
    ///
    /// No-op when the id is not selected.
    pub fn focus(&mut self, id: &SiteId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let moved = idx > 0;
        if moved {
            let site = self.selected.remove(idx);
            self.selected.insert(0, site);
        }
        let mode_changed = self.set_mode(LayoutMode::Single);
        moved || mode_changed
    }

    pub(super) fn position(&self, id: &SiteId) -> Option<usize> {
        self.selected.iter().position(|s| &s.id == id)
    }
}
