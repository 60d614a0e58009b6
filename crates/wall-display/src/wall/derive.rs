//! Pure derivations over the wall state. Nothing here is cached.

use crate::site::SiteId;
use crate::snapshot::DisplaySnapshot;
use crate::tile::Tile;

use super::Wall;

impl Wall {
    /// Every selected site as a tile, in selection order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.selected
            .iter()
            .map(|site| Tile::derive(site, self.streams.get(&site.id)))
            .collect()
    }

    /// The first `capacity(mode)` tiles. Later selections stay benched.
    pub fn visible_tiles(&self) -> Vec<Tile> {
        let limit = self.mode.visible_len(self.selected.len());
        self.selected[..limit]
            .iter()
            .map(|site| Tile::derive(site, self.streams.get(&site.id)))
            .collect()
    }

    pub fn placeholders_count(&self) -> usize {
        let visible = self.mode.visible_len(self.selected.len());
        self.mode.placeholders_for(visible)
    }

    pub fn grid_cols(&self) -> usize {
        self.mode.grid_cols()
    }

    pub fn is_selected(&self, id: &SiteId) -> bool {
        self.position(id).is_some()
    }

    /// Self-contained copy of everything a mirror needs to render.
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            mode: self.mode,
            selected: self.selected.clone(),
            tiles: self.tiles(),
        }
    }
}
