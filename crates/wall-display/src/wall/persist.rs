//! Saving and restoring the wall through a key-value store.

use tracing::{debug, info};
use wall_common::StoreError;

use crate::store::StateStore;

use super::Wall;

impl Wall {
    /// Write the full state (mode, selection, cache) under `key`.
    pub fn save_to(&self, store: &dyn StateStore, key: &str) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.save(key, &json)?;
        debug!(key, selected = self.selected.len(), "wall state saved");
        Ok(())
    }

    /// Load a previously saved state. `Ok(None)` if nothing is stored.
    pub fn restore_from(store: &dyn StateStore, key: &str) -> Result<Option<Wall>, StoreError> {
        let Some(json) = store.load(key)? else {
            return Ok(None);
        };
        let mut wall: Wall = serde_json::from_str(&json)?;
        wall.sanitize();
        info!(
            key,
            mode = %wall.mode,
            selected = wall.selected.len(),
            "wall state restored"
        );
        Ok(Some(wall))
    }
}
