//! Secondary-surface lifecycle: open, reuse, inspect.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wall_common::{BridgeError, SurfaceId};

use crate::surface::Surface;

use super::types::lock;
use super::{MonitorBridge, SurfaceState};

impl MonitorBridge {
    /// Show the mirror at `url`.
    ///
    /// A held surface that is still open is focused and, only if it sits
    /// elsewhere, navigated. Any failure on that path (closed meanwhile,
    /// cross-origin after a navigation) falls through to a fresh open under
    /// the fixed window name. Returns the surface now held, if any.
    ///
    /// A released bridge opens nothing: its unload hook has already fired
    /// and could not close a new window.
    pub fn open_or_reuse(&self, url: &str) -> Option<Arc<dyn Surface>> {
        if self.is_released() {
            debug!(url, "bridge released, not opening monitor");
            return None;
        }
        if let Some(existing) = self.live_surface() {
            match reuse(existing.as_ref(), url) {
                Ok(()) => {
                    debug!(surface = %existing.id(), url, "reusing monitor surface");
                    return Some(existing);
                }
                Err(e) => {
                    warn!(surface = %existing.id(), error = %e, "monitor reuse failed, reopening");
                }
            }
        }

        let settings = &self.inner.settings;
        match self
            .inner
            .host
            .open(url, &settings.window_name, &settings.window_features)
        {
            Ok(surface) => {
                info!(surface = %surface.id(), url, "monitor surface opened");
                *lock(&self.inner.surface) = Some(Arc::clone(&surface));
                Some(surface)
            }
            Err(e) => {
                warn!(url, error = %e, "could not open monitor surface");
                *lock(&self.inner.surface) = None;
                None
            }
        }
    }

    pub fn surface_state(&self) -> SurfaceState {
        match self.live_surface() {
            Some(_) => SurfaceState::Open,
            None => SurfaceState::Absent,
        }
    }

    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.live_surface().map(|s| s.id().clone())
    }

    /// The held surface if it is still open. A surface the user closed is
    /// dropped here, moving the reference back to `Absent`.
    pub(super) fn live_surface(&self) -> Option<Arc<dyn Surface>> {
        let mut held = lock(&self.inner.surface);
        match held.as_ref() {
            Some(surface) if surface.is_closed() => {
                debug!(surface = %surface.id(), "monitor surface was closed");
                *held = None;
                None
            }
            other => other.cloned(),
        }
    }
}

fn reuse(surface: &dyn Surface, url: &str) -> Result<(), BridgeError> {
    surface.focus()?;
    if surface.location()? != url {
        surface.navigate(url)?;
    }
    Ok(())
}
