use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use wall_display::DisplaySnapshot;

use crate::channel::BroadcastChannel;
use crate::surface::{Surface, SurfaceHost};

/// Fixed identifiers shared by every surface of the application.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    /// Name of the broadcast channel all surfaces join.
    pub channel_name: String,
    /// Window name reused on every open so the OS keeps one window.
    pub window_name: String,
    /// Feature string passed on open (size, position).
    pub window_features: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            channel_name: "monitor_sync".to_string(),
            window_name: "MonitorWindow".to_string(),
            window_features: "width=1280,height=800".to_string(),
        }
    }
}

/// Lifecycle of the held secondary-surface reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Absent,
    Open,
}

/// Which paths accepted a `post_update`. Acceptance is not delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub direct: bool,
    pub broadcast: bool,
}

impl Delivery {
    pub fn any(&self) -> bool {
        self.direct || self.broadcast
    }
}

/// Detaches listener tasks. Dropping it detaches too.
pub struct Subscription {
    pub(super) tasks: Vec<JoinHandle<()>>,
}

impl Subscription {
    pub fn dispose(mut self) {
        self.abort_all();
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.abort_all();
    }
}

pub(crate) struct BridgeInner {
    pub(super) host: Arc<dyn SurfaceHost>,
    pub(super) settings: BridgeSettings,
    /// The one secondary surface this primary may hold.
    pub(super) surface: Mutex<Option<Arc<dyn Surface>>>,
    /// Lazily joined; `None` again after release.
    pub(super) channel: Mutex<Option<Arc<BroadcastChannel>>>,
    /// Last snapshot posted, replayed on request.
    pub(super) latest: Mutex<Option<DisplaySnapshot>>,
    pub(super) responder: Mutex<Option<JoinHandle<()>>>,
    pub(super) released: AtomicBool,
    pub(super) unload_hooked: AtomicBool,
}

impl Drop for BridgeInner {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.responder).take() {
            task.abort();
        }
    }
}

/// Lock ignoring poison: every critical section here leaves the data
/// consistent even if a callback panicked.
pub(super) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
