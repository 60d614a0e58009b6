//! The bridge instance owned by each surface.
//!
//! A primary surface uses it to open the mirror and push snapshots; a
//! mirror uses it to listen and to ask for a resync after reloading. The
//! surface reference and channel handle are private to the instance, and
//! every call is non-blocking and never surfaces an error.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crate::surface::SurfaceHost;

mod deliver;
mod listen;
mod open;
mod types;
mod unload;

pub use types::{BridgeSettings, Delivery, Subscription, SurfaceState};

use types::BridgeInner;

/// Cheap to clone; clones share the same surface reference and channel.
#[derive(Clone)]
pub struct MonitorBridge {
    pub(crate) inner: Arc<BridgeInner>,
}

impl MonitorBridge {
    pub fn new(host: Arc<dyn SurfaceHost>, settings: BridgeSettings) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                host,
                settings,
                surface: Mutex::new(None),
                channel: Mutex::new(None),
                latest: Mutex::new(None),
                responder: Mutex::new(None),
                released: AtomicBool::new(false),
                unload_hooked: AtomicBool::new(false),
            }),
        }
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.inner.settings
    }
}

#[cfg(test)]
mod tests;
