//! Teardown when the primary surface goes away.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::types::{lock, BridgeInner};
use super::MonitorBridge;

impl MonitorBridge {
    /// Close the mirror and leave the channel when the hosting surface
    /// unloads, so no orphaned window outlives the primary. Registers at
    /// most one hook per bridge.
    pub fn close_on_unload(&self) {
        if self.inner.unload_hooked.swap(true, Ordering::SeqCst) {
            return;
        }
        let weak = Arc::downgrade(&self.inner);
        self.inner.host.on_unload(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.release();
            }
        }));
    }

    /// Release now: close the held surface, leave the channel, stop the
    /// resync responder. Later posts still cache the snapshot but deliver
    /// nowhere.
    pub fn release(&self) {
        self.inner.release();
    }

    pub fn is_released(&self) -> bool {
        self.inner.released.load(Ordering::SeqCst)
    }
}

impl BridgeInner {
    fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        let surface = lock(&self.surface).take();
        if let Some(surface) = surface {
            if !surface.is_closed() {
                if let Err(e) = surface.close() {
                    debug!(surface = %surface.id(), error = %e, "closing monitor surface failed");
                }
            }
        }

        if let Some(channel) = lock(&self.channel).take() {
            channel.close();
        }

        if let Some(task) = lock(&self.responder).take() {
            task.abort();
        }

        info!("monitor bridge released");
    }
}
