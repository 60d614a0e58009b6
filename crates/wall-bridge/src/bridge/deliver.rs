//! Snapshot delivery and resync requests.

use std::sync::Arc;

use tokio::runtime::Handle;

use tracing::{debug, warn};
use wall_display::DisplaySnapshot;

use crate::channel::BroadcastChannel;
use crate::envelope::{Envelope, WindowMessage};

use super::types::lock;
use super::{Delivery, MonitorBridge};

impl MonitorBridge {
    /// Send `snapshot` to the mirror by both paths and keep it as the
    /// latest for later resync requests.
    ///
    /// The direct path is tried only while a surface is held; the
    /// broadcast path always. Failures on either are logged and swallowed.
    pub fn post_update(&self, snapshot: DisplaySnapshot) -> Delivery {
        *lock(&self.inner.latest) = Some(snapshot.clone());

        let envelope = Envelope::Update(snapshot);
        let body = match envelope.to_json() {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "snapshot could not be encoded");
                return Delivery::default();
            }
        };

        let mut delivery = Delivery::default();

        if let Some(surface) = self.live_surface() {
            let origin = self.inner.host.origin();
            match surface.post_message(WindowMessage::new(origin.clone(), body), &origin) {
                Ok(()) => delivery.direct = true,
                Err(e) => debug!(surface = %surface.id(), error = %e, "direct delivery failed"),
            }
        }

        if let Some(channel) = self.channel() {
            match channel.post(&envelope) {
                Ok(()) => delivery.broadcast = true,
                Err(e) => debug!(error = %e, "broadcast delivery failed"),
            }
        }

        delivery
    }

    /// Ask whoever holds a snapshot to post it again.
    pub fn request_latest(&self) -> bool {
        let Some(channel) = self.channel() else {
            return false;
        };
        match channel.post(&Envelope::RequestUpdate) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "resync request not sent");
                false
            }
        }
    }

    /// The last snapshot passed to [`post_update`](Self::post_update).
    pub fn latest(&self) -> Option<DisplaySnapshot> {
        lock(&self.inner.latest).clone()
    }

    /// Answer `requestUpdate` broadcasts by re-posting the latest snapshot.
    ///
    /// Runs until the bridge is released or dropped. Calling it again
    /// replaces the previous responder. Outside a tokio runtime nothing is
    /// started and `false` is returned.
    pub fn answer_requests(&self) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, resync requests will go unanswered");
            return false;
        };
        let Some(channel) = self.channel() else {
            return false;
        };
        let mut requests = channel.subscribe();
        let weak = Arc::downgrade(&self.inner);

        let task = runtime.spawn(async move {
            while let Some(envelope) = requests.recv().await {
                if !matches!(envelope, Envelope::RequestUpdate) {
                    continue;
                }
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let bridge = MonitorBridge { inner };
                match bridge.latest() {
                    Some(snapshot) => {
                        debug!("answering resync request");
                        bridge.post_update(snapshot);
                    }
                    None => debug!("resync requested before any update"),
                }
            }
        });

        if let Some(previous) = lock(&self.inner.responder).replace(task) {
            previous.abort();
        }
        true
    }

    /// The broadcast endpoint, joined on first use. `None` once released.
    pub(super) fn channel(&self) -> Option<Arc<BroadcastChannel>> {
        if self.is_released() {
            return None;
        }
        let mut channel = lock(&self.inner.channel);
        let joined = channel.get_or_insert_with(|| {
            Arc::new(
                self.inner
                    .host
                    .broadcast_channel(&self.inner.settings.channel_name),
            )
        });
        Some(Arc::clone(joined))
    }
}
