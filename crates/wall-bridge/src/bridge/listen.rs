//! Mirror-side subscription to both delivery paths.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use wall_display::DisplaySnapshot;

use crate::envelope::Envelope;
use crate::origin::OriginAllowList;

use super::{MonitorBridge, Subscription};

impl MonitorBridge {
    /// Call `on_update` for every snapshot arriving by direct message or
    /// broadcast.
    ///
    /// Direct messages from any origin other than this surface's own are
    /// discarded. The same logical update may arrive once per path, so
    /// `on_update` must be idempotent (replace state, don't patch it).
    /// Both subscriptions are live when this returns. Outside a tokio
    /// runtime the returned subscription is empty and never fires.
    pub fn listen<F>(&self, on_update: F) -> Subscription
    where
        F: Fn(DisplaySnapshot) + Send + Sync + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, listener not started");
            return Subscription { tasks: Vec::new() };
        };
        let on_update = Arc::new(on_update);
        let mut tasks = Vec::with_capacity(2);

        let allow = OriginAllowList::same_origin(self.inner.host.origin());
        let mut inbox = self.inner.host.messages();
        let direct = Arc::clone(&on_update);
        tasks.push(runtime.spawn(async move {
            loop {
                match inbox.recv().await {
                    Ok(message) => {
                        if !allow.is_allowed(&message.origin) {
                            debug!(origin = %message.origin, "direct message from foreign origin discarded");
                            continue;
                        }
                        match Envelope::from_json(&message.body) {
                            Ok(Envelope::Update(snapshot)) => direct(snapshot),
                            Ok(_) => {}
                            Err(e) => warn!(error = %e, "dropping direct message"),
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "direct message inbox lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));

        if let Some(channel) = self.channel() {
            let mut receiver = channel.subscribe();
            let broadcast = Arc::clone(&on_update);
            tasks.push(runtime.spawn(async move {
                while let Some(envelope) = receiver.recv().await {
                    if let Envelope::Update(snapshot) = envelope {
                        broadcast(snapshot);
                    }
                }
            }));
        }

        Subscription { tasks }
    }
}
