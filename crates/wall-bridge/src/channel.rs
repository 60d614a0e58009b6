//! Named same-origin broadcast channels.
//!
//! Every endpoint that joins a name receives what the other endpoints
//! post; an endpoint never receives its own frames.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use tracing::{debug, warn};
use wall_common::{new_short_id, BridgeError};

use crate::envelope::Envelope;

/// Frames a slow endpoint may fall behind before it starts skipping.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct ChannelFrame {
    sender: String,
    body: String,
}

/// All channels of one origin, keyed by name.
#[derive(Clone, Default)]
pub struct ChannelHub {
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<ChannelFrame>>>>,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join `name`, creating it on first use.
    pub fn open(&self, name: &str) -> BroadcastChannel {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = channels
            .entry(name.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone();
        let endpoint = new_short_id();
        debug!(channel = name, endpoint = %endpoint, "channel joined");
        BroadcastChannel {
            name: name.to_string(),
            endpoint,
            tx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// One endpoint of a named channel.
pub struct BroadcastChannel {
    name: String,
    endpoint: String,
    tx: broadcast::Sender<ChannelFrame>,
    closed: Arc<AtomicBool>,
}

impl BroadcastChannel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Send to every other endpoint. Having no listeners is not an error.
    pub fn post(&self, envelope: &Envelope) -> Result<(), BridgeError> {
        if self.is_closed() {
            return Err(BridgeError::ChannelClosed(self.name.clone()));
        }
        let frame = ChannelFrame {
            sender: self.endpoint.clone(),
            body: envelope.to_json()?,
        };
        let receivers = self.tx.send(frame).unwrap_or(0);
        debug!(channel = %self.name, kind = envelope.kind(), receivers, "channel post");
        Ok(())
    }

    /// Start receiving. Frames posted before this call are not seen.
    pub fn subscribe(&self) -> ChannelReceiver {
        ChannelReceiver {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            rx: self.tx.subscribe(),
            closed: Arc::clone(&self.closed),
        }
    }

    /// Detach this endpoint. Further posts fail; receivers end.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!(channel = %self.name, endpoint = %self.endpoint, "channel closed");
        }
    }
}

pub struct ChannelReceiver {
    name: String,
    endpoint: String,
    rx: broadcast::Receiver<ChannelFrame>,
    closed: Arc<AtomicBool>,
}

impl ChannelReceiver {
    /// Next envelope from another endpoint, or `None` once this endpoint
    /// is closed. Malformed frames are skipped.
    pub async fn recv(&mut self) -> Option<Envelope> {
        loop {
            if self.closed.load(Ordering::SeqCst) {
                return None;
            }
            match self.rx.recv().await {
                Ok(frame) => {
                    if frame.sender == self.endpoint || self.closed.load(Ordering::SeqCst) {
                        continue;
                    }
                    match Envelope::from_json(&frame.body) {
                        Ok(envelope) => return Some(envelope),
                        Err(e) => {
                            warn!(channel = %self.name, error = %e, "dropping channel frame");
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(channel = %self.name, skipped, "channel receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
