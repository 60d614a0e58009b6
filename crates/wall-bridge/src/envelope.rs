//! Wire format shared by both delivery paths.
//!
//! Every message is a tagged JSON value:
//! - `{"type":"update","data":<DisplaySnapshot>}`
//! - `{"type":"requestUpdate"}`
//!
//! Frames travel as serialized text so nothing on the receiving side can
//! hold a reference back into the sender.

use serde::{Deserialize, Serialize};
use wall_common::BridgeError;
use wall_display::DisplaySnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Envelope {
    Update(DisplaySnapshot),
    RequestUpdate,
}

impl Envelope {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|e| BridgeError::MalformedMessage(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::MalformedMessage(e.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::Update(_) => "update",
            Envelope::RequestUpdate => "requestUpdate",
        }
    }
}

/// A direct window-to-window message as seen by the receiver.
#[derive(Debug, Clone)]
pub struct WindowMessage {
    /// Origin of the sending surface.
    pub origin: String,
    /// Serialized [`Envelope`].
    pub body: String,
}

impl WindowMessage {
    pub fn new(origin: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            body: body.into(),
        }
    }
}
