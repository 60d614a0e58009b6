//! Cross-window bridge configuration.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Origin the primary surface is served from. Only messages from this
    /// origin are accepted.
    pub origin: String,
    pub channel_name: String,
    /// Fixed name of the secondary window, so reopening retargets it.
    pub window_name: String,
    pub window_features: String,
    /// Path of the secondary surface under `origin`.
    pub monitor_path: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".into(),
            channel_name: "monitor_sync".into(),
            window_name: "MonitorWindow".into(),
            window_features: "width=1280,height=800".into(),
            monitor_path: "/monitor".into(),
        }
    }
}

impl BridgeConfig {
    /// URL of the primary surface.
    pub fn primary_url(&self) -> Option<String> {
        Url::parse(&self.origin).ok().map(String::from)
    }

    /// URL of the secondary surface: `monitor_path` resolved against
    /// `origin`.
    pub fn monitor_url(&self) -> Option<String> {
        let base = Url::parse(&self.origin).ok()?;
        base.join(&self.monitor_path).ok().map(String::from)
    }
}
