use serde::{Deserialize, Serialize};

use crate::site::{Site, SiteId};
use crate::stream::{StreamInfo, WebRtcSession};

/// Renderable projection of a selected site and its cached stream.
///
/// Never stored; recomputed from the selection and the cache on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: SiteId,
    pub title: String,
    pub resolved_hls_url: Option<String>,
    pub webrtc: Option<WebRtcSession>,
}

impl Tile {
    /// Unresolved sites fall back to the bare site name and no streams.
    pub fn derive(site: &Site, stream: Option<&StreamInfo>) -> Self {
        match stream {
            Some(info) => Self {
                id: site.id.clone(),
                title: info
                    .title
                    .clone()
                    .unwrap_or_else(|| site.display_name.clone()),
                resolved_hls_url: info
                    .hls
                    .as_ref()
                    .and_then(|hls| hls.resolve())
                    .map(String::from),
                webrtc: info.webrtc.clone(),
            },
            None => Self {
                id: site.id.clone(),
                title: site.display_name.clone(),
                resolved_hls_url: None,
                webrtc: None,
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_hls_url.is_some() || self.webrtc.is_some()
    }
}
