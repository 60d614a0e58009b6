//! Resolved playback metadata and the loader contract that produces it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wall_common::LoadError;

use crate::site::SiteId;

/// An HLS reference: either a single playlist URL or a resolution ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HlsSource {
    Url(String),
    Ladder(HlsLadder),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HlsLadder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url480: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url720: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url1080: Option<String>,
}

impl HlsSource {
    /// Pick the URL to play.
    ///
    /// Ladders prefer 720p, then 480p, then 1080p. A plain URL passes
    /// through unchanged.
    pub fn resolve(&self) -> Option<&str> {
        match self {
            HlsSource::Url(url) => Some(url.as_str()),
            HlsSource::Ladder(ladder) => ladder
                .url720
                .as_deref()
                .or(ladder.url480.as_deref())
                .or(ladder.url1080.as_deref()),
        }
    }
}

/// Real-time session descriptor for a WebRTC feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebRtcSession {
    pub room: String,
    pub token: String,
}

/// Cached per-site stream metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub hls: Option<HlsSource>,
    #[serde(default)]
    pub webrtc: Option<WebRtcSession>,
}

impl StreamInfo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_hls(mut self, hls: HlsSource) -> Self {
        self.hls = Some(hls);
        self
    }

    pub fn with_webrtc(mut self, room: impl Into<String>, token: impl Into<String>) -> Self {
        self.webrtc = Some(WebRtcSession {
            room: room.into(),
            token: token.into(),
        });
        self
    }

    /// Fill in a missing title, keeping the loader's title when it has one.
    pub fn or_title(mut self, fallback: &str) -> Self {
        if self.title.is_none() {
            self.title = Some(fallback.to_string());
        }
        self
    }
}

/// Resolves a site id to stream metadata.
///
/// Each call must succeed or fail independently of calls for other ids.
#[async_trait]
pub trait StreamLoader: Send + Sync {
    async fn resolve(&self, id: &SiteId) -> Result<StreamInfo, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder(u480: Option<&str>, u720: Option<&str>, u1080: Option<&str>) -> HlsSource {
        HlsSource::Ladder(HlsLadder {
            url480: u480.map(String::from),
            url720: u720.map(String::from),
            url1080: u1080.map(String::from),
        })
    }

    #[test]
    fn ladder_prefers_720() {
        let hls = ladder(Some("a480"), Some("a720"), Some("a1080"));
        assert_eq!(hls.resolve(), Some("a720"));
    }

    #[test]
    fn ladder_falls_back_to_480_then_1080() {
        assert_eq!(ladder(Some("a480"), None, Some("a1080")).resolve(), Some("a480"));
        assert_eq!(ladder(None, None, Some("a1080")).resolve(), Some("a1080"));
        assert_eq!(ladder(None, None, None).resolve(), None);
    }

    #[test]
    fn plain_url_passes_through() {
        let hls = HlsSource::Url("https://cdn/live.m3u8".into());
        assert_eq!(hls.resolve(), Some("https://cdn/live.m3u8"));
    }

    #[test]
    fn hls_deserializes_string_or_ladder() {
        let plain: HlsSource = serde_json::from_str("\"https://x/y.m3u8\"").unwrap();
        assert!(matches!(plain, HlsSource::Url(_)));

        let ladder: HlsSource =
            serde_json::from_str(r#"{"url480":"l","url1080":"h"}"#).unwrap();
        assert_eq!(ladder.resolve(), Some("l"));
    }

    #[test]
    fn stream_info_accepts_missing_fields() {
        let info: StreamInfo = serde_json::from_str(r#"{"title":"Cam"}"#).unwrap();
        assert_eq!(info.title.as_deref(), Some("Cam"));
        assert!(info.hls.is_none());
        assert!(info.webrtc.is_none());
    }

    #[test]
    fn or_title_keeps_existing() {
        assert_eq!(
            StreamInfo::titled("Loader").or_title("Site").title.as_deref(),
            Some("Loader")
        );
        assert_eq!(
            StreamInfo::default().or_title("Site").title.as_deref(),
            Some("Site")
        );
    }
}
