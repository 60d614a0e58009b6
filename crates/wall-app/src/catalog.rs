//! Demonstration site catalog and stream loader.
//!
//! Twelve construction sites around Tokyo, each mapped to a camera feed.
//! Sites without a camera resolve to a titled placeholder with no streams.

use async_trait::async_trait;
use wall_common::LoadError;
use wall_display::{HlsLadder, HlsSource, Site, SiteId, StreamInfo, StreamLoader};

const SITES: &[(&str, &str)] = &[
    ("a1", "Tokyo Works A"),
    ("a2", "Tokyo Works B"),
    ("a3", "Ueno Works A"),
    ("a4", "Ueno Works B"),
    ("a5", "Shibuya Works"),
    ("a6", "Shinjuku Works"),
    ("a7", "Ikebukuro Works"),
    ("a8", "Kanda Works"),
    ("a9", "Ochanomizu Works"),
    ("a10", "Yurakucho Works"),
    ("a11", "Hamamatsucho Works"),
    ("a12", "Kinshicho Works"),
];

const SITE_CAMERAS: &[(&str, &str)] = &[
    ("a1", "CAM_TOKYO"),
    ("a2", "CAM_UENO"),
    ("a3", "CAM_SHINAGAWA"),
    ("a4", "CAM_SHIBUYA"),
    ("a5", "CAM_SHINJUKU"),
    ("a6", "CAM_AKIHABARA"),
    ("a7", "CAM_IKEBUKURO"),
    ("a8", "CAM_KANDA"),
    ("a9", "CAM_OCHANOMIZU"),
    ("a10", "CAM_YURAKUCHO"),
    ("a11", "CAM_HAMAMATSU"),
    ("a12", "CAM_KINSHICHO"),
];

const STREAM_HOST: &str = "https://streams.example.com";

pub fn sites() -> Vec<Site> {
    SITES.iter().map(|(id, name)| Site::new(*id, *name)).collect()
}

pub fn find(id: &str) -> Option<Site> {
    SITES
        .iter()
        .find(|(site_id, _)| *site_id == id)
        .map(|(id, name)| Site::new(*id, *name))
}

fn camera_for(id: &SiteId) -> Option<&'static str> {
    SITE_CAMERAS
        .iter()
        .find(|(site_id, _)| *site_id == id.as_str())
        .map(|(_, cam)| *cam)
}

/// Stream metadata for one camera. Feeds differ in what they publish:
/// most carry a full HLS ladder, a few only a single rendition, and the
/// station cameras add a WebRTC room.
fn camera_stream(cam: &str) -> StreamInfo {
    let slug = cam.trim_start_matches("CAM_").to_ascii_lowercase();
    let title = format!("{} Camera", title_case(&slug));
    let base = format!("{STREAM_HOST}/{slug}");

    let info = StreamInfo::titled(title);
    match cam {
        "CAM_TOKYO" | "CAM_SHINJUKU" => info
            .with_hls(HlsSource::Ladder(HlsLadder {
                url480: Some(format!("{base}/480p.m3u8")),
                url720: Some(format!("{base}/720p.m3u8")),
                url1080: Some(format!("{base}/1080p.m3u8")),
            }))
            .with_webrtc(format!("room-{slug}"), format!("demo-{slug}")),
        "CAM_KANDA" | "CAM_KINSHICHO" => info.with_hls(HlsSource::Ladder(HlsLadder {
            url480: None,
            url720: None,
            url1080: Some(format!("{base}/1080p.m3u8")),
        })),
        "CAM_HAMAMATSU" => info.with_hls(HlsSource::Url(format!("{base}/index.m3u8"))),
        _ => info.with_hls(HlsSource::Ladder(HlsLadder {
            url480: Some(format!("{base}/480p.m3u8")),
            url720: Some(format!("{base}/720p.m3u8")),
            url1080: None,
        })),
    }
}

fn title_case(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Resolves sites against the built-in camera table.
#[derive(Debug, Default)]
pub struct DemoLoader;

#[async_trait]
impl StreamLoader for DemoLoader {
    async fn resolve(&self, id: &SiteId) -> Result<StreamInfo, LoadError> {
        match camera_for(id) {
            Some(cam) => Ok(camera_stream(cam)),
            None => {
                tracing::debug!(site_id = %id, "no camera mapped, using placeholder stream");
                Ok(StreamInfo::titled(format!("Stream {id}")))
            }
        }
    }
}
