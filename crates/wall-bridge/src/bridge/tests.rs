//! Bridge behavior against in-process surfaces.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use wall_display::{DisplaySnapshot, LayoutMode, Site, Wall};

use super::*;
use crate::envelope::{Envelope, WindowMessage};
use crate::local::{Desktop, LocalWindow};
use crate::surface::Surface;

const PRIMARY: &str = "http://localhost:5173/";
const MONITOR: &str = "http://localhost:5173/monitor";

fn snapshot(mode: LayoutMode, sites: &[&str]) -> DisplaySnapshot {
    let mut wall = Wall::with_mode(mode);
    for id in sites {
        wall.toggle(Site::new(*id, format!("Site {id}")));
    }
    wall.snapshot()
}

fn primary_bridge(desktop: &Desktop) -> (Arc<LocalWindow>, MonitorBridge) {
    let window = desktop.launch(PRIMARY);
    let bridge = MonitorBridge::new(window.clone(), BridgeSettings::default());
    (window, bridge)
}

/// A mirror bridge running inside the monitor window, with received
/// snapshots forwarded to a channel.
fn attach_mirror(
    desktop: &Desktop,
) -> (
    MonitorBridge,
    Subscription,
    mpsc::UnboundedReceiver<DisplaySnapshot>,
) {
    let window = desktop
        .window_named("MonitorWindow")
        .expect("monitor window open");
    let bridge = MonitorBridge::new(window, BridgeSettings::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let sub = bridge.listen(move |snap| {
        let _ = tx.send(snap);
    });
    (bridge, sub, rx)
}

async fn next(rx: &mut mpsc::UnboundedReceiver<DisplaySnapshot>) -> Option<DisplaySnapshot> {
    timeout(Duration::from_secs(1), rx.recv()).await.ok().flatten()
}

/// No snapshot within `ms`. A channel closed because the callback was
/// dropped counts as nothing delivered.
async fn nothing_within(rx: &mut mpsc::UnboundedReceiver<DisplaySnapshot>, ms: u64) -> bool {
    matches!(
        timeout(Duration::from_millis(ms), rx.recv()).await,
        Err(_) | Ok(None)
    )
}

// -- Open / reuse --

#[test]
fn starts_absent() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    assert_eq!(bridge.surface_state(), SurfaceState::Absent);
    assert!(bridge.surface_id().is_none());
}

#[test]
fn reopening_same_url_reuses_and_focuses() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);

    let first = bridge.open_or_reuse(MONITOR).unwrap();
    let second = bridge.open_or_reuse(MONITOR).unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(desktop.windows_created(), 2);
    let monitor = desktop.window_named("MonitorWindow").unwrap();
    assert_eq!(monitor.focus_count(), 1);
    assert_eq!(monitor.navigation_count(), 0);
    assert_eq!(monitor.features(), "width=1280,height=800");
    assert_eq!(bridge.surface_state(), SurfaceState::Open);
}

#[test]
fn reuse_navigates_only_when_url_differs() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);
    bridge.open_or_reuse("http://localhost:5173/monitor?layout=grid");

    let monitor = desktop.window_named("MonitorWindow").unwrap();
    assert_eq!(monitor.navigation_count(), 1);
    assert_eq!(monitor.url(), "http://localhost:5173/monitor?layout=grid");
    assert_eq!(desktop.windows_created(), 2);
}

#[test]
fn user_closed_surface_is_reopened() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    let first = bridge.open_or_reuse(MONITOR).unwrap();
    desktop.window_named("MonitorWindow").unwrap().close_by_user();

    assert_eq!(bridge.surface_state(), SurfaceState::Absent);
    let second = bridge.open_or_reuse(MONITOR).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(desktop.windows_created(), 3);
}

#[test]
fn cross_origin_surface_falls_back_to_fresh_open() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    let first = bridge.open_or_reuse(MONITOR).unwrap();
    first.navigate("https://elsewhere.example.com/").unwrap();

    // Location is unreadable, so the bridge opens by name, which retargets
    // the same OS-level window instead of spawning another.
    let second = bridge.open_or_reuse(MONITOR).unwrap();
    assert_eq!(first.id(), second.id());
    assert_eq!(desktop.windows_created(), 2);
    assert_eq!(desktop.window_named("MonitorWindow").unwrap().url(), MONITOR);
}

#[test]
fn released_bridge_does_not_reopen() {
    let desktop = Desktop::new();
    let (primary, bridge) = primary_bridge(&desktop);
    bridge.close_on_unload();
    bridge.open_or_reuse(MONITOR);
    primary.unload();

    assert!(bridge.open_or_reuse(MONITOR).is_none());
    assert_eq!(bridge.surface_state(), SurfaceState::Absent);
    assert_eq!(desktop.windows_created(), 2);
    assert_eq!(desktop.open_windows(), 0);
}

#[test]
fn blocked_open_leaves_reference_absent() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    desktop.set_popups_blocked(true);
    assert!(bridge.open_or_reuse(MONITOR).is_none());
    assert_eq!(bridge.surface_state(), SurfaceState::Absent);
}

// -- Delivery --

#[tokio::test]
async fn update_reaches_mirror() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);
    let (_mirror, _sub, mut rx) = attach_mirror(&desktop);

    let snap = snapshot(LayoutMode::Grid, &["a1", "a2"]);
    let delivery = bridge.post_update(snap.clone());
    assert!(delivery.direct);
    assert!(delivery.broadcast);

    // Both paths deliver; both copies are the same snapshot.
    assert_eq!(next(&mut rx).await, Some(snap.clone()));
    assert_eq!(next(&mut rx).await, Some(snap));
}

#[tokio::test]
async fn broadcast_path_works_without_surface_reference() {
    let desktop = Desktop::new();
    let (primary, bridge) = primary_bridge(&desktop);

    // A mirror opened some other way (e.g. by hand in another tab).
    let stray = desktop.launch(MONITOR);
    let mirror = MonitorBridge::new(stray, BridgeSettings::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sub = mirror.listen(move |snap| {
        let _ = tx.send(snap);
    });

    let snap = snapshot(LayoutMode::Single, &["a5"]);
    let delivery = bridge.post_update(snap.clone());
    assert!(!delivery.direct);
    assert!(delivery.broadcast);
    assert_eq!(next(&mut rx).await, Some(snap));
    assert!(!primary.is_closed());
}

#[tokio::test]
async fn post_update_keeps_latest() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    assert!(bridge.latest().is_none());
    bridge.post_update(snapshot(LayoutMode::Quad, &["a1"]));
    let latest = snapshot(LayoutMode::Grid, &["a1", "a2"]);
    bridge.post_update(latest.clone());
    assert_eq!(bridge.latest(), Some(latest));
}

#[tokio::test]
async fn late_listener_recovers_latest_on_request() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.answer_requests();
    bridge.open_or_reuse(MONITOR);

    let snap_x = snapshot(LayoutMode::Triple, &["a1", "a2", "a3"]);
    bridge.post_update(snap_x.clone());

    // Attaches after the update was sent, as after a reload.
    let (mirror, _sub, mut rx) = attach_mirror(&desktop);
    assert!(mirror.request_latest());

    assert_eq!(next(&mut rx).await, Some(snap_x));
}

#[tokio::test]
async fn request_before_any_update_is_ignored() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.answer_requests();
    bridge.open_or_reuse(MONITOR);

    let (mirror, _sub, mut rx) = attach_mirror(&desktop);
    mirror.request_latest();
    assert!(nothing_within(&mut rx, 50).await);
}

#[tokio::test]
async fn foreign_origin_direct_messages_are_discarded() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    let handle = bridge.open_or_reuse(MONITOR).unwrap();
    let (_mirror, _sub, mut rx) = attach_mirror(&desktop);

    let body = Envelope::Update(snapshot(LayoutMode::Grid, &["evil"]))
        .to_json()
        .unwrap();
    // Claims a foreign origin but targets the monitor's origin.
    handle
        .post_message(
            WindowMessage::new("https://evil.example.com", body),
            "http://localhost:5173",
        )
        .unwrap();

    assert!(nothing_within(&mut rx, 50).await);
}

#[tokio::test]
async fn malformed_direct_messages_are_dropped() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    let handle = bridge.open_or_reuse(MONITOR).unwrap();
    let (_mirror, _sub, mut rx) = attach_mirror(&desktop);

    handle
        .post_message(
            WindowMessage::new("http://localhost:5173", "{\"type\":\"bogus\"}"),
            "http://localhost:5173",
        )
        .unwrap();
    assert!(nothing_within(&mut rx, 50).await);

    // The subscription survives and still delivers real updates.
    let snap = snapshot(LayoutMode::Single, &["a1"]);
    bridge.post_update(snap.clone());
    assert_eq!(next(&mut rx).await, Some(snap));
}

#[tokio::test]
async fn disposed_subscription_stops_callbacks() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);
    let (_mirror, sub, mut rx) = attach_mirror(&desktop);

    sub.dispose();
    bridge.post_update(snapshot(LayoutMode::Grid, &["a1"]));
    assert!(nothing_within(&mut rx, 50).await);
}

#[tokio::test]
async fn delivery_failure_on_closed_surface_is_swallowed() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);
    desktop.window_named("MonitorWindow").unwrap().close_by_user();

    let delivery = bridge.post_update(snapshot(LayoutMode::Grid, &["a1"]));
    assert!(!delivery.direct);
    assert!(delivery.broadcast);
}

#[test]
fn direct_path_fails_once_mirror_leaves_origin() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    let handle = bridge.open_or_reuse(MONITOR).unwrap();
    handle.navigate("https://elsewhere.example.com/").unwrap();

    let delivery = bridge.post_update(snapshot(LayoutMode::Grid, &["a1"]));
    assert!(!delivery.direct);
    assert!(delivery.broadcast);
}

// -- Without a runtime --

#[test]
fn answer_requests_outside_runtime_is_refused() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    assert!(!bridge.answer_requests());
    // Everything synchronous keeps working.
    bridge.open_or_reuse(MONITOR);
    assert!(bridge.post_update(snapshot(LayoutMode::Single, &["a1"])).any());
}

#[test]
fn listen_outside_runtime_returns_inert_subscription() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);
    let window = desktop.window_named("MonitorWindow").unwrap();
    let mirror = MonitorBridge::new(window, BridgeSettings::default());

    let sub = mirror.listen(|_| {});
    assert!(mirror.request_latest());
    sub.dispose();
}

// -- Unload --

#[tokio::test]
async fn primary_unload_closes_mirror_and_channel() {
    let desktop = Desktop::new();
    let (primary, bridge) = primary_bridge(&desktop);
    bridge.close_on_unload();
    bridge.close_on_unload();
    bridge.answer_requests();
    bridge.open_or_reuse(MONITOR);
    let monitor = desktop.window_named("MonitorWindow").unwrap();

    primary.unload();

    assert!(monitor.is_closed());
    assert!(bridge.is_released());
    assert_eq!(bridge.surface_state(), SurfaceState::Absent);
    let delivery = bridge.post_update(snapshot(LayoutMode::Grid, &["a1"]));
    assert!(!delivery.any());
    assert!(!bridge.request_latest());
}

#[test]
fn unload_without_mirror_is_harmless() {
    let desktop = Desktop::new();
    let (primary, bridge) = primary_bridge(&desktop);
    bridge.close_on_unload();
    primary.unload();
    assert!(bridge.is_released());
}

#[tokio::test]
async fn callbacks_see_whole_snapshots() {
    let desktop = Desktop::new();
    let (_, bridge) = primary_bridge(&desktop);
    bridge.open_or_reuse(MONITOR);

    let window = desktop.window_named("MonitorWindow").unwrap();
    let mirror = MonitorBridge::new(window, BridgeSettings::default());
    let state = Arc::new(Mutex::new(wall_display::Mirror::new()));
    let sink = Arc::clone(&state);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sub = mirror.listen(move |snap| {
        sink.lock().unwrap().apply(snap.clone());
        let _ = tx.send(snap);
    });

    // Each update arrives twice, once per path.
    bridge.post_update(snapshot(LayoutMode::Grid, &["a1", "a2", "a3"]));
    for _ in 0..2 {
        next(&mut rx).await.unwrap();
    }
    bridge.post_update(snapshot(LayoutMode::Single, &["a2"]));
    for _ in 0..2 {
        next(&mut rx).await.unwrap();
    }

    let mirror_state = state.lock().unwrap();
    let current = mirror_state.current().unwrap();
    assert_eq!(current.mode, LayoutMode::Single);
    assert_eq!(current.visible_tiles().len(), 1);
    assert_eq!(mirror_state.applied_count(), 4);
}
