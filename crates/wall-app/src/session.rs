//! Primary and secondary surface drivers.
//!
//! `Session` owns the wall and the primary surface's bridge; `MonitorView`
//! is the mirror running inside the secondary surface.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use wall_bridge::{
    BridgeSettings, Delivery, Desktop, LocalWindow, MonitorBridge, Subscription,
};
use wall_common::{Result, WallError};
use wall_config::{BridgeConfig, WallConfig};
use wall_display::{
    DisplaySnapshot, EnsureReport, Mirror, StateStore, StreamLoader, Wall, WallCommand,
};

pub fn bridge_settings(config: &BridgeConfig) -> BridgeSettings {
    BridgeSettings {
        channel_name: config.channel_name.clone(),
        window_name: config.window_name.clone(),
        window_features: config.window_features.clone(),
    }
}

pub struct Session {
    config: WallConfig,
    desktop: Desktop,
    primary: Arc<LocalWindow>,
    bridge: MonitorBridge,
    wall: Wall,
    loader: Arc<dyn StreamLoader>,
    store: Option<Box<dyn StateStore>>,
}

impl Session {
    /// Launch the primary surface and restore the wall, if a store is
    /// given and holds one.
    pub fn start(
        config: WallConfig,
        loader: Arc<dyn StreamLoader>,
        store: Option<Box<dyn StateStore>>,
    ) -> Result<Self> {
        let primary_url = config
            .bridge
            .primary_url()
            .ok_or_else(|| WallError::Other(format!("invalid origin {}", config.bridge.origin)))?;

        let desktop = Desktop::new();
        let primary = desktop.launch(&primary_url);
        let bridge = MonitorBridge::new(primary.clone(), bridge_settings(&config.bridge));
        bridge.answer_requests();
        bridge.close_on_unload();

        let wall = match store.as_deref() {
            Some(store) => match Wall::restore_from(store, &config.display.state_key) {
                Ok(Some(wall)) => {
                    info!(
                        mode = %wall.mode(),
                        selected = wall.selected_count(),
                        "restored wall state"
                    );
                    wall
                }
                Ok(None) => Wall::with_mode(config.display.default_mode),
                Err(e) => {
                    warn!(error = %e, "could not restore wall state, starting fresh");
                    Wall::with_mode(config.display.default_mode)
                }
            },
            None => Wall::with_mode(config.display.default_mode),
        };

        Ok(Self {
            config,
            desktop,
            primary,
            bridge,
            wall,
            loader,
            store,
        })
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn bridge(&self) -> &MonitorBridge {
        &self.bridge
    }

    pub fn apply(&mut self, cmd: WallCommand) -> bool {
        debug!(?cmd, "applying command");
        self.wall.execute(cmd)
    }

    /// Show the secondary surface. Returns whether one is now held.
    pub fn open_monitor(&self) -> bool {
        match self.config.bridge.monitor_url() {
            Some(url) => self.bridge.open_or_reuse(&url).is_some(),
            None => {
                warn!(origin = %self.config.bridge.origin, "no monitor url for origin");
                false
            }
        }
    }

    /// Fill the stream cache, push the resulting snapshot to the mirror
    /// and save the wall.
    pub async fn publish(&mut self) -> (EnsureReport, Delivery) {
        let report = self.wall.ensure_streams(self.loader.as_ref()).await;
        for (id, e) in &report.failed {
            warn!(site_id = %id, error = %e, "site left unresolved");
        }
        let delivery = self.bridge.post_update(self.wall.snapshot());
        debug!(
            direct = delivery.direct,
            broadcast = delivery.broadcast,
            "snapshot published"
        );
        self.persist();
        (report, delivery)
    }

    pub fn persist(&self) {
        if let Some(store) = self.store.as_deref() {
            if let Err(e) = self.wall.save_to(store, &self.config.display.state_key) {
                warn!(error = %e, "could not save wall state");
            }
        }
    }

    /// Attach a mirror to the secondary surface, if it is open.
    pub fn attach_monitor(&self) -> Option<MonitorView> {
        let window = self.desktop.window_named(&self.config.bridge.window_name)?;
        Some(MonitorView::attach(window, bridge_settings(&self.config.bridge)))
    }

    /// Save, then unload the primary surface. The monitor closes with it.
    pub fn close(self) {
        self.persist();
        self.primary.unload();
        info!(open_windows = self.desktop.open_windows(), "session closed");
    }
}

/// The mirror side: listens for snapshots and renders from them alone.
pub struct MonitorView {
    bridge: MonitorBridge,
    mirror: Arc<Mutex<Mirror>>,
    updates: watch::Receiver<u64>,
    _subscription: Subscription,
}

impl MonitorView {
    pub fn attach(window: Arc<LocalWindow>, settings: BridgeSettings) -> Self {
        let bridge = MonitorBridge::new(window, settings);
        let mirror = Arc::new(Mutex::new(Mirror::new()));
        let (tx, updates) = watch::channel(0u64);

        let sink = Arc::clone(&mirror);
        let subscription = bridge.listen(move |snapshot| {
            if let Ok(mut mirror) = sink.lock() {
                if mirror.apply(snapshot) {
                    debug!("mirror updated");
                }
                tx.send_replace(mirror.applied_count());
            }
        });

        Self {
            bridge,
            mirror,
            updates,
            _subscription: subscription,
        }
    }

    /// Ask the primary for its latest snapshot and wait up to `wait` for
    /// it to arrive.
    pub async fn resync(&mut self, wait: Duration) -> Option<DisplaySnapshot> {
        if !self.bridge.request_latest() {
            return None;
        }
        self.next_update(wait).await
    }

    /// Wait up to `wait` for the next snapshot.
    pub async fn next_update(&mut self, wait: Duration) -> Option<DisplaySnapshot> {
        match tokio::time::timeout(wait, self.updates.changed()).await {
            Ok(Ok(())) => self.current(),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<DisplaySnapshot> {
        self.mirror.lock().ok()?.current().cloned()
    }
}
