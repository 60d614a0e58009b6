//! In-process browsing surfaces.
//!
//! `Desktop` plays the role of the browser: it owns every window, reuses
//! windows by name the way `window.open` does, and keeps one channel hub
//! per origin. Handles given to an opener go through a proxy that refuses
//! to read the location of a window that has left the opener's origin.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::broadcast;
use tracing::{debug, info};
use wall_common::{BridgeError, SurfaceId};

use crate::channel::{BroadcastChannel, ChannelHub};
use crate::envelope::WindowMessage;
use crate::origin::origin_of;
use crate::surface::{Surface, SurfaceHost, UnloadHook};

const INBOX_CAPACITY: usize = 64;

/// Origin string used for URLs without a tuple origin.
const OPAQUE_ORIGIN: &str = "null";

#[derive(Default)]
struct DesktopInner {
    windows: Mutex<Vec<Arc<LocalWindow>>>,
    hubs: Mutex<HashMap<String, ChannelHub>>,
    popups_blocked: AtomicBool,
}

impl DesktopInner {
    fn hub(&self, origin: &str) -> ChannelHub {
        let mut hubs = self.hubs.lock().unwrap_or_else(PoisonError::into_inner);
        hubs.entry(origin.to_string()).or_default().clone()
    }

    fn open_named(
        self: &Arc<Self>,
        url: &str,
        name: &str,
        features: &str,
    ) -> Result<Arc<LocalWindow>, BridgeError> {
        if let Some(existing) = self.find_open(name) {
            debug!(window = name, url, "window.open retargets existing window");
            existing.load(url);
            return Ok(existing);
        }
        if self.popups_blocked.load(Ordering::SeqCst) {
            return Err(BridgeError::OpenBlocked(format!("popup '{name}' blocked")));
        }
        Ok(self.create_window(url, Some(name), features))
    }

    fn create_window(
        self: &Arc<Self>,
        url: &str,
        name: Option<&str>,
        features: &str,
    ) -> Arc<LocalWindow> {
        let (inbox, _) = broadcast::channel(INBOX_CAPACITY);
        let window = Arc::new(LocalWindow {
            id: SurfaceId::new(),
            name: name.map(String::from),
            features: features.to_string(),
            location: Mutex::new(url.to_string()),
            closed: AtomicBool::new(false),
            focus_count: AtomicUsize::new(0),
            navigation_count: AtomicUsize::new(0),
            inbox,
            unload_hooks: Mutex::new(Vec::new()),
            desktop: Arc::downgrade(self),
        });
        info!(surface = %window.id, window = ?name, url, "window opened");
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&window));
        window
    }

    fn find_open(&self, name: &str) -> Option<Arc<LocalWindow>> {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|w| w.name.as_deref() == Some(name) && !w.is_closed())
            .cloned()
    }
}

/// The in-process browser: window registry plus per-origin channel hubs.
#[derive(Clone, Default)]
pub struct Desktop {
    inner: Arc<DesktopInner>,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a top-level, unnamed window (the primary surface).
    pub fn launch(&self, url: &str) -> Arc<LocalWindow> {
        self.inner.create_window(url, None, "")
    }

    /// Look up an open window by its name.
    pub fn window_named(&self, name: &str) -> Option<Arc<LocalWindow>> {
        self.inner.find_open(name)
    }

    /// Windows ever created, closed ones included.
    pub fn windows_created(&self) -> usize {
        self.inner
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn open_windows(&self) -> usize {
        self.inner
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| !w.is_closed())
            .count()
    }

    /// Make new named windows fail to open, like a popup blocker.
    pub fn set_popups_blocked(&self, blocked: bool) {
        self.inner.popups_blocked.store(blocked, Ordering::SeqCst);
    }
}

/// One window. Acts as a [`SurfaceHost`] for code running inside it and as
/// the target behind the [`Surface`] handles its opener holds.
pub struct LocalWindow {
    id: SurfaceId,
    name: Option<String>,
    features: String,
    location: Mutex<String>,
    closed: AtomicBool,
    focus_count: AtomicUsize,
    navigation_count: AtomicUsize,
    inbox: broadcast::Sender<WindowMessage>,
    unload_hooks: Mutex<Vec<UnloadHook>>,
    desktop: Weak<DesktopInner>,
}

impl LocalWindow {
    pub fn id(&self) -> &SurfaceId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn features(&self) -> &str {
        &self.features
    }

    pub fn url(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_origin(&self) -> String {
        origin_of(&self.url()).unwrap_or_else(|| OPAQUE_ORIGIN.to_string())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }

    pub fn navigation_count(&self) -> usize {
        self.navigation_count.load(Ordering::SeqCst)
    }

    /// Close as the user would: run unload hooks, then mark closed.
    pub fn close_by_user(&self) {
        self.unload();
    }

    /// Fire unload hooks once each and mark the window closed.
    pub fn unload(&self) {
        let hooks: Vec<UnloadHook> = std::mem::take(
            &mut *self
                .unload_hooks
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        debug!(surface = %self.id, hooks = hooks.len(), "window unloading");
        for hook in hooks {
            hook();
        }
        self.closed.store(true, Ordering::SeqCst);
    }

    fn load(&self, url: &str) {
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = url.to_string();
        self.navigation_count.fetch_add(1, Ordering::SeqCst);
    }

    fn handle_for(self: &Arc<Self>, opener_origin: String) -> Arc<dyn Surface> {
        Arc::new(WindowProxy {
            window: Arc::clone(self),
            opener_origin,
        })
    }
}

impl SurfaceHost for LocalWindow {
    fn origin(&self) -> String {
        self.current_origin()
    }

    fn open(&self, url: &str, name: &str, features: &str) -> Result<Arc<dyn Surface>, BridgeError> {
        let desktop = self
            .desktop
            .upgrade()
            .ok_or_else(|| BridgeError::OpenBlocked("desktop is gone".into()))?;
        let window = desktop.open_named(url, name, features)?;
        Ok(window.handle_for(self.current_origin()))
    }

    fn messages(&self) -> broadcast::Receiver<WindowMessage> {
        self.inbox.subscribe()
    }

    fn broadcast_channel(&self, name: &str) -> BroadcastChannel {
        match self.desktop.upgrade() {
            Some(desktop) => desktop.hub(&self.current_origin()).open(name),
            // Detached window: a private hub nobody else can reach.
            None => ChannelHub::new().open(name),
        }
    }

    fn on_unload(&self, hook: UnloadHook) {
        self.unload_hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }
}

/// What an opener holds: access to the location is limited to the
/// opener's own origin.
struct WindowProxy {
    window: Arc<LocalWindow>,
    opener_origin: String,
}

impl WindowProxy {
    fn ensure_open(&self) -> Result<(), BridgeError> {
        if self.window.is_closed() {
            Err(BridgeError::SurfaceClosed(self.window.id.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Surface for WindowProxy {
    fn id(&self) -> &SurfaceId {
        &self.window.id
    }

    fn is_closed(&self) -> bool {
        self.window.is_closed()
    }

    fn focus(&self) -> Result<(), BridgeError> {
        self.ensure_open()?;
        self.window.focus_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> Result<String, BridgeError> {
        self.ensure_open()?;
        let origin = self.window.current_origin();
        if origin != self.opener_origin {
            return Err(BridgeError::SurfaceInaccessible(format!(
                "location of {origin} is not readable from {}",
                self.opener_origin
            )));
        }
        Ok(self.window.url())
    }

    fn navigate(&self, url: &str) -> Result<(), BridgeError> {
        self.ensure_open()?;
        self.window.load(url);
        Ok(())
    }

    fn post_message(&self, message: WindowMessage, target_origin: &str) -> Result<(), BridgeError> {
        self.ensure_open()?;
        let origin = self.window.current_origin();
        if target_origin != "*" && target_origin != origin {
            debug!(target_origin, origin = %origin, "message dropped: target origin mismatch");
            return Err(BridgeError::DeliveryFailed(format!(
                "target origin {target_origin} does not match {origin}"
            )));
        }
        // No listener yet is not a failure; the message is simply lost.
        let _ = self.window.inbox.send(message);
        Ok(())
    }

    fn close(&self) -> Result<(), BridgeError> {
        if !self.window.is_closed() {
            self.window.unload();
        }
        Ok(())
    }
}
