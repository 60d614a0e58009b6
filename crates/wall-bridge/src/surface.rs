//! Browsing-surface abstractions the bridge is written against.

use std::sync::Arc;

use tokio::sync::broadcast;
use wall_common::{BridgeError, SurfaceId};

use crate::channel::BroadcastChannel;
use crate::envelope::WindowMessage;

/// Callback run once when a surface is about to be destroyed.
pub type UnloadHook = Box<dyn FnOnce() + Send + 'static>;

/// A reference to another browsing surface, as held by the one that
/// opened it. Any call may fail once the surface is closed or has
/// navigated somewhere its holder cannot inspect.
pub trait Surface: Send + Sync {
    fn id(&self) -> &SurfaceId;
    fn is_closed(&self) -> bool;
    fn focus(&self) -> Result<(), BridgeError>;
    /// Current URL. Fails when the surface is no longer same-origin.
    fn location(&self) -> Result<String, BridgeError>;
    fn navigate(&self, url: &str) -> Result<(), BridgeError>;
    /// Deliver a message. Fails with `DeliveryFailed` when `target_origin`
    /// is neither `"*"` nor the surface's current origin.
    fn post_message(&self, message: WindowMessage, target_origin: &str) -> Result<(), BridgeError>;
    fn close(&self) -> Result<(), BridgeError>;
}

/// The browsing surface a bridge lives in.
pub trait SurfaceHost: Send + Sync {
    fn origin(&self) -> String;
    /// Open (or, for an existing window of that name, retarget) a
    /// surface. `name` is the stable window identifier.
    fn open(&self, url: &str, name: &str, features: &str) -> Result<Arc<dyn Surface>, BridgeError>;
    /// Direct messages addressed to this surface.
    fn messages(&self) -> broadcast::Receiver<WindowMessage>;
    /// Join the named same-origin broadcast channel.
    fn broadcast_channel(&self, name: &str) -> BroadcastChannel;
    fn on_unload(&self, hook: UnloadHook);
}
