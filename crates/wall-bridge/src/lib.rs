//! Cross-window bridge between the primary wall and its mirror display.
//!
//! Provides:
//! - One secondary surface per primary (open, reuse, focus, close)
//! - Dual-path delivery of display snapshots (direct message + broadcast)
//! - Resync on demand for mirrors that reload
//! - Same-origin filtering of direct messages
//! - An in-process surface implementation for tests and headless runs

pub mod bridge;
pub mod channel;
pub mod envelope;
pub mod local;
pub mod origin;
pub mod surface;

pub use bridge::{BridgeSettings, Delivery, MonitorBridge, SurfaceState, Subscription};
pub use channel::{BroadcastChannel, ChannelHub, ChannelReceiver};
pub use envelope::{Envelope, WindowMessage};
pub use local::{Desktop, LocalWindow};
pub use origin::{origin_of, OriginAllowList};
pub use surface::{Surface, SurfaceHost, UnloadHook};
