//! Display state machine for the site wall.
//!
//! Owns which sites are selected, the active layout mode, and a per-site
//! cache of resolved stream metadata. Everything a view renders (tiles,
//! placeholders, column count) is derived on demand from that state.

pub mod commands;
pub mod layout;
pub mod mode;
pub mod site;
pub mod snapshot;
pub mod store;
pub mod stream;
pub mod tile;
pub mod wall;

pub use commands::WallCommand;
pub use layout::GridLayout;
pub use mode::{LayoutMode, MAX_SELECTION};
pub use site::{Site, SiteId};
pub use snapshot::{DisplaySnapshot, Mirror};
pub use store::{FileStore, MemoryStore, StateStore};
pub use stream::{HlsLadder, HlsSource, StreamInfo, StreamLoader, WebRtcSession};
pub use tile::Tile;
pub use wall::{EnsureReport, Wall};
