pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError, LoadError, StoreError, WallError};
pub use id::{new_id, new_short_id, SurfaceId};
pub use types::Rect;

pub type Result<T> = std::result::Result<T, WallError>;
