use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures raised by secondary surfaces and broadcast channels.
///
/// These never cross the bridge's public API: the bridge logs them and
/// falls back (reopen, rely on the other delivery path).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("surface closed: {0}")]
    SurfaceClosed(String),

    #[error("surface inaccessible: {0}")]
    SurfaceInaccessible(String),

    #[error("window open blocked: {0}")]
    OpenBlocked(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),
}

/// A stream loader could not resolve a site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("stream not found for site {0}")]
    NotFound(String),

    #[error("stream resolution failed for site {site}: {reason}")]
    Failed { site: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WallError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
