//! Config file resolution, loading and first-run template creation.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wall_common::ConfigError;

use crate::schema::WallConfig;
use crate::validation;

use super::template::default_config_toml;

/// `<config dir>/wall/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("wall").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("no config directory on this platform".into()))
}

/// Write the commented template to `path` unless a file is already there.
///
/// Returns `true` if the template was written. An existing file is left
/// untouched, so a second process starting at the same time cannot
/// clobber a config the first one just created or the user just edited.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    let io_err = |what: &str, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err("cannot create directory for", e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "config already present, template not written");
            return Ok(false);
        }
        Err(e) => return Err(io_err("cannot create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_err("cannot write template to", e))?;

    info!(path = %path.display(), "created default config");
    Ok(true)
}

/// Load config from a specific TOML file.
///
/// Missing fields take their defaults. If the parsed config fails
/// validation, a warning is logged and the defaults are returned instead.
pub fn load_from_path(path: &Path) -> Result<WallConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: WallConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "{e}; falling back to default config");
        return Ok(WallConfig::default());
    }

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from the platform default path.
///
/// On Linux: `~/.config/wall/config.toml`
/// On macOS: `~/Library/Application Support/wall/config.toml`
///
/// If the file does not exist, a commented default is written and the
/// defaults are returned.
pub fn load_default() -> Result<WallConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config found, creating default");
            create_default_config(&path)?;
            Ok(WallConfig::default())
        }
        Err(e) => Err(e),
    }
}
