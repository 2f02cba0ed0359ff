//! Configuration file discovery, reading and writing.
//!
//! Files are read as JSON5 (plain JSON is a subset) and written back as
//! pretty-printed JSON.
//!
//! # File Locations
//!
//! An explicit path, typically the first command-line argument, always wins.
//! Otherwise the first existing file of this list is used:
//!
//! 1. Local: `./rangecard.json5` or `./rangecard.json`
//! 2. User: `~/.config/rangecard/config.json5` or `~/.config/rangecard/config.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["rangecard.json5", "rangecard.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "rangecard";

/// User config file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file in the working directory or the user
/// config directory.
///
/// # Examples
///
/// ```no_run
/// use rangecard_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR));
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds the configuration file, searching `local_dir` before `user_dir`.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "found config file");
    }
    found
}

/// Returns the config file to load: `explicit` if given, else the result of
/// [`find_config_file`].
#[must_use]
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(find_config_file)
}

/// Returns the user configuration directory, typically `~/.config/rangecard/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a JSON5 or JSON configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes `config` to `path` as pretty-printed JSON, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written, or if the
/// configuration cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}
