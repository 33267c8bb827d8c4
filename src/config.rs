//! User preferences
//!
//! Stored in ~/.config/playlist-along/config.json. Every field is optional in
//! the file; command-line flags take precedence over what is stored here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::generate::SortMode;

/// Persistent defaults for playlist commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inserted before the extension when a conversion would overwrite its source
    pub rename_suffix: String,
    /// Playlists at or below this size are not injected
    pub min_inject_bytes: u64,
    /// Sort order for `create` when no sort flag is given
    pub default_sort: SortMode,
    /// Generate extended playlists without `--ext-m3u`
    pub extended: bool,
    /// Read real track durations for `#EXTINF` lines
    pub read_durations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rename_suffix: "_vlc".to_string(),
            min_inject_bytes: 4,
            default_sort: SortMode::Default,
            extended: false,
            read_durations: true,
        }
    }
}

impl Config {
    /// Load the config from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => {
                    debug!("No config directory on this platform, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!("No config found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("playlist-along").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().expect("create temp dir");
        let config = Config::load(Some(&dir.path().join("config.json"))).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.rename_suffix, "_vlc");
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_sort": "natural", "rename_suffix": "_copy"}"#)
            .expect("write config");

        let config = Config::load(Some(&path)).expect("load");
        assert_eq!(config.default_sort, SortMode::Natural);
        assert_eq!(config.rename_suffix, "_copy");
        assert_eq!(config.min_inject_bytes, 4);
        assert!(config.read_durations);
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").expect("write config");
        assert!(Config::load(Some(&path)).is_err());
    }
}
