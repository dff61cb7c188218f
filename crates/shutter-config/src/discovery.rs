//! File-based config discovery.
//!
//! Finds and loads `shutter.toml` from a project root. Absent files are not an
//! error: the camera app's build is fully described by the defaults, and the
//! checked-in config only overrides what differs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ShutterConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "shutter.toml";

/// Locates and loads the project configuration.
///
/// # Example
///
/// ```no_run
/// use shutter_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load_or_default().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the config file if one exists in the root.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Load the discovered config, or the defaults when no file exists.
    pub fn load_or_default(&self) -> Result<ShutterConfig> {
        match self.find() {
            Some(path) => self.load_from(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no shutter.toml, using defaults");
                Ok(ShutterConfig::default())
            }
        }
    }

    /// Load the discovered config, erroring when no file exists.
    pub fn load(&self) -> Result<ShutterConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.join(CONFIG_FILE_NAME)))?;
        self.load_from(&path)
    }

    /// Load config from a specific file path.
    pub fn load_from(&self, path: &Path) -> Result<ShutterConfig> {
        let content = fs::read_to_string(path)?;
        let config: ShutterConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());

        assert!(discovery.find().is_none());
        let config = discovery.load_or_default().unwrap();
        assert_eq!(config.output.name, "app");
    }

    #[test]
    fn missing_file_is_an_error_for_strict_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
