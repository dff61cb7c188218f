//! Command implementations.

mod build;
mod dev;

pub use build::execute as build_execute;
pub use dev::execute as dev_execute;

use std::path::{Path, PathBuf};

use shutter_config::{validate, ConfigDiscovery, ShutterConfig};

use crate::error::{CliError, Result};

/// Resolve the project root and load a validated configuration for it.
fn load_config(root: &Path, config_path: Option<&Path>) -> Result<(PathBuf, ShutterConfig)> {
    let root = root
        .canonicalize()
        .map_err(|_| CliError::FileNotFound(root.to_path_buf()))?;

    let discovery = ConfigDiscovery::new(&root);
    let config = match config_path {
        Some(path) => discovery.load_from(path)?,
        None => discovery.load_or_default()?,
    };
    validate(&config)?;
    Ok((root, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_defaults_without_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let (root, config) = load_config(dir.path(), None).unwrap();
        assert!(root.is_absolute());
        assert_eq!(config.output.name, "app");
    }

    #[test]
    fn invalid_config_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("shutter.toml"),
            "[output]\nformat = \"esm\"\n",
        )
        .unwrap();
        assert!(load_config(dir.path(), None).is_err());
    }

    #[test]
    fn missing_root_is_reported() {
        let err = load_config(Path::new("/definitely/not/here"), None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
