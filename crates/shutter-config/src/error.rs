//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file exists at the expected location.
    #[error("Config file not found: {}\n\nHint: create a shutter.toml or rely on the built-in defaults", .0.display())]
    NotFound(PathBuf),

    /// Config file has invalid TOML syntax.
    #[error("Invalid TOML in config file: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// A field holds a value the pipeline cannot use.
    #[error("Invalid value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue {
        field: String,
        hint: Option<String>,
    },

    /// I/O failure while reading the config file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!("\n\nHint: {h}"),
        None => String::new(),
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
