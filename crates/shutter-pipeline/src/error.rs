//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Module resolution failed.
    #[error("Failed to resolve module: {specifier}\n\nImported from: {}\n\nHint: {hint}", .importer.display())]
    Resolution {
        /// The specifier that could not be resolved
        specifier: String,
        /// The module that imported it
        importer: PathBuf,
        hint: String,
    },

    /// Stylesheet parsing or printing failed.
    #[error("CSS error: {0}")]
    Css(String),

    /// Output could not be written.
    #[error("Failed to write bundle: {0}")]
    WriteFailure(String),

    /// A stage received configuration it cannot use.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dev-server child process could not be spawned.
    #[error("Failed to spawn '{command}': {source}\n\nHint: make sure the command is installed and on PATH")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Live-reload file watching failed.
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O failure while reading sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
