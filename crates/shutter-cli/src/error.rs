//! CLI error types and miette conversion.
//!
//! Commands return `CliError`; `main` converts the final error into a miette
//! report so resolution failures carry their hints into the terminal output.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] shutter_config::ConfigError),

    #[error("build error: {0}")]
    Build(#[from] shutter_pipeline::Error),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a CLI error into a miette report for terminal display.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(shutter_pipeline::Error::Resolution {
            specifier,
            importer,
            hint,
        }) => miette::miette!(
            "Failed to resolve import: {}\nImported from: {}\n\nHint: {}",
            specifier,
            importer.display(),
            hint
        ),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}
