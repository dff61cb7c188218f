//! The static configuration record the pipeline reads once per invocation.
//!
//! Field defaults mirror the camera app's checked-in build description: entry
//! at `src/main.js`, one IIFE bundle at `public/camera.js` with the global name
//! `app`, extracted styles at `public/camera.css`, source maps on.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutterConfig {
    /// Entry module the graph walk starts from.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for ShutterConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: OutputConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl ShutterConfig {
    /// Create from a serde_json::Value (for programmatic configuration).
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Directory the bundle artifact is written into.
    ///
    /// Used as the live-reload watch root and as the default watcher ignore in
    /// dev mode, so rebuild output never re-triggers a rebuild.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Output artifact description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination of the rendered script.
    #[serde(default = "default_output_file")]
    pub file: PathBuf,

    /// Destination of the extracted stylesheet.
    #[serde(default = "default_css_file")]
    pub css_file: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// Global name the IIFE assigns its exports to.
    #[serde(default = "default_name")]
    pub name: String,

    /// Emit a debugging map next to the script.
    #[serde(default = "default_true")]
    pub sourcemap: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            css_file: default_css_file(),
            format: OutputFormat::default(),
            name: default_name(),
            sourcemap: true,
        }
    }
}

/// Bundle output format.
///
/// Only `iife` is renderable; the other spellings are accepted by the parser so
/// a config mistake surfaces as a validation error with a hint rather than an
/// unknown-variant serde error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Immediately invoked function expression, for direct `<script>` use.
    #[default]
    Iife,
    /// ECMAScript module (parsed, rejected by validation).
    Esm,
    /// CommonJS (parsed, rejected by validation).
    Cjs,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Iife => write!(f, "iife"),
            Self::Esm => write!(f, "esm"),
            Self::Cjs => write!(f, "cjs"),
        }
    }
}

/// Watch-mode behavior flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Clear the terminal before each rebuild.
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Debounce window for file-change events, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("src/main.js")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("public/camera.js")
}

fn default_css_file() -> PathBuf {
    PathBuf::from("public/camera.css")
}

fn default_name() -> String {
    "app".to_string()
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    100
}
