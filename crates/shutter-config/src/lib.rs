//! Configuration data model for the Shutter build pipeline.
//!
//! Shutter bundles the camera front-end into one self-executing script plus one
//! extracted stylesheet. This crate owns the static configuration record the
//! pipeline is driven by: entry module, output description, watch behavior, and
//! the build mode that decides which optional stages are assembled.

pub mod config;
pub mod discovery;
pub mod error;
pub mod mode;
pub mod validation;

pub use config::{OutputConfig, OutputFormat, ShutterConfig, WatchConfig};
pub use discovery::ConfigDiscovery;
pub use error::{ConfigError, Result};
pub use mode::BuildMode;
pub use validation::validate;
