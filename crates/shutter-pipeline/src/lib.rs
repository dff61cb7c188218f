//! Plugin pipeline and bundle driver for the Shutter build.
//!
//! The camera front-end is bundled by threading an entry module through an
//! ordered list of stages: component compilation, stylesheet post-processing,
//! module resolution, CommonJS interop, and mode-dependent extras (dev-server
//! launcher and live reload in development, minification in production).
//!
//! The assembler builds that list from the build mode; the driver runs the
//! hooks sequentially for each pass and writes the artifacts atomically.

pub mod assembler;
pub mod bundle;
pub mod bundler;
pub mod error;
pub mod graph;
pub mod plugin;
pub mod plugins;
pub mod render;
pub mod writer;

pub use assembler::{assemble, PipelineBuilder};
pub use bundle::{Bundle, OutputAsset, OutputChunk, WriteBundleArgs};
pub use bundler::{BuildSummary, Bundler};
pub use error::{Error, Result};
pub use plugin::{Plugin, Resolution, SharedPlugin};
