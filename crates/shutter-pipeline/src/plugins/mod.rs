//! Concrete pipeline stages.

pub mod commonjs;
pub mod component;
pub mod livereload;
pub mod minify;
pub mod resolve;
pub mod serve;
pub mod styles;

pub use commonjs::CommonJsPlugin;
pub use component::{ComponentOptions, ComponentPlugin};
pub use livereload::{LiveReloadPlugin, ReloadEvent};
pub use minify::{MinifyLevel, MinifyPlugin};
pub use resolve::{ResolveOptions, ResolvePlugin};
pub use serve::DevServeLauncher;
pub use styles::{StylesOptions, StylesPlugin};
