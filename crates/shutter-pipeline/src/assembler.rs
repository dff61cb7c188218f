//! Pipeline assembly.
//!
//! Builds the ordered stage list from the build mode. Mode-gated stages
//! occupy a disabled slot when their condition is false; `build()` strips
//! those slots so the driver only ever sees active stages. Assembly is pure
//! construction, there is nothing fallible here.

use std::path::Path;
use std::sync::Arc;

use shutter_config::{BuildMode, ShutterConfig};

use crate::plugin::SharedPlugin;
use crate::plugins::{
    CommonJsPlugin, ComponentOptions, ComponentPlugin, DevServeLauncher, LiveReloadPlugin,
    MinifyLevel, MinifyPlugin, ResolveOptions, ResolvePlugin, StylesOptions, StylesPlugin,
};

/// Ordered stage list under construction. Order is significant: later stages
/// see the output of earlier ones.
#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<Option<SharedPlugin>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, plugin: SharedPlugin) -> Self {
        self.stages.push(Some(plugin));
        self
    }

    /// Append a stage only when `enabled`; a disabled slot is recorded and
    /// stripped at `build()`.
    pub fn add_if(mut self, enabled: bool, make: impl FnOnce() -> SharedPlugin) -> Self {
        self.stages.push(enabled.then(make));
        self
    }

    /// Slots recorded so far, disabled ones included.
    pub fn slot_count(&self) -> usize {
        self.stages.len()
    }

    /// Final stage sequence with disabled slots stripped.
    pub fn build(self) -> Vec<SharedPlugin> {
        self.stages.into_iter().flatten().collect()
    }
}

/// Assemble the camera build pipeline for one mode.
///
/// Always: component compiler (dev flag follows the mode, styles extracted to
/// the configured stylesheet), stylesheet post-processing, browser-targeted
/// resolution with framework dedupe, CommonJS interop. Development adds the
/// dev-server launcher and the live-reload notifier; production adds the
/// minifier.
pub fn assemble(mode: BuildMode, config: &ShutterConfig, project_root: &Path) -> Vec<SharedPlugin> {
    let production = mode.is_production();
    let output_dir = project_root.join(config.output_dir());

    let pipeline = PipelineBuilder::new()
        .add(Arc::new(ComponentPlugin::new(ComponentOptions {
            dev: !production,
            css_filename: css_filename(config),
        })))
        .add(Arc::new(StylesPlugin::new(StylesOptions {
            minify: production,
        })))
        .add(Arc::new(ResolvePlugin::new(
            project_root,
            ResolveOptions::default(),
        )))
        .add(Arc::new(CommonJsPlugin::new()))
        .add_if(!production, || {
            Arc::new(DevServeLauncher::new()) as SharedPlugin
        })
        .add_if(!production, move || {
            Arc::new(LiveReloadPlugin::new(output_dir)) as SharedPlugin
        })
        .add_if(production, || {
            Arc::new(MinifyPlugin::new(MinifyLevel::Whitespace)) as SharedPlugin
        })
        .build();

    tracing::debug!(%mode, stages = pipeline.len(), "pipeline assembled");
    pipeline
}

/// Stylesheet file name relative to the output directory.
fn css_filename(config: &ShutterConfig) -> String {
    let output_dir = config.output_dir();
    config
        .output
        .css_file
        .strip_prefix(&output_dir)
        .unwrap_or(&config.output.css_file)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn names(plugins: &[SharedPlugin]) -> Vec<String> {
        plugins.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn development_assembly() {
        let config = ShutterConfig::default();
        let plugins = assemble(BuildMode::Development, &config, Path::new("/project"));
        let names = names(&plugins);

        assert_eq!(
            names,
            vec![
                "shutter-component",
                "shutter-styles",
                "shutter-resolve",
                "shutter-commonjs",
                "shutter-serve",
                "shutter-livereload",
            ]
        );
        assert_eq!(names.iter().filter(|n| *n == "shutter-serve").count(), 1);
        assert_eq!(
            names.iter().filter(|n| *n == "shutter-livereload").count(),
            1
        );
        assert!(!names.contains(&"shutter-minify".to_string()));
    }

    #[test]
    fn production_assembly() {
        let config = ShutterConfig::default();
        let plugins = assemble(BuildMode::Production, &config, Path::new("/project"));
        let names = names(&plugins);

        assert_eq!(
            names,
            vec![
                "shutter-component",
                "shutter-styles",
                "shutter-resolve",
                "shutter-commonjs",
                "shutter-minify",
            ]
        );
        assert_eq!(names.iter().filter(|n| *n == "shutter-minify").count(), 1);
        assert!(!names.contains(&"shutter-serve".to_string()));
        assert!(!names.contains(&"shutter-livereload".to_string()));
    }

    #[test]
    fn disabled_slots_never_reach_the_driver() {
        // Both modes record seven slots; the built sequence only ever holds
        // active stages.
        for mode in [BuildMode::Development, BuildMode::Production] {
            let plugins = assemble(mode, &ShutterConfig::default(), Path::new("/project"));
            assert!(plugins.len() < 7);
            for plugin in &plugins {
                assert!(!plugin.name().is_empty());
            }
        }
    }

    #[test]
    fn builder_counts_disabled_slots() {
        let builder = PipelineBuilder::new()
            .add(Arc::new(CommonJsPlugin::new()))
            .add_if(false, || Arc::new(CommonJsPlugin::new()) as SharedPlugin);
        assert_eq!(builder.slot_count(), 2);
        assert_eq!(builder.build().len(), 1);
    }

    #[test]
    fn css_filename_is_relative_to_output_dir() {
        let config = ShutterConfig::default();
        assert_eq!(css_filename(&config), "camera.css");

        let mut config = ShutterConfig::default();
        config.output.css_file = PathBuf::from("styles/extra.css");
        assert_eq!(css_filename(&config), "styles/extra.css");
    }
}
