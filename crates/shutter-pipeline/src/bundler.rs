//! Build driver.
//!
//! One `build()` call runs a full pass: collect the module graph, render the
//! chunk, run every stage's `generate_bundle` in pipeline order, write the
//! files, then run every stage's `write_bundle` in pipeline order. The driver
//! holds the stage list across passes, so stage state (the dev-server launch
//! guard, the reload watcher) survives rebuilds in watch mode.

use std::path::PathBuf;
use std::time::Instant;

use shutter_config::ShutterConfig;

use crate::bundle::{Bundle, WriteBundleArgs};
use crate::error::Result;
use crate::plugin::SharedPlugin;
use crate::{graph, render, writer};

/// Outcome of one completed build pass.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Modules bundled into the chunk.
    pub modules: usize,
    /// Files written, relative to the output directory.
    pub files: Vec<String>,
    pub duration_ms: u64,
}

pub struct Bundler {
    config: ShutterConfig,
    project_root: PathBuf,
    plugins: Vec<SharedPlugin>,
}

impl Bundler {
    pub fn new(
        config: ShutterConfig,
        project_root: impl Into<PathBuf>,
        plugins: Vec<SharedPlugin>,
    ) -> Self {
        Self {
            config,
            project_root: project_root.into(),
            plugins,
        }
    }

    pub fn config(&self) -> &ShutterConfig {
        &self.config
    }

    pub fn plugins(&self) -> &[SharedPlugin] {
        &self.plugins
    }

    /// Run one full build pass.
    pub fn build(&self) -> Result<BuildSummary> {
        let started = Instant::now();

        let modules = graph::collect(&self.project_root, &self.config.input, &self.plugins)?;
        let chunk = render::render_iife(&modules, &self.config.output);

        let mut bundle = Bundle {
            chunks: vec![chunk],
            assets: Vec::new(),
        };
        for plugin in &self.plugins {
            plugin.generate_bundle(&mut bundle)?;
            tracing::trace!(plugin = %plugin.name(), "generate_bundle done");
        }

        let output_dir = self.project_root.join(self.config.output_dir());
        let files = writer::write_bundle_to(&bundle, &output_dir)?;

        let args = WriteBundleArgs {
            output_dir,
            files: files.clone(),
        };
        for plugin in &self.plugins {
            plugin.write_bundle(&args)?;
            tracing::trace!(plugin = %plugin.name(), "write_bundle done");
        }

        let summary = BuildSummary {
            modules: modules.len(),
            files,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            modules = summary.modules,
            files = summary.files.len(),
            duration_ms = summary.duration_ms,
            "build pass complete"
        );
        Ok(summary)
    }
}
