//! Output data model shared by stages and the writer.

use std::path::PathBuf;

/// A rendered script chunk.
#[derive(Debug, Clone)]
pub struct OutputChunk {
    /// File name relative to the output directory.
    pub filename: String,
    pub code: String,
    /// Serialized source map, written as `<filename>.map` when present.
    pub map: Option<String>,
}

/// A non-chunk artifact emitted by a stage (extracted stylesheet, etc).
#[derive(Debug, Clone)]
pub struct OutputAsset {
    /// File name relative to the output directory.
    pub filename: String,
    pub source: String,
}

/// Everything one build pass is about to write.
///
/// `generate_bundle` hooks may rewrite chunks and add or replace assets before
/// the writer runs.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    pub chunks: Vec<OutputChunk>,
    pub assets: Vec<OutputAsset>,
}

impl Bundle {
    /// Add an asset, replacing any existing one with the same filename.
    pub fn emit_asset(&mut self, asset: OutputAsset) {
        if let Some(existing) = self.assets.iter_mut().find(|a| a.filename == asset.filename) {
            *existing = asset;
        } else {
            self.assets.push(asset);
        }
    }

    /// Total number of files the writer will produce, maps included.
    pub fn file_count(&self) -> usize {
        let maps = self.chunks.iter().filter(|c| c.map.is_some()).count();
        self.chunks.len() + maps + self.assets.len()
    }
}

/// Arguments passed to `write_bundle` hooks after a successful write.
#[derive(Debug, Clone)]
pub struct WriteBundleArgs {
    /// Absolute output directory the artifacts landed in.
    pub output_dir: PathBuf,
    /// File names written during this pass, relative to `output_dir`.
    pub files: Vec<String>,
}
