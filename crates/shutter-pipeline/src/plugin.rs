//! The plugin seam every stage implements.
//!
//! Hooks are invoked synchronously, in declared pipeline order, once per build
//! pass: `resolve_id` and `transform` while the module graph is walked,
//! `generate_bundle` after the chunk is rendered, and `write_bundle` after the
//! artifacts hit disk. In watch mode `write_bundle` fires again on every
//! rebuild.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bundle::{Bundle, WriteBundleArgs};
use crate::error::Result;

/// Outcome of a `resolve_id` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Specifier resolves to a file on disk.
    File(PathBuf),
    /// Specifier is intentionally left out of the bundle.
    External,
}

pub trait Plugin: Send + Sync {
    /// Stage name, used in logs and diagnostics.
    fn name(&self) -> Cow<'static, str>;

    /// Map an import specifier to a module. First stage returning `Some` wins.
    fn resolve_id(&self, specifier: &str, importer: &Path) -> Result<Option<Resolution>> {
        let _ = (specifier, importer);
        Ok(None)
    }

    /// Rewrite a module's source. Returning `Some` replaces the code seen by
    /// later stages and by the import scanner.
    fn transform(&self, id: &Path, code: &str) -> Result<Option<String>> {
        let _ = (id, code);
        Ok(None)
    }

    /// Inspect or mutate the rendered bundle before it is written.
    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let _ = bundle;
        Ok(())
    }

    /// React to a completed artifact write.
    fn write_bundle(&self, args: &WriteBundleArgs) -> Result<()> {
        let _ = args;
        Ok(())
    }
}

pub type SharedPlugin = Arc<dyn Plugin>;
