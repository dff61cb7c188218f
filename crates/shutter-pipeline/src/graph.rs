//! Module graph collection.
//!
//! Walks static `import`/`require` edges from the entry module, running each
//! module through the transform hooks before its imports are scanned, so
//! component files are already JavaScript by the time their edges are read.
//! Modules come back in dependency order with the entry last.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::plugin::{Resolution, SharedPlugin};

/// `import x from '...'`, `import '...'`, `export ... from '...'`.
static ESM_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^\s*(?:import|export)\b[^;'"]*?from\s+['"]([^'"]+)['"]|^\s*import\s+['"]([^'"]+)['"]"#,
    )
    .expect("static regex")
});

static REQUIRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).expect("static regex"));

/// One collected module after transformation.
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Absolute path on disk.
    pub id: PathBuf,
    /// Path relative to the project root, used in banners and source maps.
    pub rel_id: String,
    pub code: String,
    pub is_entry: bool,
}

/// Collect the transformed module graph reachable from `entry`.
pub fn collect(
    project_root: &Path,
    entry: &Path,
    plugins: &[SharedPlugin],
) -> Result<Vec<ModuleRecord>> {
    let entry_abs = project_root.join(entry);
    if !entry_abs.exists() {
        return Err(Error::Resolution {
            specifier: entry.display().to_string(),
            importer: project_root.to_path_buf(),
            hint: "the entry module does not exist; check 'input' in shutter.toml".to_string(),
        });
    }

    let mut walker = Walker {
        project_root,
        plugins,
        visited: FxHashSet::default(),
        order: Vec::new(),
    };
    walker.visit(&entry_abs)?;

    if let Some(last) = walker.order.last_mut() {
        last.is_entry = true;
    }
    tracing::debug!(modules = walker.order.len(), "module graph collected");
    Ok(walker.order)
}

struct Walker<'a> {
    project_root: &'a Path,
    plugins: &'a [SharedPlugin],
    visited: FxHashSet<PathBuf>,
    order: Vec<ModuleRecord>,
}

impl Walker<'_> {
    fn visit(&mut self, path: &Path) -> Result<()> {
        // Pre-marking makes import cycles terminate; the module is emitted
        // after its (non-cyclic) dependencies.
        if !self.visited.insert(path.to_path_buf()) {
            return Ok(());
        }

        let mut code = std::fs::read_to_string(path)?;
        for plugin in self.plugins {
            if let Some(next) = plugin.transform(path, &code)? {
                tracing::trace!(plugin = %plugin.name(), id = %path.display(), "transformed");
                code = next;
            }
        }

        for specifier in scan_imports(&code) {
            if is_url_like(&specifier) {
                continue;
            }
            match self.resolve(&specifier, path)? {
                Some(Resolution::File(dep)) => self.visit(&dep)?,
                Some(Resolution::External) => {
                    tracing::debug!(%specifier, "external import, not bundled");
                }
                None => {
                    if specifier.starts_with('.') {
                        return Err(Error::Resolution {
                            specifier,
                            importer: path.to_path_buf(),
                            hint: "check the relative path and file extension".to_string(),
                        });
                    }
                    // Bare specifier no stage claimed: leave it external.
                    tracing::warn!(%specifier, importer = %path.display(), "unresolved bare import left external");
                }
            }
        }

        let rel_id = path
            .strip_prefix(self.project_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        self.order.push(ModuleRecord {
            id: path.to_path_buf(),
            rel_id,
            code,
            is_entry: false,
        });
        Ok(())
    }

    fn resolve(&self, specifier: &str, importer: &Path) -> Result<Option<Resolution>> {
        for plugin in self.plugins {
            if let Some(resolution) = plugin.resolve_id(specifier, importer)? {
                return Ok(Some(resolution));
            }
        }
        Ok(None)
    }
}

/// Static import specifiers of a module, in source order.
pub fn scan_imports(code: &str) -> Vec<String> {
    let mut specifiers = Vec::new();
    for caps in ESM_IMPORT_RE.captures_iter(code) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            specifiers.push(m.as_str().to_string());
        }
    }
    for caps in REQUIRE_RE.captures_iter(code) {
        specifiers.push(caps[1].to_string());
    }
    specifiers
}

fn is_url_like(specifier: &str) -> bool {
    specifier.contains("://") || specifier.starts_with("data:")
}
