//! Module resolution stage.
//!
//! Browser-targeted resolution of relative and bare specifiers, with forced
//! deduplication of the UI-framework package: every import of `svelte` itself
//! or of any `svelte/<subpath>` resolves from the project root, so exactly one
//! copy of the framework lands in the bundle no matter how deeply a dependency
//! nests its own copy.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::plugin::{Plugin, Resolution};

/// Extensions tried for extensionless relative imports, in order.
const EXTENSIONS: &[&str] = &["js", "mjs", "svelte"];

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Prefer browser-facing entry fields of package manifests.
    pub browser: bool,
    /// Packages resolved from the project root regardless of importer.
    pub dedupe: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            browser: true,
            dedupe: vec!["svelte".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvePlugin {
    options: ResolveOptions,
    project_root: PathBuf,
}

impl ResolvePlugin {
    pub fn new(project_root: impl Into<PathBuf>, options: ResolveOptions) -> Self {
        Self {
            options,
            project_root: project_root.into(),
        }
    }

    /// Whether a specifier is pinned to the single root copy of a package:
    /// the exact package name, or any subpath under it. Nothing else matches;
    /// `svelte-routing` is a different package.
    pub fn should_dedupe(&self, specifier: &str) -> bool {
        self.options.dedupe.iter().any(|pkg| {
            specifier == pkg
                || specifier
                    .strip_prefix(pkg.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    fn resolve_relative(&self, specifier: &str, importer: &Path) -> Option<PathBuf> {
        let base = importer.parent()?.join(specifier);
        resolve_file(&base)
    }

    fn resolve_bare(&self, specifier: &str, importer: &Path) -> Option<PathBuf> {
        let (package, subpath) = match specifier.split_once('/') {
            Some((pkg, rest)) => (pkg, Some(rest)),
            None => (specifier, None),
        };

        // Deduped packages resolve from the project root only; everything else
        // walks up from the importer, closest node_modules first.
        let roots: Vec<PathBuf> = if self.should_dedupe(specifier) {
            vec![self.project_root.clone()]
        } else {
            let mut roots = Vec::new();
            let mut dir = importer.parent();
            while let Some(d) = dir {
                roots.push(d.to_path_buf());
                if d == self.project_root {
                    break;
                }
                dir = d.parent();
            }
            roots
        };

        for root in roots {
            let pkg_dir = root.join("node_modules").join(package);
            if !pkg_dir.is_dir() {
                continue;
            }
            let resolved = match subpath {
                Some(sub) => resolve_file(&pkg_dir.join(sub)),
                None => self.resolve_package_entry(&pkg_dir),
            };
            if resolved.is_some() {
                return resolved;
            }
        }
        None
    }

    /// Entry of a package directory: manifest fields first (`browser` when
    /// targeting browsers, then `module`, then `main`), `index.js` as the
    /// fallback.
    fn resolve_package_entry(&self, pkg_dir: &Path) -> Option<PathBuf> {
        let manifest = pkg_dir.join("package.json");
        if let Ok(content) = std::fs::read_to_string(&manifest) {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(&content) {
                let mut fields = vec!["module", "main"];
                if self.options.browser {
                    fields.insert(0, "browser");
                }
                for field in fields {
                    if let Some(entry) = json.get(field).and_then(|v| v.as_str()) {
                        if let Some(path) = resolve_file(&pkg_dir.join(entry)) {
                            return Some(path);
                        }
                    }
                }
            }
        }
        resolve_file(&pkg_dir.join("index"))
    }
}

/// Try a path as-is, then with the known extensions, then as a directory
/// holding an index file.
fn resolve_file(base: &Path) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.to_path_buf());
    }
    for ext in EXTENSIONS {
        let candidate = base.with_extension(ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    if base.is_dir() {
        for ext in EXTENSIONS {
            let candidate = base.join(format!("index.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

impl Plugin for ResolvePlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-resolve".into()
    }

    fn resolve_id(&self, specifier: &str, importer: &Path) -> Result<Option<Resolution>> {
        let resolved = if specifier.starts_with('.') {
            self.resolve_relative(specifier, importer)
        } else {
            self.resolve_bare(specifier, importer)
        };
        Ok(resolved.map(Resolution::File))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn plugin_at(root: &Path) -> ResolvePlugin {
        ResolvePlugin::new(root, ResolveOptions::default())
    }

    #[test]
    fn dedupe_matches_package_and_subpaths_only() {
        let plugin = plugin_at(Path::new("/project"));

        assert!(plugin.should_dedupe("svelte"));
        assert!(plugin.should_dedupe("svelte/internal"));
        assert!(plugin.should_dedupe("svelte/store/index.js"));

        assert!(!plugin.should_dedupe("svelte-routing"));
        assert!(!plugin.should_dedupe("sveltekit"));
        assert!(!plugin.should_dedupe("not-svelte"));
        assert!(!plugin.should_dedupe("./svelte"));
    }

    #[test]
    fn relative_imports_try_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("lib.js"), "export const x = 1;").unwrap();
        let importer = src.join("main.js");
        fs::write(&importer, "").unwrap();

        let plugin = plugin_at(dir.path());
        let resolution = plugin.resolve_id("./lib", &importer).unwrap().unwrap();
        assert_eq!(resolution, Resolution::File(src.join("lib.js")));
    }

    #[test]
    fn deduped_package_resolves_from_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        // Root copy of the framework.
        let root_pkg = root.join("node_modules/svelte");
        fs::create_dir_all(&root_pkg).unwrap();
        fs::write(root_pkg.join("index.js"), "// root copy").unwrap();

        // A nested duplicate under a dependency.
        let nested = root.join("node_modules/some-lib/node_modules/svelte");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.js"), "// nested copy").unwrap();

        let importer = root.join("node_modules/some-lib/index.js");
        fs::write(&importer, "").unwrap();

        let plugin = plugin_at(root);
        let resolution = plugin.resolve_id("svelte", &importer).unwrap().unwrap();
        assert_eq!(resolution, Resolution::File(root_pkg.join("index.js")));
    }

    #[test]
    fn non_deduped_package_uses_nearest_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let root_pkg = root.join("node_modules/left-pad");
        fs::create_dir_all(&root_pkg).unwrap();
        fs::write(root_pkg.join("index.js"), "// root copy").unwrap();

        let nested = root.join("node_modules/some-lib/node_modules/left-pad");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.js"), "// nested copy").unwrap();

        let importer = root.join("node_modules/some-lib/index.js");
        fs::write(&importer, "").unwrap();

        let plugin = plugin_at(root);
        let resolution = plugin.resolve_id("left-pad", &importer).unwrap().unwrap();
        assert_eq!(resolution, Resolution::File(nested.join("index.js")));
    }

    #[test]
    fn browser_field_wins_when_browser_targeted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let pkg = root.join("node_modules/widget");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{ "browser": "browser.js", "main": "main.js" }"#,
        )
        .unwrap();
        fs::write(pkg.join("browser.js"), "").unwrap();
        fs::write(pkg.join("main.js"), "").unwrap();
        let importer = root.join("src/main.js");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(&importer, "").unwrap();

        let plugin = plugin_at(root);
        let resolution = plugin.resolve_id("widget", &importer).unwrap().unwrap();
        assert_eq!(resolution, Resolution::File(pkg.join("browser.js")));

        let no_browser = ResolvePlugin::new(
            root,
            ResolveOptions {
                browser: false,
                dedupe: vec![],
            },
        );
        let resolution = no_browser.resolve_id("widget", &importer).unwrap().unwrap();
        assert_eq!(resolution, Resolution::File(pkg.join("main.js")));
    }

    #[test]
    fn unknown_specifiers_resolve_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let importer = dir.path().join("main.js");
        fs::write(&importer, "").unwrap();

        let plugin = plugin_at(dir.path());
        assert!(plugin.resolve_id("nonexistent-pkg", &importer).unwrap().is_none());
        assert!(plugin.resolve_id("./missing", &importer).unwrap().is_none());
    }
}
