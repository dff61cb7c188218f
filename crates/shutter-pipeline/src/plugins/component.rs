//! Component compiler stage.
//!
//! Turns `.svelte` component files into plain JavaScript for the rest of the
//! pipeline: `<script>` blocks are extracted (module context first, then the
//! instance script, matching the framework's execution order) and `<style>`
//! blocks are collected and emitted as one stylesheet asset at the configured
//! path. The real framework compiler stays an external concern; this stage is
//! the declarative glue in front of it.

use std::borrow::Cow;
use std::path::Path;

use indexmap::IndexMap;
use memchr::memmem;
use parking_lot::Mutex;

use crate::bundle::{Bundle, OutputAsset};
use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Clone)]
pub struct ComponentOptions {
    /// Development build: keep component banners in the extracted script.
    pub dev: bool,
    /// File name of the emitted stylesheet, relative to the output directory.
    pub css_filename: String,
}

pub struct ComponentPlugin {
    options: ComponentOptions,
    /// Styles collected during the pass, keyed by module id for stable output.
    /// Drained in `generate_bundle`; every pass re-transforms the full graph.
    styles: Mutex<IndexMap<String, String>>,
}

impl ComponentPlugin {
    pub fn new(options: ComponentOptions) -> Self {
        Self {
            options,
            styles: Mutex::new(IndexMap::new()),
        }
    }

    fn extract(&self, id: &Path, source: &str) -> String {
        let mut module_script = None;
        let mut instance_script = None;
        for block in find_blocks(source, "script") {
            if block.attrs.contains("context=\"module\"") || block.attrs.contains("context='module'")
            {
                module_script.get_or_insert(block.body);
            } else {
                instance_script.get_or_insert(block.body);
            }
        }

        let styles: Vec<&str> = find_blocks(source, "style").map(|b| b.body).collect();
        if !styles.is_empty() {
            self.styles
                .lock()
                .insert(id.display().to_string(), styles.join("\n"));
        }

        let mut code = String::new();
        if self.options.dev {
            code.push_str(&format!(
                "// shutter:component {} (dev)\n",
                id.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            ));
        }
        // Module context runs once per import, before the instance script.
        if let Some(module) = module_script {
            code.push_str(module.trim_matches('\n'));
            code.push('\n');
        }
        if let Some(instance) = instance_script {
            code.push_str(instance.trim_matches('\n'));
            code.push('\n');
        }
        code
    }
}

impl Plugin for ComponentPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-component".into()
    }

    fn transform(&self, id: &Path, code: &str) -> Result<Option<String>> {
        if id.extension().and_then(|e| e.to_str()) != Some("svelte") {
            return Ok(None);
        }
        Ok(Some(self.extract(id, code)))
    }

    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let collected: Vec<String> = self.styles.lock().drain(..).map(|(_, css)| css).collect();
        if collected.is_empty() {
            return Ok(());
        }
        tracing::debug!(components = collected.len(), "emitting extracted styles");
        bundle.emit_asset(OutputAsset {
            filename: self.options.css_filename.clone(),
            source: collected.join("\n"),
        });
        Ok(())
    }
}

struct Block<'a> {
    attrs: &'a str,
    body: &'a str,
}

/// Iterate `<tag ...>body</tag>` blocks. memchr-based, never panics on
/// malformed markup: unterminated blocks are skipped.
fn find_blocks<'a>(source: &'a str, tag: &str) -> impl Iterator<Item = Block<'a>> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut pos = 0;
    let mut blocks = Vec::new();

    while let Some(start) = memmem::find(source[pos..].as_bytes(), open.as_bytes()) {
        let tag_start = pos + start;
        let after_open = tag_start + open.len();
        // Must be followed by whitespace or '>' so `<style>` does not match `<styles>`.
        match source.as_bytes().get(after_open) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => {}
            _ => {
                pos = after_open;
                continue;
            }
        }
        let Some(gt) = memmem::find(source[after_open..].as_bytes(), b">") else {
            break;
        };
        let body_start = after_open + gt + 1;
        let Some(end) = memmem::find(source[body_start..].as_bytes(), close.as_bytes()) else {
            break;
        };
        blocks.push(Block {
            attrs: &source[after_open..body_start - 1],
            body: &source[body_start..body_start + end],
        });
        pos = body_start + end + close.len();
    }
    blocks.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plugin(dev: bool) -> ComponentPlugin {
        ComponentPlugin::new(ComponentOptions {
            dev,
            css_filename: "camera.css".to_string(),
        })
    }

    #[test]
    fn extracts_script_and_collects_style() {
        let source = r#"<script>
let count = 0
</script>

<style>
h1 { color: purple; }
</style>

<h1>{count}</h1>
"#;
        let plugin = plugin(false);
        let code = plugin
            .transform(&PathBuf::from("src/App.svelte"), source)
            .unwrap()
            .unwrap();
        assert!(code.contains("let count = 0"));
        assert!(!code.contains("<style>"));

        let mut bundle = Bundle::default();
        plugin.generate_bundle(&mut bundle).unwrap();
        assert_eq!(bundle.assets.len(), 1);
        assert_eq!(bundle.assets[0].filename, "camera.css");
        assert!(bundle.assets[0].source.contains("color: purple"));
    }

    #[test]
    fn module_context_precedes_instance_script() {
        let source = r#"<script context="module">
export const shared = 'data'
</script>
<script>
let local = 1
</script>
"#;
        let code = plugin(false)
            .transform(&PathBuf::from("src/App.svelte"), source)
            .unwrap()
            .unwrap();
        let module_pos = code.find("shared").unwrap();
        let instance_pos = code.find("local").unwrap();
        assert!(module_pos < instance_pos);
    }

    #[test]
    fn dev_mode_adds_component_banner() {
        let source = "<script>let x = 1</script>";
        let code = plugin(true)
            .transform(&PathBuf::from("src/App.svelte"), source)
            .unwrap()
            .unwrap();
        assert!(code.starts_with("// shutter:component App.svelte (dev)"));

        let code = plugin(false)
            .transform(&PathBuf::from("src/App.svelte"), source)
            .unwrap()
            .unwrap();
        assert!(!code.contains("(dev)"));
    }

    #[test]
    fn non_component_files_pass_through() {
        let result = plugin(false)
            .transform(&PathBuf::from("src/main.js"), "let x = 1")
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn styles_drain_between_passes() {
        let plugin = plugin(false);
        plugin
            .transform(&PathBuf::from("a.svelte"), "<style>a{}</style>")
            .unwrap();

        let mut bundle = Bundle::default();
        plugin.generate_bundle(&mut bundle).unwrap();
        assert_eq!(bundle.assets.len(), 1);

        // Second pass with no components seen: nothing stale is re-emitted.
        let mut bundle = Bundle::default();
        plugin.generate_bundle(&mut bundle).unwrap();
        assert!(bundle.assets.is_empty());
    }

    #[test]
    fn malformed_blocks_do_not_panic() {
        let source = "<script>unterminated";
        let code = plugin(false)
            .transform(&PathBuf::from("src/Broken.svelte"), source)
            .unwrap()
            .unwrap();
        assert!(code.is_empty());
    }
}
