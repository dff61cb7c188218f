//! Chunk rendering.
//!
//! Turns the ordered module list into a single IIFE chunk assigned to the
//! configured global name. Module boundaries become comment banners, import
//! lines disappear (the imported module body already precedes its importer),
//! and entry exports are rewritten onto the shared exports object the wrapper
//! returns.

use std::path::Path;

use shutter_config::OutputConfig;

use crate::bundle::OutputChunk;
use crate::graph::ModuleRecord;

const EXPORTS_OBJECT: &str = "__shutter_exports";

/// Render the module list into the final script chunk.
pub fn render_iife(modules: &[ModuleRecord], output: &OutputConfig) -> OutputChunk {
    let filename = file_name(&output.file);

    let mut code = String::new();
    code.push_str(&format!("var {} = (function () {{\n", output.name));
    code.push_str("'use strict';\n");
    code.push_str(&format!("var {EXPORTS_OBJECT} = {{}};\n"));

    for module in modules {
        code.push_str(&format!("\n// {}\n", module.rel_id));
        rewrite_module(&module.code, module.is_entry, &mut code);
    }

    code.push_str(&format!("\nreturn {EXPORTS_OBJECT};\n}})();\n"));

    let map = if output.sourcemap {
        code.push_str(&format!("//# sourceMappingURL={filename}.map\n"));
        Some(render_map(modules, &filename))
    } else {
        None
    };

    tracing::debug!(chunk = %filename, modules = modules.len(), bytes = code.len(), "chunk rendered");
    OutputChunk {
        filename,
        code,
        map,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle.js".to_string())
}

/// Rewrite one module body into the wrapper scope. Line-oriented: imports are
/// dropped, `export` declarations are unwrapped, and for the entry module the
/// exported names are assigned onto the exports object.
fn rewrite_module(code: &str, is_entry: bool, out: &mut String) {
    for line in code.lines() {
        let trimmed = line.trim_start();

        if is_import_line(trimmed) {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("export default ") {
            if is_entry {
                out.push_str(&format!("{EXPORTS_OBJECT}.default = {rest}\n"));
            } else {
                out.push_str(&format!("var __default = {rest}\n"));
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("export ") {
            if let Some(names) = named_export_list(rest) {
                if is_entry {
                    for (local, exported) in names {
                        out.push_str(&format!("{EXPORTS_OBJECT}.{exported} = {local};\n"));
                    }
                }
                continue;
            }
            // `export const x = ...` and friends become plain declarations.
            out.push_str(rest);
            out.push('\n');
            continue;
        }

        out.push_str(line);
        out.push('\n');
    }
}

fn is_import_line(trimmed: &str) -> bool {
    if !trimmed.starts_with("import") {
        // Re-exports pull another module in; its body is already inlined.
        return trimmed.starts_with("export ")
            && trimmed.contains(" from ")
            && trimmed.contains('{');
    }
    matches!(
        trimmed.as_bytes().get(6),
        Some(b' ' | b'\'' | b'"' | b'{' | b'(')
    ) || trimmed == "import"
}

/// Parse `{ a, b as c } from? ...` into (local, exported) pairs. Returns None
/// when `rest` is not a brace-list export.
fn named_export_list(rest: &str) -> Option<Vec<(String, String)>> {
    let rest = rest.trim_start();
    let inner = rest.strip_prefix('{')?;
    let (inner, _) = inner.split_once('}')?;

    let mut names = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if let Some((local, exported)) = item.split_once(" as ") {
            names.push((local.trim().to_string(), exported.trim().to_string()));
        } else {
            names.push((item.to_string(), item.to_string()));
        }
    }
    Some(names)
}

/// Minimal source map: full sources and content, no mappings. Enough for dev
/// tools to list and display the original modules.
fn render_map(modules: &[ModuleRecord], filename: &str) -> String {
    let sources: Vec<&str> = modules.iter().map(|m| m.rel_id.as_str()).collect();
    let contents: Vec<&str> = modules.iter().map(|m| m.code.as_str()).collect();
    serde_json::json!({
        "version": 3,
        "file": filename,
        "sources": sources,
        "sourcesContent": contents,
        "names": [],
        "mappings": "",
    })
    .to_string()
}
