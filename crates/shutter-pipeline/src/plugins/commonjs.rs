//! Legacy CommonJS interop stage.
//!
//! Packages that still ship `module.exports` get wrapped in a scope that
//! provides `module` and `exports`, so their top-level code runs inside the
//! bundle without clobbering the global scope. ESM sources pass through
//! untouched.

use std::borrow::Cow;
use std::path::Path;

use memchr::memmem;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Clone, Default)]
pub struct CommonJsPlugin;

impl CommonJsPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// A module is treated as CommonJS when it touches the CJS module object and
/// carries no ESM syntax of its own.
fn is_commonjs(code: &str) -> bool {
    let bytes = code.as_bytes();
    let uses_cjs = memmem::find(bytes, b"module.exports").is_some()
        || memmem::find(bytes, b"exports.").is_some()
        || memmem::find(bytes, b"require(").is_some();
    if !uses_cjs {
        return false;
    }
    !code
        .lines()
        .map(str::trim_start)
        .any(|l| l.starts_with("import ") || l.starts_with("export "))
}

impl Plugin for CommonJsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-commonjs".into()
    }

    fn transform(&self, id: &Path, code: &str) -> Result<Option<String>> {
        if !is_commonjs(code) {
            return Ok(None);
        }
        tracing::debug!(id = %id.display(), "wrapping CommonJS module");
        let wrapped = format!(
            ";(function (module) {{\nvar exports = module.exports;\n{code}\n}})({{ exports: {{}} }});\n"
        );
        Ok(Some(wrapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn wraps_module_exports() {
        let plugin = CommonJsPlugin::new();
        let code = "module.exports = function leftPad(s) { return s; };\n";
        let wrapped = plugin
            .transform(&PathBuf::from("node_modules/left-pad/index.js"), code)
            .unwrap()
            .unwrap();
        assert!(wrapped.contains("function (module)"));
        assert!(wrapped.contains("var exports = module.exports;"));
        assert!(wrapped.contains("leftPad"));
    }

    #[test]
    fn leaves_esm_alone() {
        let plugin = CommonJsPlugin::new();
        let code = "import x from './x.js'\nexport default x\n";
        assert!(plugin
            .transform(&PathBuf::from("src/main.js"), code)
            .unwrap()
            .is_none());
    }

    #[test]
    fn mixed_syntax_is_not_wrapped() {
        // An ESM module reading `exports.` in a string or comment is rare, but
        // a module with real import statements must never be wrapped.
        let code = "import lib from './lib.js'\nconst r = lib.require('x')\n";
        assert!(CommonJsPlugin::new()
            .transform(&PathBuf::from("src/a.js"), code)
            .unwrap()
            .is_none());
    }

    #[test]
    fn plain_scripts_pass_through() {
        let code = "const x = 1;\n";
        assert!(CommonJsPlugin::new()
            .transform(&PathBuf::from("src/a.js"), code)
            .unwrap()
            .is_none());
    }
}
