//! Stylesheet post-processing stage.
//!
//! Runs every CSS asset in the bundle through lightningcss: parse, optionally
//! minify, and reprint. Always part of the pipeline; minification follows the
//! build mode.

use std::borrow::Cow;

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};

use crate::bundle::Bundle;
use crate::error::{Error, Result};
use crate::plugin::Plugin;

#[derive(Debug, Clone, Default)]
pub struct StylesOptions {
    pub minify: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StylesPlugin {
    options: StylesOptions,
}

impl StylesPlugin {
    pub fn new(options: StylesOptions) -> Self {
        Self { options }
    }

    fn process_css(&self, filename: &str, source: &str) -> Result<String> {
        let mut stylesheet = StyleSheet::parse(
            source,
            ParserOptions {
                filename: filename.to_string(),
                ..Default::default()
            },
        )
        .map_err(|e| Error::Css(format!("failed to parse {filename}: {e:?}")))?;

        if self.options.minify {
            stylesheet
                .minify(MinifyOptions::default())
                .map_err(|e| Error::Css(format!("failed to minify {filename}: {e:?}")))?;
        }

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: self.options.minify,
                ..Default::default()
            })
            .map_err(|e| Error::Css(format!("failed to print {filename}: {e:?}")))?;

        Ok(result.code)
    }
}

impl Plugin for StylesPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-styles".into()
    }

    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        for asset in &mut bundle.assets {
            if !asset.filename.ends_with(".css") {
                continue;
            }
            let before = asset.source.len();
            let processed = self.process_css(&asset.filename, &asset.source)?;
            asset.source = processed;
            tracing::debug!(
                asset = %asset.filename,
                before,
                after = asset.source.len(),
                minify = self.options.minify,
                "processed stylesheet"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::OutputAsset;

    #[test]
    fn reprints_basic_css() {
        let plugin = StylesPlugin::default();
        let out = plugin.process_css("camera.css", "h1 { color: purple; }").unwrap();
        assert!(out.contains("color"));
    }

    #[test]
    fn minification_shrinks_output() {
        let plugin = StylesPlugin::new(StylesOptions { minify: true });
        let css = "h1 {\n  color: purple;\n  background: blue;\n}\n";
        let out = plugin.process_css("camera.css", css).unwrap();
        assert!(out.len() < css.len());
        assert!(out.contains("color"));
    }

    #[test]
    fn invalid_css_is_an_error() {
        let plugin = StylesPlugin::default();
        assert!(plugin.process_css("camera.css", "h1 { color: }}}").is_err());
    }

    #[test]
    fn only_css_assets_are_touched() {
        let plugin = StylesPlugin::default();
        let mut bundle = Bundle::default();
        bundle.emit_asset(OutputAsset {
            filename: "camera.js.map".to_string(),
            source: "{not css}".to_string(),
        });
        plugin.generate_bundle(&mut bundle).unwrap();
        assert_eq!(bundle.assets[0].source, "{not css}");
    }
}
