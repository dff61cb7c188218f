//! Minification stage.
//!
//! Production-only. The bundle's script chunks are stripped of comments and
//! insignificant whitespace; identifier mangling and syntax-level compression
//! belong to the external minifier this stage fronts. Levels are parsed from
//! configuration strings so `shutter.toml` can name them.

use std::borrow::Cow;

use crate::bundle::Bundle;
use crate::error::{Error, Result};
use crate::plugin::Plugin;

/// Validated minification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinifyLevel {
    /// No minification.
    None,
    /// Remove comments and insignificant whitespace.
    #[default]
    Whitespace,
}

impl MinifyLevel {
    /// Parse a level from a configuration string. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "false" => Ok(Self::None),
            "whitespace" | "true" => Ok(Self::Whitespace),
            _ => Err(Error::InvalidConfig(format!(
                "invalid minify level: '{s}'. Expected: none, whitespace"
            ))),
        }
    }

    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for MinifyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Whitespace => write!(f, "whitespace"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinifyPlugin {
    level: MinifyLevel,
}

impl MinifyPlugin {
    pub fn new(level: MinifyLevel) -> Self {
        Self { level }
    }
}

impl Plugin for MinifyPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-minify".into()
    }

    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        if !self.level.is_enabled() {
            return Ok(());
        }
        for chunk in &mut bundle.chunks {
            let before = chunk.code.len();
            chunk.code = strip(&chunk.code);
            tracing::debug!(chunk = %chunk.filename, before, after = chunk.code.len(), "minified");
        }
        Ok(())
    }
}

/// Remove `//` and `/* */` comments, indentation, and blank lines. Comment
/// markers inside string and template literals are left alone, as are `//#`
/// directives (source map references). A slash is only treated as a comment
/// opener where a division cannot appear, so regex literals in ordinary
/// positions survive.
fn strip(code: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        LineComment { text: String },
        BlockComment,
        Str(char),
    }

    let mut out = String::with_capacity(code.len());
    let mut state = State::Code;
    let mut prev_significant = '\n';
    let mut chars = code.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '"' | '\'' | '`' => {
                    state = State::Str(c);
                    out.push(c);
                    prev_significant = c;
                }
                '/' => match chars.peek() {
                    Some('/') if comment_can_start(prev_significant) => {
                        chars.next();
                        state = State::LineComment {
                            text: String::new(),
                        };
                    }
                    Some('*') if comment_can_start(prev_significant) => {
                        chars.next();
                        state = State::BlockComment;
                    }
                    _ => {
                        out.push(c);
                        prev_significant = c;
                    }
                },
                _ => {
                    out.push(c);
                    if !c.is_whitespace() {
                        prev_significant = c;
                    }
                }
            },
            State::LineComment { mut text } => {
                if c == '\n' {
                    if text.starts_with('#') {
                        out.push_str("//");
                        out.push_str(&text);
                    }
                    out.push('\n');
                    state = State::Code;
                } else {
                    text.push(c);
                    state = State::LineComment { text };
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote {
                    state = State::Code;
                    prev_significant = c;
                }
            }
        }
    }

    if let State::LineComment { text } = state {
        if text.starts_with('#') {
            out.push_str("//");
            out.push_str(&text);
            out.push('\n');
        }
    }

    // Drop indentation and blank lines left behind.
    let mut result = String::with_capacity(out.len());
    for line in out.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            result.push_str(trimmed);
            result.push('\n');
        }
    }
    result
}

/// After these characters a `/` cannot be division, so `//` or `/*` must be a
/// comment. Conservative: after an identifier or `)` the slash is kept.
fn comment_can_start(prev: char) -> bool {
    matches!(
        prev,
        '\n' | ';' | ',' | '{' | '}' | '(' | '=' | '&' | '|' | '!' | '?' | ':' | '+' | '-' | '*'
            | '<' | '>' | '['
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::OutputChunk;

    #[test]
    fn parse_levels() {
        assert_eq!(MinifyLevel::parse("none").unwrap(), MinifyLevel::None);
        assert_eq!(MinifyLevel::parse("NONE").unwrap(), MinifyLevel::None);
        assert_eq!(
            MinifyLevel::parse("whitespace").unwrap(),
            MinifyLevel::Whitespace
        );
        assert_eq!(MinifyLevel::parse("true").unwrap(), MinifyLevel::Whitespace);
        assert!(MinifyLevel::parse("mangle").is_err());
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let code = "// banner\nvar x = 1; // trailing\n\n  /* block\n     comment */\nvar y = 2;\n";
        let out = strip(code);
        assert_eq!(out, "var x = 1;\nvar y = 2;\n");
    }

    #[test]
    fn preserves_string_contents() {
        let code = "var url = \"http://example.com\"; // note\n";
        let out = strip(code);
        assert!(out.contains("http://example.com"));
        assert!(!out.contains("note"));
    }

    #[test]
    fn preserves_template_literals() {
        let code = "var s = `a // not a comment\n  spaced`;\n";
        let out = strip(code);
        assert!(out.contains("// not a comment"));
    }

    #[test]
    fn source_map_directive_survives() {
        let code = "var x = 1; // gone\n//# sourceMappingURL=camera.js.map\n";
        let out = strip(code);
        assert_eq!(out, "var x = 1;\n//# sourceMappingURL=camera.js.map\n");
    }

    #[test]
    fn division_is_not_a_comment() {
        let code = "var r = a / b / c;\n";
        assert_eq!(strip(code), code);
    }

    #[test]
    fn plugin_only_touches_chunks_when_enabled() {
        let mut bundle = Bundle {
            chunks: vec![OutputChunk {
                filename: "camera.js".to_string(),
                code: "var x = 1; // c\n".to_string(),
                map: None,
            }],
            assets: vec![],
        };

        MinifyPlugin::new(MinifyLevel::None)
            .generate_bundle(&mut bundle)
            .unwrap();
        assert!(bundle.chunks[0].code.contains("// c"));

        MinifyPlugin::new(MinifyLevel::Whitespace)
            .generate_bundle(&mut bundle)
            .unwrap();
        assert_eq!(bundle.chunks[0].code, "var x = 1;\n");
    }
}
