//! Configuration validation.
//!
//! Checks run once, after discovery and before the pipeline is assembled, so a
//! bad record fails the invocation immediately instead of mid-build.

use std::path::Path;

use crate::config::{OutputFormat, ShutterConfig};
use crate::error::{ConfigError, Result};

/// Validate a configuration record.
pub fn validate(config: &ShutterConfig) -> Result<()> {
    if let OutputFormat::Esm | OutputFormat::Cjs = config.output.format {
        return Err(ConfigError::InvalidValue {
            field: "output.format".to_string(),
            hint: Some(format!(
                "'{}' is not renderable; the camera bundle is a single 'iife' script",
                config.output.format
            )),
        });
    }

    if config.output.name.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "output.name".to_string(),
            hint: Some("the IIFE needs a global name, e.g. \"app\"".to_string()),
        });
    }

    if !is_valid_identifier(&config.output.name) {
        return Err(ConfigError::InvalidValue {
            field: "output.name".to_string(),
            hint: Some(format!(
                "'{}' is not a valid JavaScript identifier",
                config.output.name
            )),
        });
    }

    check_relative("input", &config.input)?;
    check_relative("output.file", &config.output.file)?;
    check_relative("output.css_file", &config.output.css_file)?;

    Ok(())
}

/// Output and entry paths must stay inside the project directory.
fn check_relative(field: &str, path: &Path) -> Result<()> {
    if path.is_absolute() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            hint: Some("paths are resolved against the project root; use a relative path".to_string()),
        });
    }
    if path
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            hint: Some("'..' components are not allowed".to_string()),
        });
    }
    Ok(())
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
