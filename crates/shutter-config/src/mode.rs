//! Build mode selection.
//!
//! The mode is computed once at startup and threaded into the pipeline
//! assembler as a plain parameter. Nothing in the workspace consults ambient
//! process state after that point.

/// Which optional stages the assembler includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Watch-session build: dev-server launcher and live reload, no minifier.
    Development,
    /// One-shot build: minifier, no dev stages.
    Production,
}

impl BuildMode {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Derive the mode the way the original build script did: production
    /// unless the watch environment variable is set.
    ///
    /// The CLI normally decides the mode from its subcommand; this exists so
    /// `SHUTTER_WATCH=1 shutter build` keeps behaving like the env-driven
    /// toolchains this pipeline replaced.
    pub fn from_watch_env() -> Self {
        match std::env::var_os("SHUTTER_WATCH") {
            Some(v) if !v.is_empty() => Self::Development,
            _ => Self::Production,
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_predicates() {
        assert!(BuildMode::Production.is_production());
        assert!(!BuildMode::Production.is_development());
        assert!(BuildMode::Development.is_development());
    }

    #[test]
    fn mode_display() {
        assert_eq!(BuildMode::Development.to_string(), "development");
        assert_eq!(BuildMode::Production.to_string(), "production");
    }
}
