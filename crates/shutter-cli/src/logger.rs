//! Logging setup on the `tracing` ecosystem.
//!
//! Verbosity resolution order: `--verbose` (debug for shutter crates),
//! `--quiet` (errors only), `RUST_LOG`, then info for shutter crates.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("shutter_cli=debug,shutter_pipeline=debug,shutter_config=debug")
    } else if quiet {
        EnvFilter::new("shutter_cli=error,shutter_pipeline=error,shutter_config=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("shutter_cli=info,shutter_pipeline=info,shutter_config=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
