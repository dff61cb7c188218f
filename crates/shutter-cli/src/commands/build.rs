//! Production build command.

use shutter_config::BuildMode;
use shutter_pipeline::{assemble, Bundler};

use crate::cli::BuildArgs;
use crate::error::Result;
use crate::ui;

/// Run one production build pass and exit.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let (root, config) = super::load_config(&args.root, args.config.as_deref())?;

    // Production unless the legacy watch env var forces a dev-flavored pass.
    let mode = BuildMode::from_watch_env();
    ui::info(&format!(
        "Building {} ({mode})",
        config.input.display()
    ));

    let plugins = assemble(mode, &config, &root);
    let bundler = Bundler::new(config, root, plugins);
    let summary = bundler.build()?;

    ui::success(&format!(
        "Wrote {} files from {} modules in {}",
        summary.files.len(),
        summary.modules,
        ui::format_duration(summary.duration_ms)
    ));
    for file in &summary.files {
        tracing::debug!(%file, "artifact");
    }
    Ok(())
}
