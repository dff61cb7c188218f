//! Development loop command.
//!
//! One watch session: initial build, then rebuild on every relevant file
//! change until Ctrl+C. The pipeline is assembled once and reused across
//! rebuilds, so the dev-server launcher's first-write guard spans the whole
//! session.

use console::Term;
use shutter_config::BuildMode;
use shutter_pipeline::{assemble, Bundler};
use tokio::signal;

use crate::cli::DevArgs;
use crate::error::Result;
use crate::ui;
use crate::watcher::FileWatcher;

/// Run the development loop until interrupted.
pub async fn execute(args: DevArgs) -> Result<()> {
    let (root, config) = super::load_config(&args.root, args.config.as_deref())?;

    let mode = BuildMode::Development;
    ui::info(&format!(
        "Watching {} ({mode})",
        root.display()
    ));

    let mut plugins = assemble(mode, &config, &root);
    if args.no_serve {
        plugins.retain(|p| p.name() != "shutter-serve");
        tracing::debug!("dev server launch disabled by --no-serve");
    }

    let output_dir = config.output_dir();
    let clear_screen = config.watch.clear_screen;
    let debounce_ms = config.watch.debounce_ms;
    let bundler = Bundler::new(config, root.clone(), plugins);

    // The initial build keeps the terminal scrollback; only rebuilds clear.
    // A failure here ends the session, there is nothing to watch a broken
    // entry against.
    run_pass(&bundler, false)?;

    let (watcher, mut change_rx) = FileWatcher::new(root, vec![output_dir], debounce_ms)?;
    ui::info(&format!(
        "Watching for changes in {}",
        watcher.root().display()
    ));
    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(change) = change_rx.recv() => {
                tracing::debug!(path = %change.path().display(), "change detected");
                // Rebuild failures keep the session alive; the next change
                // gets another chance.
                if let Err(e) = run_pass(&bundler, clear_screen) {
                    ui::error(&format!("Rebuild failed: {e}"));
                }
            }
            _ = signal::ctrl_c() => {
                ui::info("Shutting down");
                break;
            }
        }
    }

    ui::success("Development session stopped");
    Ok(())
}

fn run_pass(bundler: &Bundler, clear_screen: bool) -> Result<()> {
    if clear_screen {
        let _ = Term::stderr().clear_screen();
    }
    let summary = bundler.build()?;
    ui::success(&format!(
        "Built {} modules in {}",
        summary.modules,
        ui::format_duration(summary.duration_ms)
    ));
    Ok(())
}
