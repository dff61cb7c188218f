//! Live-reload notifier stage.
//!
//! Development-only. Broadcasts a reload event after every bundle write and
//! watches the output directory for out-of-band changes. The browser transport
//! is not this stage's concern; subscribers take a `broadcast::Receiver` and
//! forward events however they serve the page.

use std::borrow::Cow;
use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::bundle::WriteBundleArgs;
use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Clone)]
pub enum ReloadEvent {
    /// A build pass finished writing these files.
    BundleWritten { files: Vec<String> },
    /// Something else touched the watched output directory.
    OutputChanged { path: PathBuf },
}

pub struct LiveReloadPlugin {
    watch_dir: PathBuf,
    tx: broadcast::Sender<ReloadEvent>,
    /// Watcher handle, created on the first write so the directory exists.
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl LiveReloadPlugin {
    pub fn new(watch_dir: impl Into<PathBuf>) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            watch_dir: watch_dir.into(),
            tx,
            watcher: Mutex::new(None),
        }
    }

    /// Receiver for reload events. May be called any number of times.
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.tx.subscribe()
    }

    fn ensure_watching(&self) -> Result<()> {
        let mut slot = self.watcher.lock();
        if slot.is_some() {
            return Ok(());
        }

        let tx = self.tx.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if let Ok(event) = res {
                for path in event.paths {
                    // Send failures just mean nobody is subscribed right now.
                    let _ = tx.send(ReloadEvent::OutputChanged { path });
                }
            }
        })?;
        watcher.watch(&self.watch_dir, RecursiveMode::Recursive)?;
        tracing::debug!(dir = %self.watch_dir.display(), "live reload watching output");
        *slot = Some(watcher);
        Ok(())
    }
}

impl Plugin for LiveReloadPlugin {
    fn name(&self) -> Cow<'static, str> {
        "shutter-livereload".into()
    }

    fn write_bundle(&self, args: &WriteBundleArgs) -> Result<()> {
        self.ensure_watching()?;
        let receivers = self.tx.receiver_count();
        let _ = self.tx.send(ReloadEvent::BundleWritten {
            files: args.files.clone(),
        });
        tracing::debug!(files = args.files.len(), receivers, "reload notified");
        Ok(())
    }
}
