//! Debounced project watcher for the dev loop.
//!
//! Watches the project root recursively and filters events down to the ones
//! that should trigger a rebuild: output artifacts, node_modules, and hidden
//! files never do, otherwise every rebuild would immediately re-trigger
//! itself through the files it just wrote.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{CliError, Result};

#[derive(Debug, Clone)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Recursive watcher with per-file debouncing. Dropping it stops the watch.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Watch `root`, ignoring `ignore_dirs` (relative to the root) plus
    /// node_modules and hidden files. Returns the watcher and the change
    /// channel.
    pub fn new(
        root: PathBuf,
        ignore_dirs: Vec<PathBuf>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let debounce = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;
        let root_for_handler = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                for path in &event.paths {
                    if should_ignore(path, &root_for_handler, &ignore_dirs) {
                        continue;
                    }

                    let now = Instant::now();
                    if let Some((last_path, last_time)) = &last_event {
                        if last_path == path && now.duration_since(*last_time) < debounce {
                            continue;
                        }
                    }
                    last_event = Some((path.clone(), now));

                    let change = match event.kind {
                        notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                        notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                        notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                        _ => continue,
                    };
                    let _ = tx.blocking_send(change);
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn should_ignore(path: &Path, root: &Path, ignore_dirs: &[PathBuf]) -> bool {
    // Only paths inside the project root are relevant.
    let Ok(rel) = path.strip_prefix(root) else {
        return true;
    };

    for dir in ignore_dirs {
        if rel.starts_with(dir) {
            return true;
        }
    }

    for component in rel.components() {
        let Some(name) = component.as_os_str().to_str() else {
            return true;
        };
        if name == "node_modules" {
            return true;
        }
        if name.starts_with('.') && name != "." && name != ".." {
            return true;
        }
    }

    false
}
