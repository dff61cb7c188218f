//! Dev-server launcher stage.
//!
//! On the first completed bundle write of a watch session this stage starts
//! the application's own dev server and then never touches it again: the
//! child is not supervised, restarted, or terminated when the session ends.
//! Later writes (every rebuild fires `write_bundle`) are no-ops.

use std::borrow::Cow;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bundle::WriteBundleArgs;
use crate::error::{Error, Result};
use crate::plugin::Plugin;

pub struct DevServeLauncher {
    command: String,
    args: Vec<String>,
    /// At-most-once guard. An atomic swap rather than a plain bool: the
    /// guarantee must hold even if the driver ever dispatches write hooks
    /// concurrently.
    started: AtomicBool,
}

impl Default for DevServeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl DevServeLauncher {
    /// Launcher for the conventional `npm run start -- --dev`.
    pub fn new() -> Self {
        Self::with_command(
            "npm",
            ["run", "start", "--", "--dev"].map(String::from).to_vec(),
        )
    }

    pub fn with_command(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            started: AtomicBool::new(false),
        }
    }

    /// Claim the launch. True exactly once per launcher lifetime.
    fn should_launch(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    /// Whether the launch has been claimed.
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl Plugin for DevServeLauncher {
    fn name(&self) -> Cow<'static, str> {
        "shutter-serve".into()
    }

    fn write_bundle(&self, _args: &WriteBundleArgs) -> Result<()> {
        if !self.should_launch() {
            return Ok(());
        }

        tracing::info!(command = %self.command, args = ?self.args, "starting app dev server");
        let child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Spawn {
                command: self.command.clone(),
                source,
            })?;

        // The child's lifetime is independent of the watch session from here
        // on. Dropping the handle does not kill the process.
        tracing::debug!(pid = child.id(), "app dev server running");
        drop(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_args() -> WriteBundleArgs {
        WriteBundleArgs {
            output_dir: PathBuf::from("public"),
            files: vec!["camera.js".to_string()],
        }
    }

    #[test]
    fn guard_claims_exactly_once() {
        let launcher = DevServeLauncher::new();
        assert!(!launcher.has_started());
        assert!(launcher.should_launch());
        for _ in 0..10 {
            assert!(!launcher.should_launch());
        }
        assert!(launcher.has_started());
    }

    #[cfg(unix)]
    #[test]
    fn spawns_once_across_repeated_write_hooks() {
        // `true` exits immediately; what matters is that only the first hook
        // invocation reaches spawn at all.
        let launcher = DevServeLauncher::with_command("true", vec![]);
        for _ in 0..5 {
            launcher.write_bundle(&write_args()).unwrap();
        }
        assert!(launcher.has_started());
    }

    #[test]
    fn spawn_failure_surfaces_on_first_write_only() {
        let launcher = DevServeLauncher::with_command("shutter-test-nonexistent-cmd", vec![]);
        let err = launcher.write_bundle(&write_args()).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));

        // The guard was consumed; later writes no longer try to spawn.
        launcher.write_bundle(&write_args()).unwrap();
    }

    #[test]
    fn guard_holds_under_concurrent_hooks() {
        use std::sync::Arc;

        let launcher = Arc::new(DevServeLauncher::with_command("unused", vec![]));
        let claims: Vec<_> = (0..8)
            .map(|_| {
                let launcher = Arc::clone(&launcher);
                std::thread::spawn(move || launcher.should_launch())
            })
            .map(|h| h.join().unwrap())
            .collect();

        assert_eq!(claims.iter().filter(|&&c| c).count(), 1);
    }
}
