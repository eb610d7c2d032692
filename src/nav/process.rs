//! Lifecycle of the programs spawned to open files.

use std::collections::HashMap;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::NavError;
use crate::platform::Platform;

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Opaque identifier for a spawned process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcId(u32);

impl ProcId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

pub trait ProcessController {
    /// Launches the platform file opener for `path`. Fire and forget; a
    /// failure is reported once, never retried.
    fn spawn(&mut self, path: &Path) -> Result<ProcId, NavError>;

    /// Terminates a tracked process, waiting up to `wait` for it to exit.
    fn terminate(&mut self, id: ProcId, wait: Duration) -> Result<(), NavError>;

    /// Best-effort close by program name for untracked targets.
    fn kill_by_name(&mut self, name: &str) -> Result<(), NavError>;
}

/// Real OS implementation. Children are kept so they can be terminated
/// and reaped later; whatever the opener hands the file to is tracked
/// only as far as the opener process itself.
pub struct OsProcesses {
    children: HashMap<u32, Child>,
    close_by_name: bool,
}

impl OsProcesses {
    pub fn new(platform: Platform) -> Self {
        Self {
            children: HashMap::new(),
            close_by_name: platform.close_by_name,
        }
    }

    fn opener(path: &Path) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]).arg(path);
            command
        }
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(path);
            command
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(path);
            command
        }
    }
}

impl ProcessController for OsProcesses {
    fn spawn(&mut self, path: &Path) -> Result<ProcId, NavError> {
        let child = Self::opener(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| NavError::SpawnFailed(format!("{}: {}", path.display(), e)))?;
        let id = child.id();
        self.children.insert(id, child);
        Ok(ProcId::new(id))
    }

    fn terminate(&mut self, id: ProcId, wait: Duration) -> Result<(), NavError> {
        let child = self
            .children
            .get_mut(&id.0)
            .ok_or_else(|| NavError::TerminateFailed(format!("process {} is not tracked", id.0)))?;

        if !matches!(child.try_wait(), Ok(Some(_))) {
            child
                .kill()
                .map_err(|e| NavError::TerminateFailed(e.to_string()))?;
            let deadline = Instant::now() + wait;
            loop {
                match child.try_wait() {
                    Ok(Some(_)) => break,
                    Ok(None) if Instant::now() < deadline => thread::sleep(EXIT_POLL_INTERVAL),
                    Ok(None) => {
                        return Err(NavError::TerminateTimeout(format!("process {}", id.0)));
                    }
                    Err(e) => return Err(NavError::TerminateFailed(e.to_string())),
                }
            }
        }

        self.children.remove(&id.0);
        Ok(())
    }

    fn kill_by_name(&mut self, name: &str) -> Result<(), NavError> {
        if !self.close_by_name {
            return Err(NavError::Unsupported("closing untracked programs"));
        }
        let status = close_command(name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NavError::TerminateFailed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(NavError::TerminateFailed(format!(
                "no running program matched '{}'",
                name
            )))
        }
    }
}

#[cfg(target_os = "windows")]
fn close_command(name: &str) -> Command {
    let mut command = Command::new("taskkill");
    command.args(["/IM", name, "/F"]);
    command
}

#[cfg(not(target_os = "windows"))]
fn close_command(name: &str) -> Command {
    // The opener may have handed the file to a differently named
    // application; matching the spoken name is best effort.
    let mut command = Command::new("pkill");
    command.args(["-x", name]);
    command
}
