//! Navigation state machine driven by voice commands.

use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::NavError;
use super::lookup::Lookup;
use super::process::{ProcId, ProcessController};
use crate::voice::command::Command;

/// Owned navigation state, created once at startup and mutated only by
/// `NavigationEngine`. The history stacks never contain the current path;
/// the forward stack empties on every fresh navigation.
#[derive(Debug)]
pub struct NavigationState {
    current: PathBuf,
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
    /// Lowercase spoken name of each opened file -> its process.
    opened: HashMap<String, ProcId>,
}

impl NavigationState {
    pub fn new(root: PathBuf) -> Self {
        Self {
            current: root,
            back: Vec::new(),
            forward: Vec::new(),
            opened: HashMap::new(),
        }
    }

    #[allow(dead_code)]
    pub fn current(&self) -> &Path {
        &self.current
    }

    #[allow(dead_code)]
    pub fn back(&self) -> &[PathBuf] {
        &self.back
    }

    #[allow(dead_code)]
    pub fn forward(&self) -> &[PathBuf] {
        &self.forward
    }

    #[allow(dead_code)]
    pub fn opened_process(&self, name: &str) -> Option<ProcId> {
        self.opened.get(&name.to_lowercase()).copied()
    }
}

/// What a handled command did, for user-facing reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Entered(PathBuf),
    Launched(String),
    MovedBack(PathBuf),
    MovedForward(PathBuf),
    Deleted(String),
    Closed(String),
    /// `Command::None`; nothing to do.
    Ignored,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Entered(path) => write!(f, "opened {}", path.display()),
            Outcome::Launched(name) => write!(f, "opened '{}'", name),
            Outcome::MovedBack(path) => write!(f, "moved back to {}", path.display()),
            Outcome::MovedForward(path) => write!(f, "moved forward to {}", path.display()),
            Outcome::Deleted(name) => write!(f, "deleted '{}'", name),
            Outcome::Closed(name) => write!(f, "closed '{}'", name),
            Outcome::Ignored => Ok(()),
        }
    }
}

pub struct NavigationEngine<F, P> {
    state: NavigationState,
    fs: F,
    processes: P,
    refresh: flume::Sender<PathBuf>,
    terminate_wait: Duration,
}

impl<F: Lookup, P: ProcessController> NavigationEngine<F, P> {
    pub fn new(
        state: NavigationState,
        fs: F,
        processes: P,
        refresh: flume::Sender<PathBuf>,
        terminate_wait: Duration,
    ) -> Self {
        Self {
            state,
            fs,
            processes,
            refresh,
            terminate_wait,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Pushes the current path to the view channel. The view never reads
    /// engine state directly.
    pub fn notify_view(&self) {
        let _ = self.refresh.send(self.state.current.clone());
    }

    /// Applies one command. Failures leave state untouched; the caller
    /// reports them once.
    pub fn handle(&mut self, command: Command) -> Result<Outcome, NavError> {
        match command {
            Command::Open(name) => self.open(&name),
            Command::GoBack => self.traverse_history(false),
            Command::GoForward => self.traverse_history(true),
            Command::Delete(name) => self.delete(&name),
            Command::Exit(name) => self.exit(&name),
            Command::None => Ok(Outcome::Ignored),
        }
    }

    fn open(&mut self, name: &str) -> Result<Outcome, NavError> {
        let path = self.resolve(name)?;
        if self.fs.is_dir(&path) {
            let previous = mem::replace(&mut self.state.current, path.clone());
            self.state.back.push(previous);
            self.state.forward.clear();
            self.notify_view();
            Ok(Outcome::Entered(path))
        } else {
            let id = self.processes.spawn(&path)?;
            self.state.opened.insert(name.to_lowercase(), id);
            Ok(Outcome::Launched(name.to_string()))
        }
    }

    fn traverse_history(&mut self, forward: bool) -> Result<Outcome, NavError> {
        let (from, to) = if forward {
            (&mut self.state.forward, &mut self.state.back)
        } else {
            (&mut self.state.back, &mut self.state.forward)
        };
        let Some(destination) = from.pop() else {
            return Err(NavError::NoHistory { forward });
        };
        let previous = mem::replace(&mut self.state.current, destination.clone());
        to.push(previous);
        self.notify_view();
        Ok(if forward {
            Outcome::MovedForward(destination)
        } else {
            Outcome::MovedBack(destination)
        })
    }

    fn delete(&mut self, name: &str) -> Result<Outcome, NavError> {
        let path = self.resolve(name)?;
        self.fs.remove(&path).map_err(NavError::Access)?;
        self.notify_view();
        Ok(Outcome::Deleted(name.to_string()))
    }

    fn exit(&mut self, name: &str) -> Result<Outcome, NavError> {
        let key = name.to_lowercase();
        if let Some(&id) = self.state.opened.get(&key) {
            self.processes.terminate(id, self.terminate_wait)?;
            self.state.opened.remove(&key);
        } else {
            self.processes.kill_by_name(name)?;
        }
        Ok(Outcome::Closed(name.to_string()))
    }

    /// Case-insensitive lookup in the current directory: exact names win,
    /// then names without their extension. Entries sharing a stem resolve
    /// to whichever one the listing yields first.
    fn resolve(&self, name: &str) -> Result<PathBuf, NavError> {
        let needle = name.to_lowercase();
        let entries = self
            .fs
            .list(&self.state.current)
            .map_err(NavError::Access)?;

        for entry in &entries {
            if entry.to_lowercase() == needle {
                return Ok(self.state.current.join(entry));
            }
        }
        for entry in &entries {
            let stem = Path::new(entry)
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_lowercase());
            if stem.as_deref() == Some(needle.as_str()) {
                return Ok(self.state.current.join(entry));
            }
        }
        Err(NavError::NotFound(name.to_string()))
    }
}
