//! Voice-driven file navigation: history stacks, entry resolution,
//! deletion and the lifecycle of programs opened for files.

pub mod engine;
pub mod lookup;
pub mod process;

use std::fmt;
use std::io;

/// Non-fatal navigation failures. Each is reported once at the point of
/// occurrence and leaves navigation state untouched.
#[derive(Debug)]
pub enum NavError {
    /// No entry in the current directory matches the spoken name.
    /// Ambiguous matches currently surface the same way.
    NotFound(String),
    /// Back or forward was requested with an empty history stack.
    NoHistory { forward: bool },
    /// The platform has no mechanism for the requested operation.
    Unsupported(&'static str),
    SpawnFailed(String),
    TerminateFailed(String),
    /// The process outlived the bounded termination wait.
    TerminateTimeout(String),
    /// Directory listing, stat or removal failed.
    Access(io::Error),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NotFound(name) => write!(f, "'{}' not found", name),
            NavError::NoHistory { forward: false } => write!(f, "no folder to go back to"),
            NavError::NoHistory { forward: true } => write!(f, "no folder to go forward to"),
            NavError::Unsupported(what) => {
                write!(f, "{} is not supported on this platform", what)
            }
            NavError::SpawnFailed(msg) => write!(f, "could not open: {}", msg),
            NavError::TerminateFailed(msg) => write!(f, "could not close: {}", msg),
            NavError::TerminateTimeout(what) => {
                write!(f, "{} did not exit within the wait window", what)
            }
            NavError::Access(e) => write!(f, "filesystem access failed: {}", e),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::Access(e) => Some(e),
            _ => None,
        }
    }
}
