//! Speech recognition seam.

use std::io;

use anyhow::Result;

/// One recognizer result. Failures are data, not errors - the listen loop
/// reports them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Text(String),
    /// Audio was captured but not understood.
    Unintelligible,
    /// The recognition backend failed; its message is passed through.
    ServiceError(String),
}

/// External speech-to-text engine. `listen` blocks until the next
/// utterance; `None` means the input source closed.
pub trait SpeechRecognizer {
    fn listen(&mut self) -> Result<Option<Recognition>>;
}

/// Simulation recognizer: each stdin line stands in for one utterance.
pub struct StdinRecognizer {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl StdinRecognizer {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lines(),
        }
    }
}

impl SpeechRecognizer for StdinRecognizer {
    fn listen(&mut self) -> Result<Option<Recognition>> {
        match self.lines.next() {
            Some(Ok(line)) if line.trim().is_empty() => Ok(Some(Recognition::Unintelligible)),
            Some(Ok(line)) => Ok(Some(Recognition::Text(line))),
            // A read failure is a backend fault, not the end of the stream.
            Some(Err(e)) => Ok(Some(Recognition::ServiceError(e.to_string()))),
            None => Ok(None),
        }
    }
}
