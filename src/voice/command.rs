//! Spoken-command grammar.

/// Structured navigation command recognized from speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    GoBack,
    GoForward,
    Delete(String),
    Exit(String),
    None,
}

/// Total parse of recognized text; unrecognized input is `Command::None`,
/// never an error.
///
/// " dot " is substituted with "." first so spoken file extensions resolve
/// ("report dot pdf" becomes "report.pdf"). First matching form wins.
pub fn parse(text: &str) -> Command {
    let text = text.trim().to_lowercase().replace(" dot ", ".");

    if let Some(target) = text.strip_prefix("open ") {
        return Command::Open(target.trim().to_string());
    }
    if text == "go back" {
        return Command::GoBack;
    }
    if text == "go forward" {
        return Command::GoForward;
    }
    if let Some(target) = text.strip_prefix("delete ") {
        return Command::Delete(target.trim().to_string());
    }
    if let Some(target) = text.strip_prefix("exit ") {
        return Command::Exit(target.trim().to_string());
    }
    Command::None
}
