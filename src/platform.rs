//! Platform capabilities, resolved once at startup instead of re-queried
//! per frame.

#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Horizontal scroll injection works here.
    pub horizontal_scroll: bool,
    /// Untracked programs can be closed by name here.
    pub close_by_name: bool,
}

impl Platform {
    pub fn detect() -> Self {
        Self {
            horizontal_scroll: cfg!(target_os = "macos"),
            close_by_name: cfg!(any(target_os = "macos", target_os = "windows")),
        }
    }
}
