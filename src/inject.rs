//! OS input injection for gesture actions.

use std::fmt;

use enigo::{Axis, Direction, Enigo, Key, Keyboard, Mouse, Settings};

use crate::gesture::interpreter::Action;

#[derive(Debug)]
pub struct InjectError(String);

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input injection failed: {}", self.0)
    }
}

impl std::error::Error for InjectError {}

pub trait InputInjector {
    fn vertical_scroll(&mut self, delta: i32) -> Result<(), InjectError>;
    fn horizontal_scroll(&mut self, delta: i32) -> Result<(), InjectError>;
    fn zoom_in(&mut self) -> Result<(), InjectError>;
    fn zoom_out(&mut self) -> Result<(), InjectError>;

    fn apply(&mut self, action: Action) -> Result<(), InjectError> {
        match action {
            Action::VerticalScroll(delta) => self.vertical_scroll(delta),
            Action::HorizontalScroll(delta) => self.horizontal_scroll(delta),
            Action::ZoomIn => self.zoom_in(),
            Action::ZoomOut => self.zoom_out(),
        }
    }
}

/// Sends real scroll and zoom-hotkey events through enigo.
pub struct EnigoInjector {
    enigo: Enigo,
}

impl EnigoInjector {
    pub fn new() -> Result<Self, InjectError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InjectError(format!("failed to initialize enigo: {}", e)))?;
        Ok(Self { enigo })
    }

    /// Platform-specific zoom modifier (Cmd on macOS, Ctrl elsewhere).
    fn modifier_key() -> Key {
        #[cfg(target_os = "macos")]
        {
            Key::Meta
        }
        #[cfg(not(target_os = "macos"))]
        {
            Key::Control
        }
    }

    fn zoom_combo(&mut self, key: char) -> Result<(), InjectError> {
        let modifier = Self::modifier_key();
        self.enigo
            .key(modifier, Direction::Press)
            .map_err(|e| InjectError(e.to_string()))?;
        let clicked = self
            .enigo
            .key(Key::Unicode(key), Direction::Click)
            .map_err(|e| InjectError(e.to_string()));
        // Release the modifier even when the click failed.
        self.enigo
            .key(modifier, Direction::Release)
            .map_err(|e| InjectError(e.to_string()))?;
        clicked
    }
}

impl InputInjector for EnigoInjector {
    fn vertical_scroll(&mut self, delta: i32) -> Result<(), InjectError> {
        self.enigo
            .scroll(delta, Axis::Vertical)
            .map_err(|e| InjectError(e.to_string()))
    }

    fn horizontal_scroll(&mut self, delta: i32) -> Result<(), InjectError> {
        self.enigo
            .scroll(delta, Axis::Horizontal)
            .map_err(|e| InjectError(e.to_string()))
    }

    fn zoom_in(&mut self) -> Result<(), InjectError> {
        self.zoom_combo('+')
    }

    fn zoom_out(&mut self) -> Result<(), InjectError> {
        self.zoom_combo('-')
    }
}
