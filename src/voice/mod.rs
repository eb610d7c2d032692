//! The voice half of the system: recognized text in, navigation commands
//! out.

pub mod command;
pub mod recognizer;
