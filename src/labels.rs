//! Gesture label list - one label per line, line order matching the
//! classifier's output index order.
//!
//! The label file is the only persisted artifact of the system. Labels that
//! drive dynamic behavior map to a closed `Gesture` kind; everything else is
//! display-only.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};

/// Dynamic gesture kinds the interpreter tracks across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Fist,
    Swipe,
    Pinch,
}

impl Gesture {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "fist" => Some(Gesture::Fist),
            "swipe" => Some(Gesture::Swipe),
            "pinch" => Some(Gesture::Pinch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct LabelEntry {
    name: String,
    gesture: Option<Gesture>,
}

/// The fixed label set loaded at startup, addressed by classifier index.
#[derive(Debug, Clone)]
pub struct LabelSet {
    entries: Vec<LabelEntry>,
}

impl LabelSet {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read gesture labels from {}", path.display()))?;
        // Label files exported on Windows tend to carry a UTF-8 BOM.
        let set = Self::from_names(raw.trim_start_matches('\u{feff}').lines());
        ensure!(
            !set.is_empty(),
            "gesture label file {} is empty",
            path.display()
        );
        Ok(set)
    }

    /// Builds a label set from names already in classifier index order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| {
                let gesture = Gesture::from_name(&name);
                LabelEntry { name, gesture }
            })
            .collect();
        Self { entries }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.name.as_str())
    }

    /// Dynamic kind for a classifier label, if the label drives one.
    pub fn gesture(&self, index: usize) -> Option<Gesture> {
        self.entries.get(index).and_then(|entry| entry.gesture)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
