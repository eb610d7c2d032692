use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory navigation starts in.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Gesture label list, one label per line in classifier index order.
    #[serde(default = "default_labels")]
    pub labels: PathBuf,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub process: ProcessConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            labels: default_labels(),
            gesture: GestureConfig::default(),
            process: ProcessConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

// ============================================================================
// Gesture Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GestureConfig {
    /// Minimum fist movement (px) that scrolls.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold_px: f32,

    /// Minimum index-finger movement (px) that scrolls horizontally.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,

    /// Pinch-gap change (px) that must be exceeded before a zoom fires.
    #[serde(default = "default_pinch_threshold")]
    pub pinch_threshold_px: f32,

    /// Delay between replayed frames.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: default_scroll_threshold(),
            swipe_threshold_px: default_swipe_threshold(),
            pinch_threshold_px: default_pinch_threshold(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

fn default_scroll_threshold() -> f32 {
    1.0
}

fn default_swipe_threshold() -> f32 {
    5.0
}

fn default_pinch_threshold() -> f32 {
    50.0
}

fn default_frame_interval() -> u64 {
    33
}

// ============================================================================
// Process Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProcessConfig {
    /// How long to wait for a closed program to actually exit.
    #[serde(default = "default_terminate_timeout")]
    pub terminate_timeout_secs: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            terminate_timeout_secs: default_terminate_timeout(),
        }
    }
}

fn default_terminate_timeout() -> u64 {
    5
}

// ============================================================================
// View Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ViewConfig {
    /// Render the directory listing on navigation changes.
    #[serde(default = "default_view_enabled")]
    pub enabled: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            enabled: default_view_enabled(),
        }
    }
}

fn default_view_enabled() -> bool {
    true
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_labels() -> PathBuf {
    PathBuf::from("models/gesture_labels.txt")
}

impl Config {
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            fs::read_to_string(path)
                .ok()
                .and_then(|s| toml::from_str(&s).ok())
                .unwrap_or_default()
        } else {
            Config::default()
        }
    }
}
