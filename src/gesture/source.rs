//! Frame sources for the gesture pipeline.
//!
//! The estimator and the classification model are external: they sit
//! behind the `HandTracker` and `GestureClassifier` traits and get
//! composed into a `GestureSource` by `ClassifyingSource`. `ReplaySource`
//! drives the same pipeline from a landmark recording instead, so the
//! binary runs without camera hardware.

#![allow(dead_code)] // the estimator/classifier seams are only driven by tests until real capture backends land

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::gesture::landmarks::{FeatureVector, Hand, LANDMARK_COUNT, normalize};

/// Hand detection result for one camera frame. `Empty` means the frame was
/// processed but no hand was visible.
pub enum CameraFrame {
    Hand(Hand),
    Empty,
}

/// External pose estimator: raw video in, at most one hand out.
/// `None` means the underlying stream closed.
pub trait HandTracker {
    fn next_frame(&mut self) -> Result<Option<CameraFrame>>;
}

/// Per-label scores aligned to the label list. Display only - the selected
/// label index is authoritative.
#[derive(Debug, Clone)]
pub struct Classification {
    pub label: usize,
    pub confidences: Vec<f32>,
}

/// External gesture model consuming the normalized feature vector.
pub trait GestureClassifier {
    fn classify(&mut self, features: &FeatureVector) -> Classification;
}

#[derive(Debug, Clone)]
pub struct ClassifiedHand {
    pub landmarks: Hand,
    pub label: usize,
    pub confidences: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct GestureFrame {
    pub hand: Option<ClassifiedHand>,
}

/// One fully classified frame per tick; `None` means the source closed.
pub trait GestureSource {
    fn next_frame(&mut self) -> Result<Option<GestureFrame>>;
}

/// Composes an estimator and a classifier into a frame source.
pub struct ClassifyingSource<T, C> {
    tracker: T,
    classifier: C,
}

impl<T, C> ClassifyingSource<T, C> {
    pub fn new(tracker: T, classifier: C) -> Self {
        Self {
            tracker,
            classifier,
        }
    }
}

impl<T: HandTracker, C: GestureClassifier> GestureSource for ClassifyingSource<T, C> {
    fn next_frame(&mut self) -> Result<Option<GestureFrame>> {
        let Some(frame) = self.tracker.next_frame()? else {
            return Ok(None);
        };
        let hand = match frame {
            CameraFrame::Empty => None,
            CameraFrame::Hand(landmarks) => {
                let features = normalize(&landmarks);
                let classification = self.classifier.classify(&features);
                Some(ClassifiedHand {
                    landmarks,
                    label: classification.label,
                    confidences: classification.confidences,
                })
            }
        };
        Ok(Some(GestureFrame { hand }))
    }
}

/// Replays a landmark recording, one JSON object per line:
///
/// ```text
/// {"landmarks": [[x, y], ...21 pairs], "label": 1, "confidences": [...]}
/// {"landmarks": null}
/// ```
///
/// A null landmark list is a frame with no visible hand.
pub struct ReplaySource<R> {
    reader: R,
    line: String,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open landmark recording {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct ReplayRow {
    landmarks: Option<Vec<[f32; 2]>>,
    #[serde(default)]
    label: usize,
    #[serde(default)]
    confidences: Vec<f32>,
}

impl<R: BufRead> GestureSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<GestureFrame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let row: ReplayRow =
                serde_json::from_str(trimmed).context("malformed landmark recording line")?;
            let hand = match row.landmarks {
                None => None,
                Some(pairs) => {
                    let landmarks = Hand::from_pairs(&pairs).ok_or_else(|| {
                        anyhow!("expected {} landmarks, got {}", LANDMARK_COUNT, pairs.len())
                    })?;
                    Some(ClassifiedHand {
                        landmarks,
                        label: row.label,
                        confidences: row.confidences,
                    })
                }
            };
            return Ok(Some(GestureFrame { hand }));
        }
    }
}
