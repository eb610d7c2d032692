//! Turns the per-frame classifier output into discrete scroll and zoom
//! actions.
//!
//! Each dynamic gesture kind keeps its own tracked scalar (fist Y, index
//! X, pinch gap). A kind only fires once the scalar moves further than its
//! threshold between consecutive frames of the same gesture; the scalar is
//! re-anchored every frame either way, so slow continuous motion keeps
//! emitting small deltas instead of one large one.

use crate::gesture::landmarks::Hand;
use crate::labels::Gesture;

/// Instantaneous side effect requested by the interpreter. Consumed
/// immediately by the input injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    VerticalScroll(i32),
    HorizontalScroll(i32),
    ZoomIn,
    ZoomOut,
}

/// One classified hand for a single frame. `gesture` is `None` for labels
/// with no dynamic behavior.
pub struct Observation<'a> {
    pub gesture: Option<Gesture>,
    pub hand: &'a Hand,
}

/// Per-kind tracking state: either idle or anchored at the last seen value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Track {
    #[default]
    Idle,
    Tracking(f32),
}

impl Track {
    /// Re-anchors at `value`, returning the delta from the previous anchor
    /// if one existed.
    fn advance(&mut self, value: f32) -> Option<f32> {
        let delta = match *self {
            Track::Tracking(last) => Some(value - last),
            Track::Idle => None,
        };
        *self = Track::Tracking(value);
        delta
    }
}

/// Movement thresholds in pixels. The defaults are uncalibrated constants
/// carried over from field use.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub scroll_px: f32,
    pub swipe_px: f32,
    pub pinch_px: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            scroll_px: 1.0,
            swipe_px: 5.0,
            pinch_px: 50.0,
        }
    }
}

pub struct GestureInterpreter {
    fist_y: Track,
    swipe_x: Track,
    pinch_gap: Track,
    thresholds: Thresholds,
    /// Resolved once at startup; when false the swipe tracker never arms.
    horizontal_scroll: bool,
}

impl GestureInterpreter {
    pub fn new(thresholds: Thresholds, horizontal_scroll: bool) -> Self {
        Self {
            fist_y: Track::Idle,
            swipe_x: Track::Idle,
            pinch_gap: Track::Idle,
            thresholds,
            horizontal_scroll,
        }
    }

    /// Feeds one frame. `None` means no hand was visible; all trackers
    /// reset so the next detection cannot produce a delta across the gap.
    pub fn update(&mut self, observation: Option<Observation<'_>>) -> Vec<Action> {
        let Some(obs) = observation else {
            self.fist_y = Track::Idle;
            self.swipe_x = Track::Idle;
            self.pinch_gap = Track::Idle;
            return Vec::new();
        };

        let mut actions = Vec::new();

        if obs.gesture == Some(Gesture::Fist) {
            let (_, y) = obs.hand.center();
            if let Some(dy) = self.fist_y.advance(y) {
                if dy.abs() >= self.thresholds.scroll_px {
                    actions.push(Action::VerticalScroll(dy as i32));
                }
            }
        } else {
            self.fist_y = Track::Idle;
        }

        if obs.gesture == Some(Gesture::Swipe) && self.horizontal_scroll {
            let x = obs.hand.index_tip().x;
            if let Some(dx) = self.swipe_x.advance(x) {
                if dx.abs() >= self.thresholds.swipe_px {
                    actions.push(Action::HorizontalScroll(dx as i32));
                }
            }
        } else {
            self.swipe_x = Track::Idle;
        }

        if obs.gesture == Some(Gesture::Pinch) {
            let gap = obs.hand.pinch_gap();
            if let Some(delta) = self.pinch_gap.advance(gap) {
                // Strictly directional: a change of exactly the threshold
                // does not zoom.
                if delta < -self.thresholds.pinch_px {
                    actions.push(Action::ZoomOut);
                } else if delta > self.thresholds.pinch_px {
                    actions.push(Action::ZoomIn);
                }
            }
        } else {
            self.pinch_gap = Track::Idle;
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::landmarks::{INDEX_TIP, LANDMARK_COUNT, Landmark, THUMB_TIP};

    fn uniform_hand(x: f32, y: f32) -> Hand {
        Hand::new([Landmark { x, y }; LANDMARK_COUNT])
    }

    fn swipe_hand(index_x: f32) -> Hand {
        let mut points = [Landmark { x: 0.0, y: 0.0 }; LANDMARK_COUNT];
        points[INDEX_TIP] = Landmark { x: index_x, y: 0.0 };
        Hand::new(points)
    }

    fn pinch_hand(gap: f32) -> Hand {
        let mut points = [Landmark { x: 0.0, y: 0.0 }; LANDMARK_COUNT];
        points[THUMB_TIP] = Landmark { x: 0.0, y: 0.0 };
        points[INDEX_TIP] = Landmark { x: gap, y: 0.0 };
        Hand::new(points)
    }

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::new(Thresholds::default(), true)
    }

    fn feed(it: &mut GestureInterpreter, gesture: Gesture, hand: &Hand) -> Vec<Action> {
        it.update(Some(Observation {
            gesture: Some(gesture),
            hand,
        }))
    }

    #[test]
    fn first_fist_frame_only_arms() {
        let mut it = interpreter();
        assert!(feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0)).is_empty());
    }

    #[test]
    fn fist_zero_delta_updates_state_silently() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0));
        assert!(feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0)).is_empty());
        // The anchor moved with the silent frame, so only the last step
        // counts now.
        assert_eq!(
            feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 103.0)),
            vec![Action::VerticalScroll(3)]
        );
    }

    #[test]
    fn fist_unit_delta_scrolls() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0));
        assert_eq!(
            feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 101.0)),
            vec![Action::VerticalScroll(1)]
        );
        assert_eq!(
            feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 96.0)),
            vec![Action::VerticalScroll(-5)]
        );
    }

    #[test]
    fn no_hand_frame_breaks_the_chain() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0));
        assert!(it.update(None).is_empty());
        // Coordinates differ wildly, yet the frame after the gap must not
        // fire - it only re-arms.
        assert!(feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 400.0)).is_empty());
        assert_eq!(
            feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 402.0)),
            vec![Action::VerticalScroll(2)]
        );
    }

    #[test]
    fn label_change_resets_only_that_kind() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 100.0));
        // A pinch frame resets the fist tracker while arming the pinch one.
        feed(&mut it, Gesture::Pinch, &pinch_hand(10.0));
        assert!(feed(&mut it, Gesture::Fist, &uniform_hand(100.0, 150.0)).is_empty());
    }

    #[test]
    fn pinch_boundary_is_strict() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Pinch, &pinch_hand(100.0));
        assert!(feed(&mut it, Gesture::Pinch, &pinch_hand(50.0)).is_empty());

        let mut it = interpreter();
        feed(&mut it, Gesture::Pinch, &pinch_hand(100.0));
        assert_eq!(
            feed(&mut it, Gesture::Pinch, &pinch_hand(49.0)),
            vec![Action::ZoomOut]
        );

        let mut it = interpreter();
        feed(&mut it, Gesture::Pinch, &pinch_hand(100.0));
        assert_eq!(
            feed(&mut it, Gesture::Pinch, &pinch_hand(151.0)),
            vec![Action::ZoomIn]
        );
    }

    #[test]
    fn swipe_scrolls_horizontally_past_threshold() {
        let mut it = interpreter();
        feed(&mut it, Gesture::Swipe, &swipe_hand(100.0));
        assert!(feed(&mut it, Gesture::Swipe, &swipe_hand(104.0)).is_empty());
        assert_eq!(
            feed(&mut it, Gesture::Swipe, &swipe_hand(110.0)),
            vec![Action::HorizontalScroll(6)]
        );
    }

    #[test]
    fn swipe_never_fires_when_unsupported() {
        let mut it = GestureInterpreter::new(Thresholds::default(), false);
        assert!(feed(&mut it, Gesture::Swipe, &swipe_hand(0.0)).is_empty());
        assert!(feed(&mut it, Gesture::Swipe, &swipe_hand(500.0)).is_empty());
        assert!(feed(&mut it, Gesture::Swipe, &swipe_hand(0.0)).is_empty());
    }

    #[test]
    fn replaying_a_sequence_is_deterministic() {
        let frames = [
            (Gesture::Fist, uniform_hand(0.0, 10.0)),
            (Gesture::Fist, uniform_hand(0.0, 14.0)),
            (Gesture::Pinch, pinch_hand(200.0)),
            (Gesture::Pinch, pinch_hand(20.0)),
            (Gesture::Fist, uniform_hand(0.0, 14.0)),
        ];
        let run = || {
            let mut it = interpreter();
            frames
                .iter()
                .flat_map(|(gesture, hand)| feed(&mut it, *gesture, hand))
                .collect::<Vec<_>>()
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(first, vec![Action::VerticalScroll(4), Action::ZoomOut]);
    }
}
