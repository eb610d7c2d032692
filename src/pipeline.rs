//! The two continuous loops: a per-frame gesture tick and a blocking
//! listen-then-handle voice loop. Each runs on its own thread; they share
//! nothing but the running flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::gesture::interpreter::{GestureInterpreter, Observation};
use crate::gesture::source::GestureSource;
use crate::inject::InputInjector;
use crate::labels::LabelSet;
use crate::nav::engine::{NavigationEngine, Outcome};
use crate::nav::lookup::Lookup;
use crate::nav::process::ProcessController;
use crate::voice::command;
use crate::voice::recognizer::{Recognition, SpeechRecognizer};

/// Drains the frame source until it closes or the running flag drops.
/// Injection failures are reported once per action, never retried.
pub fn run_gesture_loop(
    mut source: impl GestureSource,
    labels: &LabelSet,
    interpreter: &mut GestureInterpreter,
    injector: &mut impl InputInjector,
    tick: Duration,
    running: &AtomicBool,
    verbose: bool,
) -> Result<()> {
    while running.load(Ordering::SeqCst) {
        let Some(frame) = source.next_frame()? else {
            break;
        };

        if verbose {
            if let Some(hand) = &frame.hand {
                let name = labels.name(hand.label).unwrap_or("?");
                let confidence = hand.confidences.get(hand.label).copied().unwrap_or(0.0);
                eprintln!("[gesture] {} ({:.2})", name, confidence);
            }
        }

        let observation = frame.hand.as_ref().map(|hand| Observation {
            gesture: labels.gesture(hand.label),
            hand: &hand.landmarks,
        });

        for action in interpreter.update(observation) {
            if let Err(e) = injector.apply(action) {
                eprintln!("[gesture] {}", e);
            }
        }

        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }
    Ok(())
}

/// Blocks on the recognizer until its input closes or the running flag
/// drops. Every outcome and failure is reported exactly once.
pub fn run_voice_loop<R, F, P>(
    mut recognizer: R,
    mut engine: NavigationEngine<F, P>,
    running: &AtomicBool,
) -> Result<()>
where
    R: SpeechRecognizer,
    F: Lookup,
    P: ProcessController,
{
    while running.load(Ordering::SeqCst) {
        let Some(recognition) = recognizer.listen()? else {
            break;
        };
        match recognition {
            Recognition::Text(text) => {
                println!("heard: {}", text);
                match engine.handle(command::parse(&text)) {
                    Ok(Outcome::Ignored) => {}
                    Ok(outcome) => println!("{}", outcome),
                    Err(e) => eprintln!("{}", e),
                }
            }
            Recognition::Unintelligible => eprintln!("[voice] could not understand"),
            Recognition::ServiceError(msg) => eprintln!("[voice] recognition error: {}", msg),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::interpreter::{Action, Thresholds};
    use crate::gesture::landmarks::LANDMARK_COUNT;
    use crate::gesture::source::ReplaySource;
    use crate::inject::InjectError;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingInjector {
        actions: Vec<Action>,
    }

    impl InputInjector for RecordingInjector {
        fn vertical_scroll(&mut self, delta: i32) -> Result<(), InjectError> {
            self.actions.push(Action::VerticalScroll(delta));
            Ok(())
        }

        fn horizontal_scroll(&mut self, delta: i32) -> Result<(), InjectError> {
            self.actions.push(Action::HorizontalScroll(delta));
            Ok(())
        }

        fn zoom_in(&mut self) -> Result<(), InjectError> {
            self.actions.push(Action::ZoomIn);
            Ok(())
        }

        fn zoom_out(&mut self) -> Result<(), InjectError> {
            self.actions.push(Action::ZoomOut);
            Ok(())
        }
    }

    fn fist_row(y: f32, confidence: f32) -> String {
        let pairs: Vec<String> = (0..LANDMARK_COUNT)
            .map(|_| format!("[100.0,{}]", y))
            .collect();
        format!(
            "{{\"landmarks\":[{}],\"label\":1,\"confidences\":[0.0,{}]}}",
            pairs.join(","),
            confidence
        )
    }

    #[test]
    fn replayed_fist_frames_scroll_and_gaps_reset() {
        let recording = [
            fist_row(100.0, 0.9),
            fist_row(103.0, 0.4),          // +3 -> scroll
            "{\"landmarks\":null}".into(), // hand lost
            fist_row(150.0, 0.9),          // re-arm only, no delta across the gap
            fist_row(150.0, 0.2),          // zero delta -> silent
            fist_row(151.0, 0.9),          // +1 -> scroll
        ]
        .join("\n");

        let labels = LabelSet::from_names(["Open", "Fist", "Swipe", "Pinch"]);
        let mut interpreter = GestureInterpreter::new(Thresholds::default(), true);
        let mut injector = RecordingInjector::default();
        let running = AtomicBool::new(true);

        run_gesture_loop(
            ReplaySource::from_reader(Cursor::new(recording)),
            &labels,
            &mut interpreter,
            &mut injector,
            Duration::ZERO,
            &running,
            false,
        )
        .unwrap();

        // Confidence values varied per frame above; they must not matter.
        assert_eq!(
            injector.actions,
            vec![Action::VerticalScroll(3), Action::VerticalScroll(1)]
        );
    }

    #[test]
    fn stopped_flag_halts_the_loop_immediately() {
        let recording = fist_row(100.0, 0.9);
        let labels = LabelSet::from_names(["Open", "Fist"]);
        let mut interpreter = GestureInterpreter::new(Thresholds::default(), true);
        let mut injector = RecordingInjector::default();
        let running = AtomicBool::new(false);

        run_gesture_loop(
            ReplaySource::from_reader(Cursor::new(recording)),
            &labels,
            &mut interpreter,
            &mut injector,
            Duration::ZERO,
            &running,
            false,
        )
        .unwrap();

        assert!(injector.actions.is_empty());
    }
}
