mod config;
mod gesture;
mod inject;
mod labels;
mod nav;
mod pipeline;
mod platform;
mod view;
mod voice;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Result, ensure};
use clap::{Parser, Subcommand};

use config::{Config, GestureConfig};
use gesture::interpreter::{GestureInterpreter, Thresholds};
use gesture::source::ReplaySource;
use inject::EnigoInjector;
use labels::LabelSet;
use nav::engine::{NavigationEngine, NavigationState};
use nav::lookup::StdFs;
use nav::process::OsProcesses;
use platform::Platform;
use voice::recognizer::StdinRecognizer;

#[derive(Parser)]
#[command(name = "handsfree", about = "Gesture and voice driven file navigation")]
struct Cli {
    /// Print per-frame classifier output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Drive the gesture pipeline from a landmark recording
    Gestures {
        /// JSON-lines landmark recording
        frames: PathBuf,
    },
    /// Voice-driven navigation; reads one utterance per stdin line
    Voice {
        /// Directory to start in (defaults to the configured root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Run both pipelines
    Run {
        /// JSON-lines landmark recording
        frames: PathBuf,
        /// Directory to start in (defaults to the configured root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[hotpath::main]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();
    let platform = Platform::detect();

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))?;

    match cli.command {
        Mode::Gestures { frames } => {
            // A missing recording is the replay analog of a camera that
            // failed to open: fatal before anything starts.
            let source = ReplaySource::open(&frames)?;
            let labels = LabelSet::load(&config.labels)?;
            let mut injector = EnigoInjector::new()?;
            let mut interpreter =
                GestureInterpreter::new(thresholds(&config.gesture), platform.horizontal_scroll);
            pipeline::run_gesture_loop(
                source,
                &labels,
                &mut interpreter,
                &mut injector,
                frame_tick(&config.gesture),
                &running,
                cli.verbose,
            )
        }
        Mode::Voice { root } => run_voice(root, &config, platform, &running),
        Mode::Run { frames, root } => {
            let source = ReplaySource::open(&frames)?;
            let labels = LabelSet::load(&config.labels)?;
            let gesture_thresholds = thresholds(&config.gesture);
            let tick = frame_tick(&config.gesture);
            let horizontal = platform.horizontal_scroll;
            let verbose = cli.verbose;
            let gesture_running = Arc::clone(&running);

            let gesture_thread = thread::spawn(move || {
                // Enigo binds to the session it is created in, so build it
                // on the thread that uses it.
                let mut injector = match EnigoInjector::new() {
                    Ok(injector) => injector,
                    Err(e) => {
                        eprintln!("[gesture] input injector unavailable: {}", e);
                        return;
                    }
                };
                let mut interpreter = GestureInterpreter::new(gesture_thresholds, horizontal);
                if let Err(e) = pipeline::run_gesture_loop(
                    source,
                    &labels,
                    &mut interpreter,
                    &mut injector,
                    tick,
                    &gesture_running,
                    verbose,
                ) {
                    eprintln!("[gesture] pipeline stopped: {}", e);
                }
            });

            let result = run_voice(root, &config, platform, &running);
            running.store(false, Ordering::SeqCst);
            let _ = gesture_thread.join();
            result
        }
    }
}

fn run_voice(
    root: Option<PathBuf>,
    config: &Config,
    platform: Platform,
    running: &AtomicBool,
) -> Result<()> {
    let root = root.unwrap_or_else(|| config.root.clone());
    ensure!(
        root.is_dir(),
        "navigation root {} is not a directory",
        root.display()
    );

    let (refresh_tx, refresh_rx) = flume::unbounded();
    let view = config.view.enabled.then(|| view::spawn(refresh_rx));

    let engine = NavigationEngine::new(
        NavigationState::new(root),
        StdFs,
        OsProcesses::new(platform),
        refresh_tx,
        Duration::from_secs(config.process.terminate_timeout_secs),
    );
    engine.notify_view();

    let result = pipeline::run_voice_loop(StdinRecognizer::new(), engine, running);

    // The engine (and with it the refresh sender) is gone once the loop
    // returns, so the view drains and exits.
    if let Some(handle) = view {
        let _ = handle.join();
    }
    result
}

fn thresholds(config: &GestureConfig) -> Thresholds {
    Thresholds {
        scroll_px: config.scroll_threshold_px,
        swipe_px: config.swipe_threshold_px,
        pinch_px: config.pinch_threshold_px,
    }
}

fn frame_tick(config: &GestureConfig) -> Duration {
    Duration::from_millis(config.frame_interval_ms)
}
