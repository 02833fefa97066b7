//! Namaskar — terminal front-end.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  console reader   TerminalCueSink   LogEventSink               │
//! │  (stdin thread)   (EventSink)       (EventSink)                │
//! │  FilePreferenceStore   ImageCache<FsImageLoader>               │
//! │  (PreferencePort)      (ImagePort)                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            PracticeSession (pure logic)                │    │
//! │  │  FSM · SessionTimer · DurationConfig                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Metronome (tick thread) ──▶ EventQueue ◀── console reader     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::{self, BufReader};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use namaskar::PracticeSession;
use namaskar::adapters::console::{self, HELP};
use namaskar::adapters::cue_sink::{BoxedImages, TerminalCueSink};
use namaskar::adapters::image_cache::{FsImageLoader, ImageCache};
use namaskar::adapters::log_sink::LogEventSink;
use namaskar::adapters::prefs::FilePreferenceStore;
use namaskar::app::commands::SessionCommand;
use namaskar::app::ports::ImagePort;
use namaskar::catalog::PoseCatalog;
use namaskar::config::{DurationConfig, PracticeConfig};
use namaskar::drivers::metronome::Metronome;
use namaskar::events::{EventQueue, RuntimeEvent};

// ── Logging ───────────────────────────────────────────────────

/// Install the `log` backend: records go to stderr, filtered by `RUST_LOG`
/// (default `info`).  Stdout belongs to the terminal front-end.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging();
    info!("Namaskar v{}", env!("CARGO_PKG_VERSION"));

    let config = PracticeConfig::from_env();
    let catalog = PoseCatalog::surya_namaskar();

    // ── 2. Preferences ────────────────────────────────────────
    let mut prefs = FilePreferenceStore::new(&config.preference_path, config.preference_key.clone());
    let mut session = PracticeSession::new(catalog.clone(), DurationConfig::default(), config.clone());
    session.load_preferences(&prefs);
    info!("Hold duration: {}s per pose", session.configured_duration());

    // ── 3. Pose images ────────────────────────────────────────
    let loader: Box<dyn ImagePort + Send> = Box::new(FsImageLoader::new(&config.assets_dir));
    let mut images: BoxedImages = ImageCache::new(loader);
    let summary = images.preload(&catalog);
    if summary.failed > 0 {
        warn!(
            "{} of {} pose images unavailable under {}",
            summary.failed,
            catalog.len(),
            config.assets_dir.display()
        );
    }

    // ── 4. Sinks ──────────────────────────────────────────────
    let terminal = TerminalCueSink::new(io::stdout(), catalog.len()).with_images(images);
    let mut sink = (LogEventSink::new(), terminal);

    // ── 5. Producers ──────────────────────────────────────────
    let queue = EventQueue::new();
    let period = Duration::from_millis(u64::from(config.tick_interval_ms));
    let mut metronome = Metronome::spawn(period, session.timer_epoch(), queue.clone())
        .context("starting metronome thread")?;
    // The reader blocks on stdin; it is left detached and dies with the process.
    console::spawn_reader(BufReader::new(io::stdin()), io::stdout(), queue.clone())
        .context("starting console reader")?;

    println!("Surya Namaskar · {} poses · {}s each", catalog.len(), session.configured_duration());
    println!("{HELP}");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        match queue.wait() {
            RuntimeEvent::Tick(stamp) => {
                session.on_tick(stamp, &mut sink);
            }
            RuntimeEvent::Command(SessionCommand::SavePreferences) => {
                match session.save_preferences(&mut prefs) {
                    Ok(()) => println!("   saved: {}s per pose", session.configured_duration()),
                    Err(e) => println!("   could not save ({e})"),
                }
            }
            RuntimeEvent::Command(cmd) => {
                if !session.handle_command(cmd, &mut prefs, &mut sink) {
                    debug!("{:?} ignored in {:?}", cmd, session.state());
                }
            }
            RuntimeEvent::Shutdown => break,
        }
    }

    // ── 7. Shutdown ───────────────────────────────────────────
    metronome.stop();
    info!("Leaving after {} completed run(s)", session.runs_completed());
    Ok(())
}
