//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured session events to the
//! `log` facade (which the binary routes to `tracing-subscriber`).  Per-tick
//! events go out at `debug` so a default `info` filter shows only the
//! lifecycle.

use log::{debug, info};

use crate::app::events::SessionEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SessionEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::PoseLoaded {
                index,
                pose,
                duration_secs,
            } => {
                info!(
                    "POSE  | #{} {} ({}) | {} | {}s",
                    index + 1,
                    pose.name,
                    pose.subtitle,
                    pose.breathing,
                    duration_secs
                );
            }
            SessionEvent::Tick {
                remaining_secs,
                duration_secs,
            } => {
                debug!("TICK  | {}/{}s", remaining_secs, duration_secs);
            }
            SessionEvent::CountdownWarning { remaining_secs } => {
                debug!("WARN  | {}s left", remaining_secs);
            }
            SessionEvent::PoseAdvanced { from, to } => {
                info!("NEXT  | {} -> {}", from + 1, to + 1);
            }
            SessionEvent::SessionComplete {
                total_poses,
                total_secs,
            } => {
                info!("DONE  | poses={} total={}s", total_poses, total_secs);
            }
            SessionEvent::Cue(cue) => {
                debug!("CUE   | {:?}", cue);
            }
            SessionEvent::PauseChanged { paused } => {
                info!("PAUSE | {}", if *paused { "on" } else { "off" });
            }
            SessionEvent::DurationChanged { secs } => {
                info!("HOLD  | {}s per pose", secs);
            }
        }
    }
}
