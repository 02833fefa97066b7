//! Mock adapters for integration tests.
//!
//! Records every emitted event so tests can assert on the full history,
//! and provides a preference store whose reads and writes can be made to
//! fail on demand.

use namaskar::PracticeSession;
use namaskar::app::events::{Cue, SessionEvent};
use namaskar::app::ports::{EventSink, PreferenceError, PreferencePort};
use namaskar::catalog::PoseCatalog;
use namaskar::config::{DurationConfig, PracticeConfig};

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SessionEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn ticks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Tick { .. }))
            .count()
    }

    pub fn warnings(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::CountdownWarning { remaining_secs } => Some(*remaining_secs),
                _ => None,
            })
            .collect()
    }

    pub fn loaded(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PoseLoaded { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn advances(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::PoseAdvanced { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn cues(&self, cue: Cue) -> usize {
        self.events
            .iter()
            .filter(|e| **e == SessionEvent::Cue(cue))
            .count()
    }

    pub fn completions(&self) -> Vec<(usize, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::SessionComplete {
                    total_poses,
                    total_secs,
                } => Some((*total_poses, *total_secs)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

// ── FlakyPrefs ────────────────────────────────────────────────

/// Raw-string preference store with switchable failures.
#[derive(Default)]
pub struct FlakyPrefs {
    pub raw: Option<String>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub saves: usize,
}

#[allow(dead_code)]
impl FlakyPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Some(raw.to_string()),
            ..Self::default()
        }
    }
}

impl PreferencePort for FlakyPrefs {
    fn load(&self) -> Result<Option<i64>, PreferenceError> {
        if self.fail_load {
            return Err(PreferenceError::Io);
        }
        match &self.raw {
            None => Ok(None),
            Some(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| PreferenceError::Corrupted),
        }
    }

    fn save(&mut self, seconds: u32) -> Result<(), PreferenceError> {
        if self.fail_save {
            return Err(PreferenceError::Io);
        }
        self.saves += 1;
        self.raw = Some(seconds.to_string());
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────

#[allow(dead_code)]
pub fn make_session(duration: i64) -> PracticeSession {
    PracticeSession::new(
        PoseCatalog::surya_namaskar(),
        DurationConfig::new(duration),
        PracticeConfig::default(),
    )
}

/// Deliver one tick stamped with the live generation.
#[allow(dead_code)]
pub fn tick(session: &mut PracticeSession, sink: &mut RecordingSink) -> bool {
    let stamp = session.current_stamp();
    session.on_tick(stamp, sink)
}

#[allow(dead_code)]
pub fn tick_n(session: &mut PracticeSession, sink: &mut RecordingSink, n: usize) -> usize {
    (0..n).filter(|_| tick(session, sink)).count()
}
