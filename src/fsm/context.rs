//! Shared mutable context threaded through every FSM handler.
//!
//! `SessionContext` is the single struct that state handlers read from and
//! write to: the catalog, the pose cursor, the tick gate, the duration
//! configuration and an outbox of [`SessionEvent`]s.  The service drains
//! the outbox into an [`EventSink`](crate::app::ports::EventSink) after
//! every operation, so handlers never touch a collaborator directly.

use crate::app::events::SessionEvent;
use crate::catalog::{PoseCatalog, PoseDescriptor};
use crate::config::{DurationConfig, PracticeConfig};
use crate::timer::SessionTimer;

/// The shared context passed to every state handler function.
pub struct SessionContext {
    // -- Timing --
    /// The one tick gate for this session.
    pub timer: SessionTimer,

    // -- Sequence --
    pub catalog: PoseCatalog,
    /// 0-based index of the loaded pose.
    pub pose_index: usize,
    /// Seconds left on the loaded pose.
    pub time_remaining: u32,
    /// Duration the loaded pose was started with.  Read from
    /// `durations` once per pose load and fixed until the next one.
    pub pose_duration: u32,
    pub paused: bool,

    // -- Configuration --
    pub durations: DurationConfig,
    pub config: PracticeConfig,

    // -- Outputs --
    outbox: Vec<SessionEvent>,
}

impl SessionContext {
    pub fn new(catalog: PoseCatalog, durations: DurationConfig, config: PracticeConfig) -> Self {
        let seconds = durations.snapshot();
        Self {
            timer: SessionTimer::new(),
            catalog,
            pose_index: 0,
            time_remaining: seconds,
            pose_duration: seconds,
            paused: false,
            durations,
            config,
            outbox: Vec::new(),
        }
    }

    /// Queue an event for the sink.
    pub fn emit(&mut self, event: SessionEvent) {
        self.outbox.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn current_pose(&self) -> &PoseDescriptor {
        // pose_index is kept below catalog.len() by the state handlers.
        &self.catalog.as_slice()[self.pose_index]
    }

    pub fn pose_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_last_pose(&self) -> bool {
        self.pose_index >= self.catalog.last_index()
    }

    /// `true` if `remaining` falls in the countdown window.
    pub fn in_countdown(&self, remaining: u32) -> bool {
        remaining > 0 && remaining <= self.config.countdown_warning_secs
    }
}
