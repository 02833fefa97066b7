//! Outbound session events.
//!
//! The [`PracticeSession`](super::service::PracticeSession) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log a line, redraw a terminal,
//! ring a bell.

use heapless::Vec;

use crate::catalog::{MAX_POSES, PoseDescriptor};
use crate::fsm::StateId;

/// Short audible signal requested by the session.  Fire-and-forget; a sink
/// that cannot play sound simply ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// One tick inside the countdown window.
    Countdown,
    /// The current pose is ending (expiry or skip).
    PoseChange,
    /// The final pose ended.
    Completion,
}

/// Structured events emitted by the session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A pose became current.  `index` is 0-based.
    PoseLoaded {
        index: usize,
        pose: PoseDescriptor,
        duration_secs: u32,
    },

    /// One admitted second elapsed.
    Tick {
        remaining_secs: u32,
        duration_secs: u32,
    },

    /// `remaining_secs` is inside the countdown window.
    CountdownWarning { remaining_secs: u32 },

    /// The sequence moved forward by one pose.
    PoseAdvanced { from: usize, to: usize },

    /// The last pose ended.  Emitted once per run.
    SessionComplete { total_poses: usize, total_secs: u32 },

    /// An audible cue should be played.
    Cue(Cue),

    /// Pause flag flipped (toggle, or cleared by a pose load).
    PauseChanged { paused: bool },

    /// The configured hold duration changed.
    DurationChanged { secs: u32 },
}

// ───────────────────────────────────────────────────────────────
// Progress view
// ───────────────────────────────────────────────────────────────

/// Per-pose marker for the progress dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotStatus {
    Completed,
    Active,
    Upcoming,
}

/// A point-in-time view of the session suitable for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: StateId,
    pub pose_index: usize,
    pub pose_count: usize,
    pub time_remaining: u32,
    /// Duration the current pose was loaded with.
    pub pose_duration: u32,
    /// Duration future poses will be loaded with.
    pub configured_duration: u32,
    pub paused: bool,
    pub running: bool,
    /// `pose_index / pose_count * 100`, or 100 once complete.
    pub progress_percent: f32,
    pub dots: Vec<DotStatus, MAX_POSES>,
}

impl SessionSnapshot {
    /// Fraction of the current pose still to hold, in `[0, 1]`.
    pub fn pose_fraction_remaining(&self) -> f32 {
        if self.pose_duration == 0 {
            0.0
        } else {
            self.time_remaining as f32 / self.pose_duration as f32
        }
    }
}

/// Dot markers for `pose_count` poses: the first `completed` are done, and
/// the next one is marked `Active` only while a pose is running.
pub(crate) fn dot_statuses(
    pose_count: usize,
    completed: usize,
    running: bool,
) -> Vec<DotStatus, MAX_POSES> {
    (0..pose_count.min(MAX_POSES))
        .map(|i| match i.cmp(&completed) {
            core::cmp::Ordering::Less => DotStatus::Completed,
            core::cmp::Ordering::Equal if running => DotStatus::Active,
            _ => DotStatus::Upcoming,
        })
        .collect()
}
