//! Inbound commands to the practice session.
//!
//! These represent actions requested by the outside world (console, tests,
//! a future GUI) that the [`PracticeSession`](super::service::PracticeSession)
//! interprets and acts upon.

/// Commands that front-ends can send into the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin from NotStarted.  Ignored once a run has begun.
    Start,

    /// Flip the pause flag while Active.
    TogglePause,

    /// End the current pose now.
    Skip,

    /// Re-initialise to the first pose from any state.
    Restart,

    /// Shift the hold duration by a signed number of seconds.
    AdjustDuration(i64),

    /// One step up.
    IncreaseDuration,

    /// One step down.
    DecreaseDuration,

    /// Jump to a preset hold duration.
    SetPreset(i64),

    /// Persist the current hold duration now.
    SavePreferences,
}
