//! Practice session — the hexagonal core.
//!
//! [`PracticeSession`] owns the FSM, the tick gate and the shared context.
//! It exposes a front-end-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  TickStamp ───▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │     PracticeSession      │
//!  SessionCommand▶│  FSM · SessionTimer      │ ◀─▶ PreferencePort
//!                 └──────────────────────────┘
//! ```
//!
//! Every public operation runs to completion before returning, then drains
//! the context outbox into the sink in emission order.

use log::{debug, info, warn};

use crate::catalog::{PoseCatalog, PoseDescriptor};
use crate::config::{DurationConfig, PracticeConfig};
use crate::fsm::context::SessionContext;
use crate::fsm::states::{advance, build_state_table};
use crate::fsm::{Fsm, StateId};
use crate::report::SessionReport;
use crate::timer::{TickStamp, TimerEpoch};

use super::commands::SessionCommand;
use super::events::{Cue, SessionEvent, SessionSnapshot, dot_statuses};
use super::ports::{EventSink, PreferencePort};

// ───────────────────────────────────────────────────────────────
// PracticeSession
// ───────────────────────────────────────────────────────────────

/// One guided run through a pose catalog.  Reusable via [`restart`].
///
/// [`restart`]: PracticeSession::restart
pub struct PracticeSession {
    fsm: Fsm,
    ctx: SessionContext,
    runs_completed: u32,
    last_report: Option<SessionReport>,
}

impl PracticeSession {
    /// Build a session in `NotStarted`.
    pub fn new(catalog: PoseCatalog, durations: DurationConfig, config: PracticeConfig) -> Self {
        let mut ctx = SessionContext::new(catalog, durations, config);
        let mut fsm = Fsm::new(build_state_table(), StateId::NotStarted);
        fsm.start(&mut ctx);
        Self {
            fsm,
            ctx,
            runs_completed: 0,
            last_report: None,
        }
    }

    /// Validate `poses` into a catalog and build a session over it.
    pub fn with_poses(
        poses: Vec<PoseDescriptor>,
        durations: DurationConfig,
        config: PracticeConfig,
    ) -> crate::Result<Self> {
        let catalog = PoseCatalog::new(poses)?;
        Ok(Self::new(catalog, durations, config))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin the run: load the first pose and arm the timer.
    ///
    /// Only valid from `NotStarted`; returns `false` (and does nothing)
    /// otherwise.  Use [`restart`](Self::restart) to go again.
    pub fn start(&mut self, sink: &mut impl EventSink) -> bool {
        if self.fsm.current_state() != StateId::NotStarted {
            debug!("start ignored in {:?}", self.fsm.current_state());
            return false;
        }
        info!("Practice started: {} poses", self.ctx.pose_count());
        self.fsm.force_transition(StateId::Active, &mut self.ctx);
        self.flush(sink);
        true
    }

    /// Feed one tick from the cadence source.
    ///
    /// Returns `true` if the tick was admitted and applied.  Ticks while
    /// paused, idle, or from a superseded generation change nothing.
    pub fn on_tick(&mut self, stamp: TickStamp, sink: &mut impl EventSink) -> bool {
        if !self.ctx.timer.admit(stamp) {
            debug!(
                "tick refused: stamp gen {} vs live gen {} ({:?})",
                stamp.generation(),
                self.ctx.timer.generation(),
                self.ctx.timer.state()
            );
            return false;
        }
        self.fsm.tick(&mut self.ctx);
        self.flush(sink);
        true
    }

    /// Flip the pause flag.  Active only.
    pub fn toggle_pause(&mut self, sink: &mut impl EventSink) -> bool {
        if self.fsm.current_state() != StateId::Active {
            return false;
        }
        let paused = if self.ctx.paused {
            self.ctx.timer.resume();
            false
        } else {
            self.ctx.timer.pause();
            true
        };
        self.ctx.paused = paused;
        info!("Practice {}", if paused { "paused" } else { "resumed" });
        self.ctx.emit(SessionEvent::PauseChanged { paused });
        self.flush(sink);
        true
    }

    /// End the current pose now, regardless of time left.  Active only.
    pub fn skip(&mut self, sink: &mut impl EventSink) -> bool {
        if self.fsm.current_state() != StateId::Active {
            return false;
        }
        info!("Skipping pose {}", self.ctx.pose_index + 1);
        self.ctx.emit(SessionEvent::Cue(Cue::PoseChange));
        if let Some(next) = advance(&mut self.ctx) {
            self.fsm.force_transition(next, &mut self.ctx);
        }
        self.flush(sink);
        true
    }

    /// Reset to the first pose and start over, from any state.
    pub fn restart(&mut self, sink: &mut impl EventSink) {
        info!("Practice restarted from {:?}", self.fsm.current_state());
        if self.fsm.current_state() == StateId::Active {
            self.fsm.reenter(&mut self.ctx);
        } else {
            self.fsm.force_transition(StateId::Active, &mut self.ctx);
        }
        self.flush(sink);
    }

    // ── Duration ──────────────────────────────────────────────

    /// Shift the configured hold by `delta` seconds (clamped).  A running
    /// pose keeps its duration; the new value applies from the next load.
    pub fn adjust_duration(&mut self, delta: i64, sink: &mut impl EventSink) -> u32 {
        let before = self.ctx.durations.snapshot();
        let after = self.ctx.durations.adjust(delta);
        self.duration_updated(before, after, sink);
        after
    }

    /// Set the configured hold to a preset (clamped).
    pub fn set_duration(&mut self, seconds: i64, sink: &mut impl EventSink) -> u32 {
        let before = self.ctx.durations.snapshot();
        let after = self.ctx.durations.set_preset(seconds);
        self.duration_updated(before, after, sink);
        after
    }

    fn duration_updated(&mut self, before: u32, after: u32, sink: &mut impl EventSink) {
        if before == after {
            return;
        }
        info!("Pose duration {}s -> {}s", before, after);
        self.sync_idle_countdown();
        self.ctx.emit(SessionEvent::DurationChanged { secs: after });
        self.flush(sink);
    }

    /// Before the first start the displayed countdown tracks the setting.
    fn sync_idle_countdown(&mut self) {
        if self.fsm.current_state() == StateId::NotStarted {
            self.ctx.pose_duration = self.ctx.durations.snapshot();
            self.ctx.time_remaining = self.ctx.pose_duration;
        }
    }

    // ── Preferences ───────────────────────────────────────────

    /// Apply the persisted hold duration, if there is a usable one.
    ///
    /// Returns `true` if the configured duration was replaced.  Anything
    /// unusable is logged and ignored; the current value stays.
    pub fn load_preferences(&mut self, prefs: &impl PreferencePort) -> bool {
        let applied = match prefs.load() {
            Ok(None) => {
                debug!("No saved pose duration; using {}s", self.ctx.durations.snapshot());
                false
            }
            Ok(Some(raw)) => {
                if self.ctx.durations.load(Some(raw)) {
                    let secs = self.ctx.durations.snapshot();
                    if i64::from(secs) != raw {
                        warn!("Saved pose duration {}s out of range; clamped to {}s", raw, secs);
                    } else {
                        info!("Loaded saved pose duration: {}s", secs);
                    }
                    true
                } else {
                    warn!("Ignoring saved pose duration {}", raw);
                    false
                }
            }
            Err(e) => {
                warn!("Could not read saved pose duration: {}", e);
                false
            }
        };
        if applied {
            self.sync_idle_countdown();
        }
        applied
    }

    /// Persist the configured hold duration.
    pub fn save_preferences(&self, prefs: &mut impl PreferencePort) -> crate::Result<()> {
        let secs = self.ctx.durations.snapshot();
        prefs.save(secs).inspect_err(|e| warn!("Saving pose duration failed: {}", e))?;
        info!("Saved pose duration: {}s", secs);
        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a front-end command.  Returns `false` if the command did
    /// not apply in the current state (or, for a save, failed).
    pub fn handle_command(
        &mut self,
        cmd: SessionCommand,
        prefs: &mut impl PreferencePort,
        sink: &mut impl EventSink,
    ) -> bool {
        match cmd {
            SessionCommand::Start => self.start(sink),
            SessionCommand::TogglePause => self.toggle_pause(sink),
            SessionCommand::Skip => self.skip(sink),
            SessionCommand::Restart => {
                self.restart(sink);
                true
            }
            SessionCommand::AdjustDuration(delta) => {
                self.adjust_duration(delta, sink);
                true
            }
            SessionCommand::IncreaseDuration => {
                self.adjust_duration(crate::config::ADJUST_STEP_SECS, sink);
                true
            }
            SessionCommand::DecreaseDuration => {
                self.adjust_duration(-crate::config::ADJUST_STEP_SECS, sink);
                true
            }
            SessionCommand::SetPreset(secs) => {
                self.set_duration(secs, sink);
                true
            }
            SessionCommand::SavePreferences => self.save_preferences(prefs).is_ok(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// 0-based index of the current pose.
    pub fn pose_index(&self) -> usize {
        self.ctx.pose_index
    }

    pub fn time_remaining(&self) -> u32 {
        self.ctx.time_remaining
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.paused
    }

    /// `true` while Active (paused or not).
    pub fn is_running(&self) -> bool {
        self.fsm.current_state() == StateId::Active
    }

    /// Hold duration future pose loads will use.
    pub fn configured_duration(&self) -> u32 {
        self.ctx.durations.snapshot()
    }

    /// Hold duration the current pose was loaded with.
    pub fn pose_duration(&self) -> u32 {
        self.ctx.pose_duration
    }

    pub fn catalog(&self) -> &PoseCatalog {
        &self.ctx.catalog
    }

    pub fn config(&self) -> &PracticeConfig {
        &self.ctx.config
    }

    /// Handle for the cadence source to stamp its pulses with.
    pub fn timer_epoch(&self) -> TimerEpoch {
        self.ctx.timer.epoch()
    }

    /// A stamp for the live generation, as a cadence source would emit it
    /// right now.
    pub fn current_stamp(&self) -> TickStamp {
        self.ctx.timer.stamp()
    }

    /// Completed runs since construction.
    pub fn runs_completed(&self) -> u32 {
        self.runs_completed
    }

    /// Summary of the most recent completed run.
    pub fn report(&self) -> Option<SessionReport> {
        self.last_report
    }

    /// Build a render snapshot from the current context.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.fsm.current_state();
        let count = self.ctx.pose_count();
        let (progress_percent, completed) = match state {
            StateId::Complete => (100.0, count),
            _ => (
                self.ctx.pose_index as f32 / count as f32 * 100.0,
                self.ctx.pose_index,
            ),
        };
        let running = state == StateId::Active;
        SessionSnapshot {
            state,
            pose_index: self.ctx.pose_index,
            pose_count: count,
            time_remaining: self.ctx.time_remaining,
            pose_duration: self.ctx.pose_duration,
            configured_duration: self.ctx.durations.snapshot(),
            paused: self.ctx.paused,
            running,
            progress_percent,
            dots: dot_statuses(count, completed, running),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn flush(&mut self, sink: &mut impl EventSink) {
        for event in self.ctx.take_events() {
            if let Some(report) = SessionReport::from_event(&event) {
                self.runs_completed += 1;
                self.last_report = Some(report);
                info!("Practice complete: {} poses in {}", report.total_poses, report);
            }
            sink.emit(&event);
        }
    }
}
