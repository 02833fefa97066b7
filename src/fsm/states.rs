//! Concrete state handler functions and table builder.
//!
//! ```text
//!  NOT_STARTED ──[start]──▶ ACTIVE(i, t, paused) ──[last pose expires / skipped]──▶ COMPLETE
//!                             │  ▲                                                    │
//!                 [t hits 0 / skip, i < last]                                          │
//!                             └──┘  i += 1                                             │
//!                                                                                      │
//!  Any state ──[restart]──▶ ACTIVE(0, duration, false) ◀─────────────────────────────┘
//! ```

use super::context::SessionContext;
use super::{StateDescriptor, StateId};
use crate::app::events::{Cue, SessionEvent};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once per session.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — NotStarted
        StateDescriptor {
            id: StateId::NotStarted,
            name: "NotStarted",
            on_enter: Some(not_started_enter),
            on_exit: None,
            on_update: inert_update,
        },
        // Index 1 — Active
        StateDescriptor {
            id: StateId::Active,
            name: "Active",
            on_enter: Some(active_enter),
            on_exit: Some(active_exit),
            on_update: active_update,
        },
        // Index 2 — Complete
        StateDescriptor {
            id: StateId::Complete,
            name: "Complete",
            on_enter: Some(complete_enter),
            on_exit: None,
            on_update: inert_update,
        },
    ]
}

/// NotStarted and Complete have nothing to count down.
fn inert_update(_ctx: &mut SessionContext) -> Option<StateId> {
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  NOT_STARTED
// ═══════════════════════════════════════════════════════════════════════════

fn not_started_enter(ctx: &mut SessionContext) {
    ctx.timer.cancel();
    ctx.pose_index = 0;
    ctx.pose_duration = ctx.durations.snapshot();
    ctx.time_remaining = ctx.pose_duration;
    ctx.paused = false;
}

// ═══════════════════════════════════════════════════════════════════════════
//  ACTIVE
// ═══════════════════════════════════════════════════════════════════════════

fn active_enter(ctx: &mut SessionContext) {
    ctx.pose_index = 0;
    load_pose(ctx);
}

fn active_update(ctx: &mut SessionContext) -> Option<StateId> {
    if ctx.paused {
        return None;
    }

    ctx.time_remaining = ctx.time_remaining.saturating_sub(1);
    let remaining = ctx.time_remaining;
    ctx.emit(SessionEvent::Tick {
        remaining_secs: remaining,
        duration_secs: ctx.pose_duration,
    });

    if ctx.in_countdown(remaining) {
        ctx.emit(SessionEvent::Cue(Cue::Countdown));
        ctx.emit(SessionEvent::CountdownWarning {
            remaining_secs: remaining,
        });
    }

    if remaining == 0 {
        ctx.emit(SessionEvent::Cue(Cue::PoseChange));
        return advance(ctx);
    }

    None
}

fn active_exit(ctx: &mut SessionContext) {
    ctx.timer.cancel();
}

/// Leave the loaded pose.
///
/// Cancels the running generation, then either loads the next pose (and
/// stays Active) or asks the engine to move to Complete.
pub(crate) fn advance(ctx: &mut SessionContext) -> Option<StateId> {
    ctx.timer.cancel();

    if ctx.is_last_pose() {
        return Some(StateId::Complete);
    }

    let from = ctx.pose_index;
    ctx.pose_index += 1;
    ctx.emit(SessionEvent::PoseAdvanced {
        from,
        to: ctx.pose_index,
    });
    load_pose(ctx);
    None
}

/// Read the configured duration, reset the countdown, open a new tick
/// generation and announce the pose.
fn load_pose(ctx: &mut SessionContext) {
    ctx.pose_duration = ctx.durations.snapshot();
    ctx.time_remaining = ctx.pose_duration;
    if ctx.paused {
        ctx.paused = false;
        ctx.emit(SessionEvent::PauseChanged { paused: false });
    }
    ctx.timer.start();

    let pose = ctx.current_pose().clone();
    info!(
        "ACTIVE: pose {}/{} {} ({}) {} for {}s",
        pose.index,
        ctx.pose_count(),
        pose.name,
        pose.subtitle,
        pose.breathing,
        ctx.pose_duration
    );
    debug!("ACTIVE: timer generation {}", ctx.timer.generation());
    ctx.emit(SessionEvent::PoseLoaded {
        index: ctx.pose_index,
        pose,
        duration_secs: ctx.pose_duration,
    });
}

// ═══════════════════════════════════════════════════════════════════════════
//  COMPLETE
// ═══════════════════════════════════════════════════════════════════════════

fn complete_enter(ctx: &mut SessionContext) {
    ctx.timer.cancel();
    ctx.time_remaining = 0;
    // Completion supersedes the pause; no resume is announced.
    ctx.paused = false;

    let total_poses = ctx.pose_count();
    let total_secs = ctx.durations.snapshot() * total_poses as u32;
    info!(
        "COMPLETE: {} poses, {}s of practice",
        total_poses, total_secs
    );
    debug!(
        "COMPLETE: {} ticks admitted, {} refused",
        ctx.timer.admitted_count(),
        ctx.timer.refused_count()
    );
    ctx.emit(SessionEvent::Cue(Cue::Completion));
    ctx.emit(SessionEvent::SessionComplete {
        total_poses,
        total_secs,
    });
}
