//! Session tick gate.
//!
//! [`SessionTimer`] decides whether a one-second tick from the cadence
//! source should reach the session.  It never sleeps or spawns anything
//! itself; the cadence comes from a tick source (the
//! [`Metronome`](crate::drivers::metronome::Metronome) on the host, or a
//! test loop) that stamps every pulse with the timer's current generation.
//!
//! ```text
//!            start()            pause()
//!   ┌──────┐ ───────▶ ┌─────────┐ ──────▶ ┌────────┐
//!   │ Idle │          │ Running │         │ Paused │
//!   └──────┘ ◀─────── └─────────┘ ◀────── └────────┘
//!       ▲    cancel()               resume()   │
//!       └──────────────── cancel() ────────────┘
//! ```
//!
//! Every `start()` opens a new generation and `cancel()` closes it.  A tick
//! stamped with an older generation is refused, so a pulse that was already
//! queued when the session advanced or restarted cannot mutate state.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::debug;

/// Generation value meaning "no tick source is armed".
const IDLE_GENERATION: u32 = 0;

// ───────────────────────────────────────────────────────────────
// Stamps and the shared epoch
// ───────────────────────────────────────────────────────────────

/// A tick as emitted by the cadence source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickStamp {
    generation: u32,
}

impl TickStamp {
    pub const fn new(generation: u32) -> Self {
        Self { generation }
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// `true` if emitted while no generation was armed.
    pub const fn is_idle(self) -> bool {
        self.generation == IDLE_GENERATION
    }
}

type RearmSignal = Signal<CriticalSectionRawMutex, ()>;

/// The timer's current generation, shared with the cadence source.
///
/// Opening a generation also raises a re-arm signal so the cadence source
/// can restart its period: the first tick of a freshly loaded pose comes a
/// full period after the load, not on the previous pose's schedule.
#[derive(Clone)]
pub struct TimerEpoch {
    generation: Arc<AtomicU32>,
    rearm: Arc<RearmSignal>,
}

impl Default for TimerEpoch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEpoch")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl TimerEpoch {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU32::new(IDLE_GENERATION)),
            rearm: Arc::new(RearmSignal::new()),
        }
    }

    /// Stamp a pulse with whatever generation is armed right now.
    pub fn stamp(&self) -> TickStamp {
        TickStamp::new(self.generation.load(Ordering::Acquire))
    }

    /// Resolves when a new generation has been opened since the last
    /// re-arm was taken.
    pub async fn rearmed(&self) {
        self.rearm.wait().await;
    }

    /// Consume a pending re-arm.  Returns `true` if one was pending.
    pub fn take_rearm(&self) -> bool {
        self.rearm.try_take().is_some()
    }

    fn publish(&self, generation: u32) {
        // Signal before storing: any stamp that reads the new generation
        // is guaranteed to see the pending re-arm.
        if generation != IDLE_GENERATION {
            self.rearm.signal(());
        }
        self.generation.store(generation, Ordering::Release);
    }
}

// ───────────────────────────────────────────────────────────────
// SessionTimer
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Cancellable one-second tick gate with pause semantics.
#[derive(Debug)]
pub struct SessionTimer {
    state: TimerState,
    /// Generation opened by the most recent `start()`.
    generation: u32,
    epoch: TimerEpoch,
    admitted: u64,
    refused: u64,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            generation: IDLE_GENERATION,
            epoch: TimerEpoch::new(),
            admitted: 0,
            refused: 0,
        }
    }

    /// Open a new generation and begin admitting its ticks.
    ///
    /// Calling this while already running replaces the previous generation;
    /// there is never more than one live tick source.
    pub fn start(&mut self) -> TickStamp {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == IDLE_GENERATION {
            self.generation = 1;
        }
        self.state = TimerState::Running;
        self.epoch.publish(self.generation);
        debug!("timer: generation {} started", self.generation);
        TickStamp::new(self.generation)
    }

    /// Suppress ticks.  Returns `true` if the timer was running.
    pub fn pause(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Re-admit ticks.  Returns `true` if the timer was paused.
    pub fn resume(&mut self) -> bool {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            true
        } else {
            false
        }
    }

    /// Stop admitting ticks until the next `start()`.  Safe in any state.
    pub fn cancel(&mut self) {
        if self.state != TimerState::Idle {
            debug!("timer: generation {} cancelled", self.generation);
        }
        self.state = TimerState::Idle;
        self.epoch.publish(IDLE_GENERATION);
    }

    /// Decide whether `stamp` counts as a tick for the session.
    pub fn admit(&mut self, stamp: TickStamp) -> bool {
        let ok = self.state == TimerState::Running
            && !stamp.is_idle()
            && stamp.generation() == self.generation;
        if ok {
            self.admitted += 1;
        } else {
            self.refused += 1;
        }
        ok
    }

    /// A stamp for the live generation, as the cadence source would emit it.
    pub fn stamp(&self) -> TickStamp {
        self.epoch.stamp()
    }

    /// Handle for the cadence source.
    pub fn epoch(&self) -> TimerEpoch {
        self.epoch.clone()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks admitted over the timer's lifetime.
    pub fn admitted_count(&self) -> u64 {
        self.admitted
    }

    /// Ticks refused (paused, idle or stale) over the timer's lifetime.
    pub fn refused_count(&self) -> u64 {
        self.refused
    }
}
