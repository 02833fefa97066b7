//! Metronome — the host cadence source.
//!
//! Runs in a dedicated thread using `edge-executor` and `async-io-mini`
//! reactor timers (no busy-spinning).  Every period it stamps a pulse with
//! the session timer's live generation and posts it to the
//! [`EventQueue`](crate::events::EventQueue).  While the timer is idle no
//! pulse is posted at all.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────┐
//!  │  Metronome thread                                │
//!  │  ┌────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor              │  │
//!  │  │  ┌──────────────┐      ┌────────────────┐  │  │
//!  │  │  │ pulse loop   │      │ stop signal    │  │  │
//!  │  │  │ period ⏱     │      │ (run until)    │  │  │
//!  │  │  └──────┬───────┘      └────────────────┘  │  │
//!  │  └─────────┼──────────────────────────────────┘  │
//!  └────────────┼─────────────────────────────────────┘
//!               ▼  RuntimeEvent::Tick(stamp)
//!           EventQueue
//! ```
//!
//! The stamp is taken when the pulse is emitted, not when it is handled.
//! A pulse that sits in the queue across a pose change therefore carries
//! the old generation and is refused by the session.
//!
//! Whenever the timer opens a new generation (start, pose load, restart)
//! the period restarts from that moment, so every pose gets a full first
//! second.

use core::time::Duration;
use std::sync::Arc;
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future;
use log::{debug, info};

use crate::events::{EventQueue, RuntimeEvent};
use crate::timer::TimerEpoch;

type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// Handle to a running metronome thread.  Stops on drop.
pub struct Metronome {
    stop: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl Metronome {
    /// Spawn the metronome thread.
    pub fn spawn(
        period: Duration,
        epoch: TimerEpoch,
        queue: EventQueue,
    ) -> std::io::Result<Self> {
        let stop = Arc::new(StopSignal::new());
        let thread_stop = stop.clone();
        let handle = std::thread::Builder::new()
            .name("metronome".into())
            .spawn(move || run(period, epoch, queue, thread_stop))?;
        info!("Metronome started ({} ms period)", period.as_millis());
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.  Safe to call twice.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.stop.signal(());
            if handle.join().is_err() {
                log::warn!("Metronome thread panicked");
            }
            info!("Metronome stopped");
        }
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Post one stamped pulse at the end of a period.  Returns `true` if a tick
/// was queued.
///
/// If a generation was opened during the period the pulse is withheld and
/// the caller starts a fresh period instead.
fn pulse(epoch: &TimerEpoch, queue: &EventQueue) -> bool {
    let stamp = epoch.stamp();
    if epoch.take_rearm() {
        debug!("metronome: generation {} opened mid-period", epoch.stamp().generation());
        return false;
    }
    if stamp.is_idle() {
        return false;
    }
    queue.push(RuntimeEvent::Tick(stamp))
}

async fn pulse_loop(period: Duration, epoch: TimerEpoch, queue: EventQueue) {
    loop {
        let elapsed = future::or(
            async {
                async_io_mini::Timer::after(period).await;
                true
            },
            async {
                epoch.rearmed().await;
                false
            },
        )
        .await;
        if !elapsed {
            debug!("metronome: re-armed for generation {}", epoch.stamp().generation());
            continue;
        }
        if !pulse(&epoch, &queue) {
            debug!("metronome: no tick posted");
        }
    }
}

fn run(period: Duration, epoch: TimerEpoch, queue: EventQueue, stop: Arc<StopSignal>) {
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();
    executor.spawn(pulse_loop(period, epoch, queue)).detach();
    future::block_on(executor.run(stop.wait()));
}
