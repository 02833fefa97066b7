//! Runtime event queue.
//!
//! Events are produced by:
//! - the metronome thread (one stamped tick per second)
//! - the console reader thread (parsed user commands, end of input)
//!
//! Events are consumed by the control loop, which applies them one at a
//! time in arrival order.  Because only the control loop touches the
//! session, tick handling is never reentrant.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Metronome   │────▶│  Event Queue │────▶│ Control Loop │
//! │ Console     │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future;
use log::warn;

use crate::app::commands::SessionCommand;
use crate::timer::TickStamp;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Everything the control loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A pulse from the cadence source, stamped at emission.
    Tick(TickStamp),
    /// A user command.
    Command(SessionCommand),
    /// Stop the control loop.
    Shutdown,
}

type EventChannel = Channel<CriticalSectionRawMutex, RuntimeEvent, EVENT_QUEUE_CAP>;

/// Multi-producer queue shared between the producer threads and the
/// control loop.  Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct EventQueue {
    channel: Arc<EventChannel>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            channel: Arc::new(Channel::new()),
        }
    }

    /// Enqueue without blocking.  Returns `false` if the queue is full
    /// (event dropped).
    pub fn push(&self, event: RuntimeEvent) -> bool {
        match self.channel.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                warn!("event queue full, dropped {:?}", event);
                false
            }
        }
    }

    /// Enqueue, waiting for space if the queue is full.  For events that
    /// must not be lost (commands, shutdown).
    pub fn push_blocking(&self, event: RuntimeEvent) {
        future::block_on(self.channel.send(event));
    }

    /// Pop the next event, if any.
    pub fn try_pop(&self) -> Option<RuntimeEvent> {
        self.channel.try_receive().ok()
    }

    /// Block the calling thread until an event arrives.
    pub fn wait(&self) -> RuntimeEvent {
        future::block_on(self.channel.receive())
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(RuntimeEvent)) {
        while let Some(event) = self.try_pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }
}
