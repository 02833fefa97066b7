//! Drivers — threads that produce runtime events.
//!
//! | Driver      | Produces                | Period            |
//! |-------------|-------------------------|-------------------|
//! | `metronome` | `RuntimeEvent::Tick`    | `tick_interval_ms`|

pub mod metronome;
