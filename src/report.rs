//! End-of-session summary.
//!
//! Built from the `SessionComplete` event.  Totals under a minute are shown
//! in whole seconds; anything longer is shown in minutes rounded to one
//! decimal place, with the decimal dropped when it is zero.

use core::fmt;

use crate::app::events::SessionEvent;

/// Completion statistics for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub total_poses: usize,
    pub total_secs: u32,
}

impl SessionReport {
    pub fn new(total_poses: usize, total_secs: u32) -> Self {
        Self {
            total_poses,
            total_secs,
        }
    }

    /// Extract a report from a `SessionComplete` event.
    pub fn from_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::SessionComplete {
                total_poses,
                total_secs,
            } => Some(Self::new(*total_poses, *total_secs)),
            _ => None,
        }
    }

    /// Numeric part of the total, e.g. `"3"`, `"1.5"`, `"45"`.
    pub fn time_value(&self) -> String {
        match self.minutes() {
            Some(m) if m.fract() == 0.0 => format!("{m:.0}"),
            Some(m) => format!("{m:.1}"),
            None => self.total_secs.to_string(),
        }
    }

    /// Unit label matching [`time_value`](Self::time_value).
    pub fn time_label(&self) -> &'static str {
        match self.minutes() {
            Some(m) if m == 1.0 => "Minute",
            Some(_) => "Minutes",
            None if self.total_secs == 1 => "Second",
            None => "Seconds",
        }
    }

    /// Minutes to one decimal, or `None` below a minute.
    fn minutes(&self) -> Option<f64> {
        if self.total_secs >= 60 {
            Some((f64::from(self.total_secs) / 6.0).round() / 10.0)
        } else {
            None
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time_value(), self.time_label())
    }
}
