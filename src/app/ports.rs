//! Port traits — the hexagonal boundary between the session core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PracticeSession (domain)
//! ```
//!
//! Driven adapters (event sinks, preference storage, image loading)
//! implement these traits.  The
//! [`PracticeSession`](super::service::PracticeSession) consumes them via
//! generics, so the domain core never touches a terminal or a file directly.

use super::events::SessionEvent;

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → presentation)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`SessionEvent`]s through this port.
/// Adapters decide where they go (log, terminal, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &SessionEvent);
}

/// Fan out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &SessionEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &SessionEvent) {
        (**self).emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Preference port (driven adapter: domain ↔ persisted duration)
// ───────────────────────────────────────────────────────────────

/// Persists the single numeric preference (seconds per pose).
///
/// `load` returns the raw stored integer without range checks;
/// [`DurationConfig::load`](crate::config::DurationConfig::load) decides
/// what to do with it.  A value that is present but not an integer is
/// reported as [`PreferenceError::Corrupted`].
pub trait PreferencePort {
    /// Read the stored value.  `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<i64>, PreferenceError>;

    /// Store `seconds`, replacing any previous value.
    fn save(&mut self, seconds: u32) -> Result<(), PreferenceError>;
}

// ───────────────────────────────────────────────────────────────
// Image port (driven adapter: image_ref → bytes)
// ───────────────────────────────────────────────────────────────

/// Resolves a pose's opaque `image_ref` to encoded image bytes.
pub trait ImagePort {
    fn fetch(&mut self, image_ref: &str) -> Result<Vec<u8>, ImageError>;
}

impl<P: ImagePort + ?Sized> ImagePort for Box<P> {
    fn fetch(&mut self, image_ref: &str) -> Result<Vec<u8>, ImageError> {
        (**self).fetch(image_ref)
    }
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`PreferencePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceError {
    /// A value is stored but is not an integer.
    Corrupted,
    /// The backing store exists but could not be parsed as a whole.
    Malformed,
    /// Generic I/O error from the storage backend.
    Io,
}

/// Errors from [`ImagePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    /// No image exists for the reference.
    NotFound,
    /// The reference names a path outside the asset directory.
    InvalidRef,
    /// Generic I/O error.
    Io,
}

impl core::fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "stored preference corrupted"),
            Self::Malformed => write!(f, "preference store malformed"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl core::fmt::Display for ImageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "image not found"),
            Self::InvalidRef => write!(f, "invalid image reference"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ImageError {}
