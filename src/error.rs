//! Unified error types for the practice engine.
//!
//! The session engine itself is total: out-of-range input is clamped and
//! state-invalid commands are no-ops.  The only failures live at the edges
//! (catalog construction and preference storage), and each of them
//! converts into the single [`Error`] enum below.  All variants are
//! `Copy` so they can be passed around without allocation.

use core::fmt;

use crate::app::ports::PreferenceError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pose catalog failed validation.
    Catalog(CatalogError),
    /// The preference store could not be read or written.
    Preference(PreferenceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::Preference(e) => write!(f, "preference: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Reasons a pose list is refused by [`PoseCatalog::new`](crate::catalog::PoseCatalog::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// A session needs at least one pose.
    Empty,
    /// More poses than [`MAX_POSES`](crate::catalog::MAX_POSES).
    TooManyPoses(usize),
    /// A pose's 1-based `index` does not match its position.
    IndexMismatch { position: usize, index: u8 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pose catalog is empty"),
            Self::TooManyPoses(n) => write!(f, "pose catalog too large ({n} poses)"),
            Self::IndexMismatch { position, index } => {
                write!(f, "pose at position {position} has index {index}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<PreferenceError> for Error {
    fn from(e: PreferenceError) -> Self {
        Self::Preference(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
