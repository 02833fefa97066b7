//! Practice configuration
//!
//! Two layers:
//! - [`DurationConfig`]: the user-facing per-pose hold duration.  Always
//!   inside `[MIN_DURATION_SECS, MAX_DURATION_SECS]`; anything outside is
//!   clamped, never rejected.  It is the one value that gets persisted.
//! - [`PracticeConfig`]: system tunables (tick cadence, countdown window,
//!   storage locations).  Values can be overridden from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Shortest allowed hold (seconds).
pub const MIN_DURATION_SECS: u32 = 5;
/// Longest allowed hold (seconds).
pub const MAX_DURATION_SECS: u32 = 120;
/// Hold used when nothing has been configured or persisted.
pub const DEFAULT_DURATION_SECS: u32 = 15;
/// Step applied by the +/- controls.
pub const ADJUST_STEP_SECS: i64 = 5;

/// Environment variable overriding [`PracticeConfig::preference_path`].
pub const PREFS_PATH_ENV: &str = "NAMASKAR_PREFS";
/// Environment variable overriding [`PracticeConfig::assets_dir`].
pub const ASSETS_DIR_ENV: &str = "NAMASKAR_ASSETS";

// ───────────────────────────────────────────────────────────────
// DurationConfig
// ───────────────────────────────────────────────────────────────

/// Per-pose hold duration in whole seconds.
///
/// Deserialization goes through the same clamp as every mutator, so a
/// hand-edited value of `500` comes back as `120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct DurationConfig {
    seconds: u32,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            seconds: DEFAULT_DURATION_SECS,
        }
    }
}

impl From<i64> for DurationConfig {
    fn from(seconds: i64) -> Self {
        Self::new(seconds)
    }
}

impl From<DurationConfig> for u32 {
    fn from(config: DurationConfig) -> Self {
        config.seconds
    }
}

impl DurationConfig {
    /// Build from any integer, clamped into bounds.
    pub fn new(seconds: i64) -> Self {
        Self {
            seconds: clamp_secs(seconds),
        }
    }

    /// Current value, for seeding a pose load.
    pub fn snapshot(&self) -> u32 {
        self.seconds
    }

    /// Shift by `delta` seconds, clamped.  Returns the new value.
    pub fn adjust(&mut self, delta: i64) -> u32 {
        self.seconds = clamp_secs(i64::from(self.seconds).saturating_add(delta));
        self.seconds
    }

    /// One step up (the "+" control).
    pub fn increase(&mut self) -> u32 {
        self.adjust(ADJUST_STEP_SECS)
    }

    /// One step down (the "-" control).
    pub fn decrease(&mut self) -> u32 {
        self.adjust(-ADJUST_STEP_SECS)
    }

    /// Jump straight to a preset.  Presets are expected to be in range but
    /// are clamped all the same.
    pub fn set_preset(&mut self, seconds: i64) -> u32 {
        self.seconds = clamp_secs(seconds);
        self.seconds
    }

    /// Apply a persisted value.
    ///
    /// A positive integer replaces the current value (clamped) and returns
    /// `true`.  `None`, zero and negatives leave the current value untouched.
    pub fn load(&mut self, persisted: Option<i64>) -> bool {
        match persisted {
            Some(seconds) if seconds > 0 => {
                self.seconds = clamp_secs(seconds);
                true
            }
            _ => false,
        }
    }
}

fn clamp_secs(value: i64) -> u32 {
    value.clamp(i64::from(MIN_DURATION_SECS), i64::from(MAX_DURATION_SECS)) as u32
}

// ───────────────────────────────────────────────────────────────
// PracticeConfig
// ───────────────────────────────────────────────────────────────

/// System tunables for the practice engine and its host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeConfig {
    // --- Timing ---
    /// Tick source period (milliseconds).  One tick is one second of hold.
    pub tick_interval_ms: u32,
    /// Countdown warnings fire while `0 < remaining <= countdown_warning_secs`.
    pub countdown_warning_secs: u32,

    // --- Storage ---
    /// Key under which the hold duration is persisted.
    pub preference_key: String,
    /// Preference file location.
    pub preference_path: PathBuf,
    /// Directory that pose `image_ref`s are resolved against.
    pub assets_dir: PathBuf,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 1000, // 1 Hz
            countdown_warning_secs: 5,

            // Storage
            preference_key: "suryaNamaskar_poseDuration".to_string(),
            preference_path: PathBuf::from("namaskar-prefs.json"),
            assets_dir: PathBuf::from("images"),
        }
    }
}

impl PracticeConfig {
    /// Defaults with storage locations overridden from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(PREFS_PATH_ENV) {
            config.preference_path = PathBuf::from(path);
        }
        if let Some(dir) = std::env::var_os(ASSETS_DIR_ENV) {
            config.assets_dir = PathBuf::from(dir);
        }
        config
    }
}
