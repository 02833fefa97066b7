//! Preference store adapters.
//!
//! Implements [`PreferencePort`] over a string-keyed, string-valued map, the
//! same shape as a browser's `localStorage`.  The hold duration is stored
//! as its decimal text under [`PracticeConfig::preference_key`].
//!
//! - [`FilePreferenceStore`]: the map as a JSON object on disk.  Writes go
//!   to a sibling temp file first and are renamed into place, so a crash
//!   mid-save leaves the previous file intact.
//! - [`MemoryPreferenceStore`]: simulation backend for tests.
//!
//! [`PracticeConfig::preference_key`]: crate::config::PracticeConfig::preference_key

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::app::ports::{PreferenceError, PreferencePort};

type Entries = BTreeMap<String, String>;

/// Parse a stored value.  Surrounding whitespace is tolerated; anything
/// else that is not a base-10 integer is corrupt.
fn parse_seconds(raw: &str) -> Result<i64, PreferenceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PreferenceError::Corrupted)
}

// ───────────────────────────────────────────────────────────────
// File backend
// ───────────────────────────────────────────────────────────────

pub struct FilePreferenceStore {
    path: PathBuf,
    key: String,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        let path = path.into();
        info!("FilePreferenceStore: {}", path.display());
        Self {
            path,
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole map.  A missing file is an empty map.
    fn read_entries(&self) -> Result<Entries, PreferenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                warn!("prefs: read {} failed: {}", self.path.display(), e);
                return Err(PreferenceError::Io);
            }
        };
        if text.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            warn!("prefs: {} is not a string map: {}", self.path.display(), e);
            PreferenceError::Malformed
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), PreferenceError> {
        let json = serde_json::to_string_pretty(entries).map_err(|_| PreferenceError::Io)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                warn!("prefs: create {} failed: {}", dir.display(), e);
                PreferenceError::Io
            })?;
        }
        fs::write(&tmp, json).map_err(|e| {
            warn!("prefs: write {} failed: {}", tmp.display(), e);
            PreferenceError::Io
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!("prefs: rename into {} failed: {}", self.path.display(), e);
            PreferenceError::Io
        })
    }
}

impl PreferencePort for FilePreferenceStore {
    fn load(&self) -> Result<Option<i64>, PreferenceError> {
        let entries = self.read_entries()?;
        match entries.get(&self.key) {
            Some(raw) => parse_seconds(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, seconds: u32) -> Result<(), PreferenceError> {
        // Keep unrelated keys; start over only if the file is unreadable.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(PreferenceError::Malformed) => {
                warn!("prefs: replacing malformed {}", self.path.display());
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(self.key.clone(), seconds.to_string());
        self.write_entries(&entries)?;
        debug!("prefs: {}={} -> {}", self.key, seconds, self.path.display());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory backend
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    key: String,
    entries: Entries,
}

impl MemoryPreferenceStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Entries::new(),
        }
    }

    /// Seed the stored text directly, e.g. with a corrupt value.
    pub fn with_raw(key: impl Into<String>, raw: &str) -> Self {
        let mut store = Self::new(key);
        store.entries.insert(store.key.clone(), raw.to_string());
        store
    }

    /// The stored text, if any.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }
}

impl PreferencePort for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<i64>, PreferenceError> {
        self.raw().map(parse_seconds).transpose()
    }

    fn save(&mut self, seconds: u32) -> Result<(), PreferenceError> {
        self.entries.insert(self.key.clone(), seconds.to_string());
        Ok(())
    }
}
