//! Preference load/save through the session, against the mock store and
//! the real file and memory backends.

use namaskar::adapters::prefs::{FilePreferenceStore, MemoryPreferenceStore};
use namaskar::app::commands::SessionCommand;
use namaskar::app::ports::{PreferenceError, PreferencePort};
use namaskar::config::{DEFAULT_DURATION_SECS, PracticeConfig};
use namaskar::error::Error;

use crate::mock_io::{FlakyPrefs, RecordingSink, make_session};

const KEY: &str = "suryaNamaskar_poseDuration";

// ── Loading ───────────────────────────────────────────────────

#[test]
fn valid_saved_value_is_applied() {
    let mut s = make_session(15);
    assert!(s.load_preferences(&FlakyPrefs::with_raw("45")));
    assert_eq!(s.configured_duration(), 45);
    assert_eq!(s.time_remaining(), 45);
}

#[test]
fn out_of_range_saved_value_is_clamped() {
    let mut s = make_session(15);
    assert!(s.load_preferences(&FlakyPrefs::with_raw("500")));
    assert_eq!(s.configured_duration(), 120);

    assert!(s.load_preferences(&FlakyPrefs::with_raw("2")));
    assert_eq!(s.configured_duration(), 5);
}

#[test]
fn unusable_saved_values_keep_the_default() {
    for raw in ["abc", "", "0", "-30", "12.5"] {
        let mut s = make_session(i64::from(DEFAULT_DURATION_SECS));
        assert!(!s.load_preferences(&FlakyPrefs::with_raw(raw)), "{raw:?}");
        assert_eq!(s.configured_duration(), DEFAULT_DURATION_SECS, "{raw:?}");
    }
}

#[test]
fn read_failure_keeps_the_default() {
    let mut s = make_session(15);
    let prefs = FlakyPrefs {
        fail_load: true,
        ..FlakyPrefs::with_raw("60")
    };
    assert!(!s.load_preferences(&prefs));
    assert_eq!(s.configured_duration(), 15);
}

#[test]
fn loading_mid_run_does_not_touch_current_pose() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    assert!(s.load_preferences(&FlakyPrefs::with_raw("60")));
    assert_eq!(s.time_remaining(), 15);
    s.skip(&mut sink);
    assert_eq!(s.time_remaining(), 60);
}

// ── Saving ────────────────────────────────────────────────────

#[test]
fn save_failure_is_reported() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    let mut prefs = FlakyPrefs {
        fail_save: true,
        ..FlakyPrefs::new()
    };
    assert_eq!(
        s.save_preferences(&mut prefs),
        Err(Error::Preference(PreferenceError::Io))
    );
    assert!(!s.handle_command(SessionCommand::SavePreferences, &mut prefs, &mut sink));
    assert_eq!(prefs.saves, 0);
}

#[test]
fn memory_store_round_trip_through_session() {
    let mut store = MemoryPreferenceStore::new(KEY);
    let mut sink = RecordingSink::new();

    let mut first = make_session(15);
    first.set_duration(35, &mut sink);
    first.save_preferences(&mut store).unwrap();

    let mut second = make_session(15);
    assert!(second.load_preferences(&store));
    assert_eq!(second.configured_duration(), 35);
}

#[test]
fn corrupt_memory_value_is_ignored() {
    let store = MemoryPreferenceStore::with_raw(KEY, "fifteen");
    assert_eq!(store.load(), Err(PreferenceError::Corrupted));
    let mut s = make_session(20);
    assert!(!s.load_preferences(&store));
    assert_eq!(s.configured_duration(), 20);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let config = PracticeConfig {
        preference_path: dir.path().join("prefs.json"),
        ..PracticeConfig::default()
    };
    let mut sink = RecordingSink::new();

    {
        let mut store = FilePreferenceStore::new(&config.preference_path, config.preference_key.clone());
        let mut s = make_session(15);
        s.handle_command(SessionCommand::SetPreset(90), &mut store, &mut sink);
        assert!(s.handle_command(SessionCommand::SavePreferences, &mut store, &mut sink));
    }

    let store = FilePreferenceStore::new(&config.preference_path, config.preference_key.clone());
    let mut s = make_session(15);
    assert!(s.load_preferences(&store));
    assert_eq!(s.configured_duration(), 90);

    let text = std::fs::read_to_string(&config.preference_path).unwrap();
    assert!(text.contains(KEY));
    assert!(text.contains("\"90\""));
}

#[test]
fn file_store_with_no_file_keeps_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePreferenceStore::new(dir.path().join("absent.json"), KEY);
    let mut s = make_session(15);
    assert!(!s.load_preferences(&store));
    assert_eq!(s.configured_duration(), 15);
}
