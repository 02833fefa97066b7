//! Session flows beyond the happy path: stale ticks, mid-run duration
//! changes, custom catalogs, command dispatch and the progress view.

use namaskar::PracticeSession;
use namaskar::app::commands::SessionCommand;
use namaskar::app::events::{DotStatus, SessionEvent};
use namaskar::catalog::{BreathingPhase, PoseDescriptor};
use namaskar::config::{DurationConfig, PracticeConfig};
use namaskar::error::{CatalogError, Error};
use namaskar::fsm::StateId;
use namaskar::report::SessionReport;
use namaskar::timer::TickStamp;

use crate::mock_io::{FlakyPrefs, RecordingSink, make_session, tick, tick_n};

fn pose(index: u8, name: &'static str) -> PoseDescriptor {
    PoseDescriptor {
        index,
        name,
        subtitle: "",
        breathing: BreathingPhase::Hold,
        description: "",
        image_ref: "",
    }
}

// ── Stale ticks ───────────────────────────────────────────────

#[test]
fn tick_from_previous_pose_is_refused() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    let old = s.current_stamp();
    s.skip(&mut sink);
    sink.clear();

    assert!(!s.on_tick(old, &mut sink));
    assert_eq!(s.pose_index(), 1);
    assert_eq!(s.time_remaining(), 15);
    assert!(sink.events.is_empty());
}

#[test]
fn tick_queued_before_restart_is_refused() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    tick_n(&mut s, &mut sink, 3);
    let queued = s.current_stamp();
    s.restart(&mut sink);

    assert!(!s.on_tick(queued, &mut sink));
    assert_eq!(s.time_remaining(), 15);
    assert!(tick(&mut s, &mut sink));
    assert_eq!(s.time_remaining(), 14);
}

#[test]
fn forged_and_idle_stamps_are_refused() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    assert!(!s.on_tick(TickStamp::new(0), &mut sink));
    assert!(!s.on_tick(TickStamp::new(9_999), &mut sink));
    assert_eq!(s.time_remaining(), 15);
}

#[test]
fn pose_expiry_opens_a_new_generation() {
    let mut s = make_session(5);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    let first = s.current_stamp();
    tick_n(&mut s, &mut sink, 5);
    assert_eq!(s.pose_index(), 1);
    assert_ne!(s.current_stamp(), first);
    assert!(!s.on_tick(first, &mut sink));
}

// ── Duration changes mid-run ──────────────────────────────────

#[test]
fn new_duration_applies_from_next_pose() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    tick_n(&mut s, &mut sink, 2);
    s.set_duration(30, &mut sink);
    assert_eq!(s.time_remaining(), 13);

    let ticks = tick_n(&mut s, &mut sink, 13);
    assert_eq!(ticks, 13);
    assert_eq!(s.pose_index(), 1);
    assert_eq!(s.time_remaining(), 30);
    assert!(matches!(
        sink.events.iter().rev().find(|e| matches!(e, SessionEvent::PoseLoaded { .. })),
        Some(SessionEvent::PoseLoaded { index: 1, duration_secs: 30, .. })
    ));
}

#[test]
fn tick_events_carry_the_loaded_duration() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    s.adjust_duration(45, &mut sink);
    sink.clear();
    tick(&mut s, &mut sink);
    assert_eq!(
        sink.events[0],
        SessionEvent::Tick {
            remaining_secs: 14,
            duration_secs: 15
        }
    );
}

#[test]
fn completion_total_uses_duration_in_effect_at_completion() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    for _ in 0..11 {
        s.skip(&mut sink);
    }
    s.set_duration(30, &mut sink);
    s.skip(&mut sink);
    assert_eq!(sink.completions(), vec![(12, 360)]);
    assert_eq!(s.report(), Some(SessionReport::new(12, 360)));
    assert_eq!(s.report().unwrap().to_string(), "6 Minutes");
}

// ── Custom catalogs ───────────────────────────────────────────

#[test]
fn empty_pose_list_is_refused() {
    let err = PracticeSession::with_poses(
        Vec::new(),
        DurationConfig::default(),
        PracticeConfig::default(),
    )
    .err();
    assert_eq!(err, Some(Error::Catalog(CatalogError::Empty)));
}

#[test]
fn three_pose_catalog_runs_to_completion() {
    let mut s = PracticeSession::with_poses(
        vec![pose(1, "A"), pose(2, "B"), pose(3, "C")],
        DurationConfig::new(15),
        PracticeConfig::default(),
    )
    .unwrap();
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    assert_eq!(tick_n(&mut s, &mut sink, 100), 45);
    assert_eq!(s.state(), StateId::Complete);
    assert_eq!(sink.loaded(), vec![0, 1, 2]);
    assert_eq!(sink.advances(), vec![(0, 1), (1, 2)]);
    assert_eq!(sink.completions(), vec![(3, 45)]);
    assert_eq!(s.report().unwrap().to_string(), "45 Seconds");
}

#[test]
fn single_pose_catalog_completes_without_advancing() {
    let mut s = PracticeSession::with_poses(
        vec![pose(1, "Only")],
        DurationConfig::new(5),
        PracticeConfig::default(),
    )
    .unwrap();
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    tick_n(&mut s, &mut sink, 5);
    assert_eq!(s.state(), StateId::Complete);
    assert!(sink.advances().is_empty());
    assert_eq!(sink.completions(), vec![(1, 5)]);
}

// ── Command dispatch ──────────────────────────────────────────

#[test]
fn commands_route_to_operations() {
    let mut s = make_session(15);
    let mut sink = RecordingSink::new();
    let mut prefs = FlakyPrefs::new();

    assert!(!s.handle_command(SessionCommand::Skip, &mut prefs, &mut sink));
    assert!(s.handle_command(SessionCommand::Start, &mut prefs, &mut sink));
    assert!(!s.handle_command(SessionCommand::Start, &mut prefs, &mut sink));
    assert!(s.handle_command(SessionCommand::TogglePause, &mut prefs, &mut sink));
    assert!(s.is_paused());
    assert!(s.handle_command(SessionCommand::Skip, &mut prefs, &mut sink));
    assert!(!s.is_paused());
    assert_eq!(s.pose_index(), 1);

    s.handle_command(SessionCommand::IncreaseDuration, &mut prefs, &mut sink);
    s.handle_command(SessionCommand::AdjustDuration(7), &mut prefs, &mut sink);
    assert_eq!(s.configured_duration(), 27);
    s.handle_command(SessionCommand::DecreaseDuration, &mut prefs, &mut sink);
    assert_eq!(s.configured_duration(), 22);
    s.handle_command(SessionCommand::SetPreset(60), &mut prefs, &mut sink);
    assert_eq!(s.configured_duration(), 60);

    assert!(s.handle_command(SessionCommand::SavePreferences, &mut prefs, &mut sink));
    assert_eq!(prefs.raw.as_deref(), Some("60"));

    assert!(s.handle_command(SessionCommand::Restart, &mut prefs, &mut sink));
    assert_eq!(s.pose_index(), 0);
    assert_eq!(s.time_remaining(), 60);
}

// ── Progress view ─────────────────────────────────────────────

#[test]
fn snapshot_before_start() {
    let s = make_session(20);
    let snap = s.snapshot();
    assert_eq!(snap.state, StateId::NotStarted);
    assert_eq!(snap.time_remaining, 20);
    assert!(!snap.running);
    assert!(!snap.paused);
    assert_eq!(snap.progress_percent, 0.0);
    assert!(snap.dots.iter().all(|d| *d == DotStatus::Upcoming));
}

#[test]
fn snapshot_mid_run() {
    let mut s = make_session(20);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    for _ in 0..6 {
        s.skip(&mut sink);
    }
    tick_n(&mut s, &mut sink, 5);
    let snap = s.snapshot();
    assert_eq!(snap.pose_index, 6);
    assert!((snap.progress_percent - 50.0).abs() < 1e-4);
    assert!((snap.pose_fraction_remaining() - 0.75).abs() < 1e-6);
    assert_eq!(
        snap.dots.iter().filter(|d| **d == DotStatus::Completed).count(),
        6
    );
    assert_eq!(snap.dots[6], DotStatus::Active);
}

#[test]
fn snapshot_after_completion() {
    let mut s = make_session(5);
    let mut sink = RecordingSink::new();
    s.start(&mut sink);
    for _ in 0..12 {
        s.skip(&mut sink);
    }
    let snap = s.snapshot();
    assert_eq!(snap.state, StateId::Complete);
    assert_eq!(snap.progress_percent, 100.0);
    assert!(snap.dots.iter().all(|d| *d == DotStatus::Completed));
    assert_eq!(snap.time_remaining, 0);
}
