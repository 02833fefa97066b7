//! Runtime wiring: metronome thread and console reader feeding the
//! control loop through the event queue.

use std::io::Cursor;
use std::time::{Duration, Instant};

use namaskar::adapters::console;
use namaskar::drivers::metronome::Metronome;
use namaskar::events::{EventQueue, RuntimeEvent};
use namaskar::fsm::StateId;

use crate::mock_io::{FlakyPrefs, RecordingSink, make_session};

/// Apply one runtime event the way the binary's control loop does.
/// Returns `false` on shutdown.
fn apply(
    session: &mut namaskar::PracticeSession,
    event: RuntimeEvent,
    prefs: &mut FlakyPrefs,
    sink: &mut RecordingSink,
) -> bool {
    match event {
        RuntimeEvent::Tick(stamp) => {
            session.on_tick(stamp, sink);
            true
        }
        RuntimeEvent::Command(cmd) => {
            session.handle_command(cmd, prefs, sink);
            true
        }
        RuntimeEvent::Shutdown => false,
    }
}

#[test]
fn metronome_drives_a_full_session() {
    let mut session = make_session(5);
    let mut sink = RecordingSink::new();
    let mut prefs = FlakyPrefs::new();
    let queue = EventQueue::new();
    let mut metronome =
        Metronome::spawn(Duration::from_millis(2), session.timer_epoch(), queue.clone()).unwrap();

    session.start(&mut sink);
    while session.state() != StateId::Complete {
        let event = queue.wait();
        apply(&mut session, event, &mut prefs, &mut sink);
    }
    metronome.stop();

    // Late or stale pulses never count: exactly five per pose.
    assert_eq!(sink.ticks(), 60);
    assert_eq!(sink.completions(), vec![(12, 60)]);

    // Nothing left in the queue can move a completed session.
    queue.drain(|e| {
        apply(&mut session, e, &mut prefs, &mut sink);
    });
    assert_eq!(sink.ticks(), 60);
}

/// Block until the metronome delivers a tick the session admits.
fn next_admitted_tick(
    session: &mut namaskar::PracticeSession,
    queue: &EventQueue,
    sink: &mut RecordingSink,
) {
    loop {
        if let RuntimeEvent::Tick(stamp) = queue.wait() {
            if session.on_tick(stamp, sink) {
                return;
            }
        }
    }
}

#[test]
fn skip_gives_the_new_pose_a_full_first_period() {
    let period = Duration::from_millis(120);
    let mut session = make_session(15);
    let mut sink = RecordingSink::new();
    let queue = EventQueue::new();
    let mut metronome =
        Metronome::spawn(period, session.timer_epoch(), queue.clone()).unwrap();

    session.start(&mut sink);
    next_admitted_tick(&mut session, &queue, &mut sink);
    assert_eq!(session.time_remaining(), 14);

    // Skip late in the period; the old schedule would tick again almost
    // immediately.
    std::thread::sleep(period * 3 / 4);
    let skipped_at = Instant::now();
    session.skip(&mut sink);
    next_admitted_tick(&mut session, &queue, &mut sink);
    let waited = skipped_at.elapsed();
    metronome.stop();

    assert_eq!(session.pose_index(), 1);
    assert_eq!(session.time_remaining(), 14);
    assert!(waited >= period, "first tick of the new pose after {waited:?}");
}

#[test]
fn restart_gives_the_first_pose_a_full_first_period() {
    let period = Duration::from_millis(120);
    let mut session = make_session(15);
    let mut sink = RecordingSink::new();
    let queue = EventQueue::new();
    let mut metronome =
        Metronome::spawn(period, session.timer_epoch(), queue.clone()).unwrap();

    session.start(&mut sink);
    next_admitted_tick(&mut session, &queue, &mut sink);
    std::thread::sleep(period * 3 / 4);
    let restarted_at = Instant::now();
    session.restart(&mut sink);
    next_admitted_tick(&mut session, &queue, &mut sink);
    let waited = restarted_at.elapsed();
    metronome.stop();

    assert_eq!(session.pose_index(), 0);
    assert!(waited >= period, "first tick after restart after {waited:?}");
}

#[test]
fn idle_session_receives_no_pulses() {
    let session = make_session(5);
    let queue = EventQueue::new();
    let mut metronome =
        Metronome::spawn(Duration::from_millis(1), session.timer_epoch(), queue.clone()).unwrap();
    std::thread::sleep(Duration::from_millis(30));
    metronome.stop();
    assert!(queue.is_empty());
}

#[test]
fn console_script_drives_session() {
    let mut session = make_session(15);
    let mut sink = RecordingSink::new();
    let mut prefs = FlakyPrefs::new();
    let queue = EventQueue::new();

    let script = "start\n+\np\ns\ns\nsave\nq\n";
    console::spawn_reader(Cursor::new(script.as_bytes().to_vec()), std::io::sink(), queue.clone())
        .unwrap()
        .join()
        .unwrap();

    while let Some(event) = queue.try_pop() {
        if !apply(&mut session, event, &mut prefs, &mut sink) {
            break;
        }
    }

    assert_eq!(session.state(), StateId::Active);
    assert_eq!(session.pose_index(), 2);
    assert_eq!(session.time_remaining(), 20);
    assert!(!session.is_paused());
    assert_eq!(prefs.raw.as_deref(), Some("20"));
}
