//! Fuzz target: arbitrary operation streams against `PracticeSession`
//!
//! Each input byte selects one operation (tick, stale tick, start, pause,
//! skip, restart, duration change).  After every operation the session
//! must still satisfy its range invariants.
//!
//! cargo fuzz run fuzz_session_ops

#![no_main]

use libfuzzer_sys::fuzz_target;
use namaskar::PracticeSession;
use namaskar::app::events::SessionEvent;
use namaskar::app::ports::EventSink;
use namaskar::catalog::PoseCatalog;
use namaskar::config::{DurationConfig, MAX_DURATION_SECS, MIN_DURATION_SECS, PracticeConfig};
use namaskar::fsm::StateId;

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &SessionEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut s = PracticeSession::new(
        PoseCatalog::surya_namaskar(),
        DurationConfig::new(5),
        PracticeConfig::default(),
    );
    let mut sink = Discard;
    let mut stale = s.current_stamp();

    for &b in data {
        let previous = s.current_stamp();
        match b % 8 {
            0..=2 => {
                let st = s.current_stamp();
                s.on_tick(st, &mut sink);
            }
            3 => {
                s.on_tick(stale, &mut sink);
            }
            4 => {
                s.start(&mut sink);
            }
            5 => {
                s.toggle_pause(&mut sink);
            }
            6 => {
                s.skip(&mut sink);
            }
            _ => {
                if b & 0x80 != 0 {
                    s.restart(&mut sink);
                } else {
                    s.adjust_duration(i64::from(b as i8) * 3, &mut sink);
                }
            }
        }
        stale = previous;

        assert!(s.pose_index() < s.catalog().len());
        assert!(s.time_remaining() <= s.pose_duration());
        let d = s.configured_duration();
        assert!((MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&d));
        if s.state() == StateId::Complete {
            assert_eq!(s.time_remaining(), 0);
        }
    }
});
