//! Fuzz target: `console::parse_line`
//!
//! Drives arbitrary text into the console command parser and asserts that
//! it never panics and that blank input never yields a command.
//!
//! cargo fuzz run fuzz_console_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use namaskar::adapters::console::parse_line;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    let parsed = parse_line(line);
    if line.trim().is_empty() {
        assert_eq!(parsed, Ok(None), "blank line must parse to nothing");
    }
});
