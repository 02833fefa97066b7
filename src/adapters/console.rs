//! Console input adapter.
//!
//! Parses one command per line from a reader and posts the result to the
//! [`EventQueue`].  The reader runs on its own thread so a blocked `stdin`
//! never delays a tick.  End of input is treated as quit.

use core::fmt;
use std::io::{BufRead, Write};
use std::thread::JoinHandle;

use log::{info, warn};

use crate::app::commands::SessionCommand;
use crate::events::{EventQueue, RuntimeEvent};

pub const HELP: &str = "\
commands:
  start          begin the practice
  p | pause      pause / resume
  s | skip       skip to the next pose
  r | restart    start over from the first pose
  + | -          hold 5s longer / shorter
  +N | -N        hold N seconds longer / shorter
  preset N       hold N seconds per pose (15, 30, 45, 60)
  save           remember the current hold
  h | help       show this list
  q | quit       leave";

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(SessionCommand),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand,
    MissingValue,
    BadValue,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::MissingValue => write!(f, "missing number"),
            Self::BadValue => write!(f, "not a number"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one line.  Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let head = head.to_ascii_lowercase();
    let cmd = match head.as_str() {
        "start" | "go" => SessionCommand::Start,
        "p" | "pause" | "resume" => SessionCommand::TogglePause,
        "s" | "skip" | "next" => SessionCommand::Skip,
        "r" | "restart" => SessionCommand::Restart,
        "+" => SessionCommand::IncreaseDuration,
        "-" => SessionCommand::DecreaseDuration,
        "save" => SessionCommand::SavePreferences,
        "preset" | "set" => {
            let value = words.next().ok_or(ParseError::MissingValue)?;
            SessionCommand::SetPreset(parse_number(value)?)
        }
        "h" | "help" | "?" => return Ok(Some(ConsoleInput::Help)),
        "q" | "quit" | "exit" => return Ok(Some(ConsoleInput::Quit)),
        other if other.starts_with(['+', '-']) => {
            SessionCommand::AdjustDuration(parse_number(other)?)
        }
        _ => return Err(ParseError::UnknownCommand),
    };
    Ok(Some(ConsoleInput::Command(cmd)))
}

fn parse_number(text: &str) -> Result<i64, ParseError> {
    text.parse::<i64>().map_err(|_| ParseError::BadValue)
}

/// Where help text and parse errors are written.  The first write failure
/// is logged; later ones are dropped quietly.
struct Feedback<W: Write> {
    out: W,
    write_failed: bool,
}

impl<W: Write> Feedback<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            write_failed: false,
        }
    }

    fn say(&mut self, line: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{line}") {
            if !self.write_failed {
                warn!("console: write failed: {}", e);
                self.write_failed = true;
            }
        }
    }
}

/// Spawn the reader thread.  Help text and parse errors go to `out`.
pub fn spawn_reader<R, W>(input: R, out: W, queue: EventQueue) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    std::thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            let mut feedback = Feedback::new(out);
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("console: read failed: {}", e);
                        break;
                    }
                };
                match parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(ConsoleInput::Command(cmd))) => {
                        queue.push_blocking(RuntimeEvent::Command(cmd));
                    }
                    Ok(Some(ConsoleInput::Help)) => {
                        feedback.say(format_args!("{HELP}"));
                    }
                    Ok(Some(ConsoleInput::Quit)) => {
                        queue.push_blocking(RuntimeEvent::Shutdown);
                        return;
                    }
                    Err(e) => {
                        feedback.say(format_args!("{}: {:?} (try \"help\")", e, line.trim()));
                    }
                }
            }
            info!("console: end of input");
            queue.push_blocking(RuntimeEvent::Shutdown);
        })
}
