//! Terminal presentation adapter.
//!
//! Implements [`EventSink`] by drawing the session on a text terminal:
//! a pose card when a pose loads, a single self-overwriting countdown
//! line per tick, and a summary on completion.  Cues ring the terminal
//! bell (`BEL`, 0x07): once per countdown second, once for a pose
//! change, three times for completion.

use std::io::{self, Write};

use log::warn;

use crate::app::events::{Cue, SessionEvent};
use crate::app::ports::{EventSink, ImagePort};
use crate::report::SessionReport;

use super::image_cache::ImageCache;

const BELL: &str = "\x07";
const BAR_WIDTH: usize = 24;

pub type BoxedImages = ImageCache<Box<dyn ImagePort + Send>>;

pub struct TerminalCueSink<W: Write> {
    out: W,
    bell: bool,
    images: Option<BoxedImages>,
    pose_count: usize,
    write_failed: bool,
}

impl<W: Write> TerminalCueSink<W> {
    pub fn new(out: W, pose_count: usize) -> Self {
        Self {
            out,
            bell: true,
            images: None,
            pose_count,
            write_failed: false,
        }
    }

    /// Look pose images up in `cache` and note their size on the card.
    pub fn with_images(mut self, cache: BoxedImages) -> Self {
        self.images = Some(cache);
        self
    }

    /// Disable audible cues (they are still drawn as text markers).
    pub fn without_bell(mut self) -> Self {
        self.bell = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        if self.bell {
            for _ in 0..times {
                self.out.write_all(BELL.as_bytes())?;
            }
        }
        Ok(())
    }

    fn draw(&mut self, event: &SessionEvent) -> io::Result<()> {
        match event {
            SessionEvent::PoseLoaded {
                index,
                pose,
                duration_secs,
            } => {
                writeln!(self.out)?;
                writeln!(
                    self.out,
                    "── Pose {}/{} ─ {} ─ {}",
                    index + 1,
                    self.pose_count,
                    pose.name,
                    pose.subtitle
                )?;
                writeln!(self.out, "   [{}]  hold {}s", pose.breathing, duration_secs)?;
                writeln!(self.out, "   {}", pose.description)?;
                if let Some(images) = self.images.as_mut() {
                    match images.get(pose.image_ref) {
                        Ok(bytes) => writeln!(self.out, "   image: {} ({} bytes)", pose.image_ref, bytes.len())?,
                        Err(e) => writeln!(self.out, "   image: {} unavailable ({})", pose.image_ref, e)?,
                    }
                }
            }
            SessionEvent::Tick {
                remaining_secs,
                duration_secs,
            } => {
                let filled = if *duration_secs == 0 {
                    0
                } else {
                    ((BAR_WIDTH * *remaining_secs as usize) / *duration_secs as usize).min(BAR_WIDTH)
                };
                write!(
                    self.out,
                    "\r   {:>3}s [{}{}]",
                    remaining_secs,
                    "#".repeat(filled),
                    "-".repeat(BAR_WIDTH - filled)
                )?;
            }
            SessionEvent::CountdownWarning { .. } => {
                write!(self.out, " !")?;
            }
            SessionEvent::PoseAdvanced { .. } => {
                writeln!(self.out)?;
            }
            SessionEvent::SessionComplete {
                total_poses,
                total_secs,
            } => {
                let report = SessionReport::new(*total_poses, *total_secs);
                writeln!(self.out)?;
                writeln!(self.out, "══ Practice complete ══")?;
                writeln!(self.out, "   {} poses · {}", report.total_poses, report)?;
                writeln!(self.out, "   type \"r\" to practise again, \"q\" to leave")?;
            }
            SessionEvent::Cue(Cue::Countdown) | SessionEvent::Cue(Cue::PoseChange) => {
                self.ring(1)?;
            }
            SessionEvent::Cue(Cue::Completion) => {
                self.ring(3)?;
            }
            SessionEvent::PauseChanged { paused } => {
                writeln!(self.out)?;
                writeln!(self.out, "   {}", if *paused { "‖ paused" } else { "▶ resumed" })?;
            }
            SessionEvent::DurationChanged { secs } => {
                writeln!(self.out)?;
                writeln!(self.out, "   hold: {}s per pose", secs)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> EventSink for TerminalCueSink<W> {
    fn emit(&mut self, event: &SessionEvent) {
        if let Err(e) = self.draw(event) {
            if !self.write_failed {
                warn!("terminal: write failed: {}", e);
                self.write_failed = true;
            }
        }
    }
}
