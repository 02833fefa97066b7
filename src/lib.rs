//! Namaskar practice library.
//!
//! Exposes the session core, its ports and the host adapters for the
//! binary and for integration testing.  Nothing in [`app`], [`fsm`] or
//! [`timer`] performs I/O; the terminal, the filesystem and the clock are
//! reached only through [`adapters`] and [`drivers`].

#![deny(unused_must_use)]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod report;
pub mod timer;

pub mod adapters;
pub mod drivers;

pub use app::service::PracticeSession;
pub use error::{Error, Result};
