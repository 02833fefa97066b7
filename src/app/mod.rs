//! Application core — pure session logic, zero I/O.
//!
//! This module contains the business rules for a practice run: FSM
//! orchestration, duration handling and command dispatch.  All interaction
//! with the terminal, the filesystem and the clock happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! a real front-end.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
