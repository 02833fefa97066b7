//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no terminal,
//! clock or preference file required.

mod mock_io;
mod preference_tests;
mod runtime_tests;
mod session_flow_tests;
