//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with the activity log
//! in a scratch directory; no real hardware required.

mod control_loop_tests;
mod hardware_tests;
