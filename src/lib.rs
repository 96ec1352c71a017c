//! Tempfan library.
//!
//! Exposes the control logic, the activity log and the Linux adapters for
//! integration testing.  The binary in `main.rs` only wires them together.

#![deny(unused_must_use)]

pub mod activity_log;
pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod sensors;
