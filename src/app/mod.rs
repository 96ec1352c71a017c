//! Application core — pure domain orchestration, zero direct I/O.
//!
//! The control loop ties the hysteresis controller and the activity log
//! together.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer testable without a
//! thermal zone or a PWM chip.

pub mod events;
pub mod ports;
pub mod service;
