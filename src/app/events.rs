//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The activity log file is
//! written directly by the loop; sinks are an additional channel (console,
//! journal) where failures that the activity log cannot record still show
//! up.

use crate::config::Thresholds;
use crate::control::hysteresis::{Celsius, FanState};
use crate::error::LogError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The control loop has started with these bands.
    Started(Thresholds),

    /// The fan changed state.
    FanChanged {
        from: FanState,
        to: FanState,
        temperature: Celsius,
    },

    /// Periodic liveness heartbeat written.
    Heartbeat,

    /// Oldest lines were evicted to respect the line cap.
    LogRotated { evicted: usize },

    /// Rotation was abandoned this cycle; retried on the next one.
    LogRotationFailed(LogError),
}
