//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensor, fan, clock, event sinks) implement these traits.
//! The [`ControlLoop`](super::service::ControlLoop) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! None of these return errors: each adapter degrades on its own side of
//! the boundary, because nothing may stop the control loop.

use chrono::{DateTime, Local};

use crate::control::hysteresis::Celsius;
use crate::drivers::fan::DutyLevel;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per poll.
pub trait SensorPort {
    /// Current CPU temperature in whole degrees. 0 when unreadable.
    fn read_temperature(&mut self) -> Celsius;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port. Fire-and-forget, no feedback.
pub trait ActuatorPort {
    fn set_duty(&mut self, level: DutyLevel);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port in addition to writing the activity log.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for log timestamps and heartbeat cadence.
pub trait TimePort {
    fn now(&self) -> DateTime<Local>;
}

impl<T: TimePort + ?Sized> TimePort for &T {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}
