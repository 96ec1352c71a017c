//! System clock adapter.
//!
//! Local wall-clock time from the OS.  Not monotonic: if NTP steps the
//! clock the heartbeat cadence shifts with it, which is acceptable for a
//! liveness marker.

use chrono::{DateTime, Local};

use crate::app::ports::TimePort;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimePort for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
