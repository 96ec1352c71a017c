//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr / journald via `env_logger` in production).
//! This is the channel where activity-log failures become visible.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the process logger.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(t) => {
                info!("START | low={}\u{00b0}C high={}\u{00b0}C", t.low(), t.high());
            }
            AppEvent::FanChanged {
                from,
                to,
                temperature,
            } => {
                info!(
                    "FAN | {:?} -> {:?} | T={}\u{00b0}C | duty={}%",
                    from,
                    to,
                    temperature,
                    to.percent()
                );
            }
            AppEvent::Heartbeat => {
                info!("ALIVE | heartbeat written");
            }
            AppEvent::LogRotated { evicted } => {
                info!("LOG | rotated, evicted={}", evicted);
            }
            AppEvent::LogRotationFailed(e) => {
                warn!("LOG | rotation abandoned: {}", e);
            }
        }
    }
}
