//! Control loop — the hexagonal core.
//!
//! [`ControlLoop`] owns the hysteresis controller and the activity log.
//! All hardware I/O flows through port traits passed in at call sites,
//! making the whole loop testable with mock adapters and a simulated
//! clock.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │       ControlLoop         │
//! ActuatorPort ◀──│ Hysteresis · ActivityLog  │
//!                 └──────────────────────────┘
//! ```
//!
//! Single-threaded and blocking.  The only suspension point is the sleep
//! at the end of each cycle in [`ControlLoop::run`].

use std::time::Duration;

use log::info;

use crate::activity_log::BoundedLog;
use crate::config::{PwmConfig, SystemConfig};
use crate::control::hysteresis::{FanState, HysteresisController, Transition};
use crate::drivers::fan::DutyLevel;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, TimePort};

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop<C: TimePort> {
    controller: HysteresisController,
    log: BoundedLog<C>,
    pwm: PwmConfig,
    read_interval: Duration,
    alive_interval: Duration,
    cycle_count: u64,
}

impl<C: TimePort> ControlLoop<C> {
    /// Construct the loop from configuration. The activity log and the
    /// heartbeat clock are created here.
    pub fn new(config: &SystemConfig, clock: C) -> Self {
        Self {
            controller: HysteresisController::new(config.thresholds, config.diff_temp_c),
            log: BoundedLog::new(config.log_path.clone(), config.max_log_lines, clock),
            pwm: config.pwm.clone(),
            read_interval: Duration::from_secs(config.read_interval_secs),
            alive_interval: Duration::from_secs(config.alive_interval_secs),
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Write the startup banner.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let t = *self.controller.thresholds();
        self.log
            .append(concat!("Starting tempfan v", env!("CARGO_PKG_VERSION")));
        self.log.append(&format!(
            "Fan output configured (slow {}/{}, fast {}/{})",
            self.pwm.mid, self.pwm.range, self.pwm.range, self.pwm.range
        ));
        self.log.append(&format!(
            "Startup complete, temperature limits: low (below {l}\u{00b0}C), \
             intermediate ({l}\u{00b0}C to {h}\u{00b0}C), high (above {h}\u{00b0}C)",
            l = t.low(),
            h = t.high()
        ));
        sink.emit(&AppEvent::Started(t));
        info!("ControlLoop started, polling every {:?}", self.read_interval);
    }

    /// Poll forever. Only process termination stops this.
    pub fn run(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) -> ! {
        loop {
            self.cycle(hw, sink);
            std::thread::sleep(self.read_interval);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll: sense → decide → actuate and log → heartbeat →
    /// rotation.  Heartbeat and rotation run whether or not the fan moved.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], avoiding a double mutable borrow.
    pub fn cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Option<Transition> {
        self.cycle_count += 1;

        // 1. Sense
        let temperature = hw.read_temperature();

        // 2. Decide (commits the debounce memory on transition)
        let transition = self.controller.update(temperature);

        // 3. Apply
        if let Some(t) = transition {
            hw.set_duty(DutyLevel::for_state(t.new_state, &self.pwm));
            self.log.append(&describe_transition(&t));
            sink.emit(&AppEvent::FanChanged {
                from: t.from,
                to: t.new_state,
                temperature: t.temperature,
            });
        }

        // 4. Heartbeat
        let now = self.log.now();
        if self.log.maybe_heartbeat(now, self.alive_interval) {
            sink.emit(&AppEvent::Heartbeat);
        }

        // 5. Rotation
        match self.log.enforce_cap() {
            Ok(0) => {}
            Ok(evicted) => sink.emit(&AppEvent::LogRotated { evicted }),
            Err(e) => sink.emit(&AppEvent::LogRotationFailed(e)),
        }

        transition
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> FanState {
        self.controller.state()
    }

    /// Cycles executed since construction.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn log(&self) -> &BoundedLog<C> {
        &self.log
    }
}

/// Activity log text for a transition.
pub fn describe_transition(t: &Transition) -> String {
    match t.new_state {
        FanState::Off => format!("Temperature low ({}\u{00b0}C), fan off", t.temperature),
        FanState::Slow => format!(
            "Temperature intermediate ({}\u{00b0}C), fan at 50%",
            t.temperature
        ),
        FanState::Fast => format!("Temperature high ({}\u{00b0}C), fan at 100%", t.temperature),
    }
}
