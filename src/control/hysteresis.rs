//! Three-level hysteresis state machine for the cooling fan.
//!
//! The controller remembers the temperature at which it last *changed*
//! the fan state.  A new reading is only classified if it has moved at
//! least `diff` degrees away from that temperature, so sensor jitter
//! around a band edge cannot make the fan flap.
//!
//! ```text
//!         temp < low        low <= temp <= high        temp > high
//!   ──────── Off ────────┼───────── Slow ──────────┼──────── Fast ────────
//! ```

use crate::config::Thresholds;

/// Whole degrees Celsius.
pub type Celsius = i32;

/// Fan output state. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanState {
    #[default]
    Off,
    Slow,
    Fast,
}

impl FanState {
    /// Nominal output as a percentage.
    pub const fn percent(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Slow => 50,
            Self::Fast => 100,
        }
    }
}

/// Debounce memory. Only mutated when a transition is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerSnapshot {
    /// `None` until the first reading has been acted upon.
    pub last_acted_temperature: Option<Celsius>,
    pub last_state: FanState,
}

/// A confirmed state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: FanState,
    pub new_state: FanState,
    pub temperature: Celsius,
}

/// Decide whether `current` warrants a state change.
///
/// Pure function: the snapshot is not touched.  The delta gate is
/// inclusive (`|Δ| == diff` re-evaluates) and is skipped entirely on the
/// first reading, which always yields a transition so the fan is driven to
/// a known level at startup.
pub fn decide(
    current: Celsius,
    snapshot: &ControllerSnapshot,
    thresholds: &Thresholds,
    diff: Celsius,
) -> Option<Transition> {
    let Some(last) = snapshot.last_acted_temperature else {
        return Some(Transition {
            from: snapshot.last_state,
            new_state: thresholds.classify(current),
            temperature: current,
        });
    };

    if current.abs_diff(last) < diff.unsigned_abs() {
        return None;
    }

    let new_state = thresholds.classify(current);
    if new_state == snapshot.last_state {
        return None;
    }

    Some(Transition {
        from: snapshot.last_state,
        new_state,
        temperature: current,
    })
}

/// Owns the debounce memory and commits it on every confirmed transition.
pub struct HysteresisController {
    thresholds: Thresholds,
    diff: Celsius,
    snapshot: ControllerSnapshot,
}

impl HysteresisController {
    pub fn new(thresholds: Thresholds, diff: Celsius) -> Self {
        Self {
            thresholds,
            diff,
            snapshot: ControllerSnapshot::default(),
        }
    }

    /// Feed one reading. Returns the transition the caller must apply.
    pub fn update(&mut self, current: Celsius) -> Option<Transition> {
        let transition = decide(current, &self.snapshot, &self.thresholds, self.diff)?;
        self.snapshot = ControllerSnapshot {
            last_acted_temperature: Some(transition.temperature),
            last_state: transition.new_state,
        };
        Some(transition)
    }

    pub fn state(&self) -> FanState {
        self.snapshot.last_state
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.snapshot
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
}
