//! Integration tests for the ControlLoop → actuator / activity log pipeline.

use std::fs;
use std::path::Path;

use tempfan::activity_log::HEARTBEAT_MESSAGE;
use tempfan::app::events::AppEvent;
use tempfan::app::service::ControlLoop;
use tempfan::config::SystemConfig;
use tempfan::control::hysteresis::FanState;
use tempfan::error::LogError;

use crate::mock_hw::{MockHardware, RecordingSink, SimClock, T0};

fn config_in(dir: &Path) -> SystemConfig {
    SystemConfig {
        log_path: dir.join("tempfan.log"),
        ..SystemConfig::default()
    }
}

fn log_lines(config: &SystemConfig) -> Vec<String> {
    fs::read_to_string(&config.log_path)
        .unwrap_or_default()
        .lines()
        .map(str::to_owned)
        .collect()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_writes_banner_and_emits_started() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut sink = RecordingSink::new();

    control.start(&mut sink);

    let lines = log_lines(&config);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Starting tempfan"));
    assert!(lines[2].contains("below 55\u{00b0}C"));
    assert!(lines[2].contains("above 68\u{00b0}C"));
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started(_)]));
}

// ── End-to-end: [70, 71, 40] ──────────────────────────────────

#[test]
fn readings_70_71_40_produce_two_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[70, 71, 40]);
    let mut sink = RecordingSink::new();

    // First reading: gate skipped, Fast.
    let t1 = control.cycle(&mut hw, &mut sink).unwrap();
    assert_eq!((t1.new_state, t1.temperature), (FanState::Fast, 70));

    // 71: delta 1 < 2, ignored.
    clock.advance(5);
    assert_eq!(control.cycle(&mut hw, &mut sink), None);

    // 40: delta 30 >= 2, Off.
    clock.advance(5);
    let t2 = control.cycle(&mut hw, &mut sink).unwrap();
    assert_eq!((t2.new_state, t2.temperature), (FanState::Off, 40));

    assert_eq!(hw.duty_values(), [1023, 0]);
    assert_eq!(sink.fan_changes(), 2);
    assert_eq!(control.state(), FanState::Off);
    assert_eq!(control.cycle_count(), 3);

    let lines = log_lines(&config);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        format!(
            "{}Temperature high (70\u{00b0}C), fan at 100%",
            stamp(&clock, -10)
        )
    );
    assert!(lines[1].ends_with("Temperature low (40\u{00b0}C), fan off"));
}

/// Stamp prefix for the clock's time shifted by `offset` seconds.
fn stamp(clock: &SimClock, offset: i64) -> String {
    use chrono::{Datelike, Timelike};
    use tempfan::app::ports::TimePort;
    let now = clock.now() + chrono::Duration::seconds(offset);
    format!(
        "[{}/{}/{}-{}:{}:{}] ",
        now.day(),
        now.month(),
        now.year(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

// ── Hysteresis through the loop ───────────────────────────────

#[test]
fn jitter_inside_delta_never_moves_the_fan() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    // 54/55/56 straddle the low threshold but stay within 1 °C of 55.
    let mut hw = MockHardware::with_readings(&[55, 54, 56, 54, 55, 56, 54]);
    let mut sink = RecordingSink::new();

    for _ in 0..7 {
        control.cycle(&mut hw, &mut sink);
        clock.advance(5);
    }

    assert_eq!(hw.duty_values(), [512]);
    assert_eq!(control.state(), FanState::Slow);
    assert_eq!(log_lines(&config).len(), 1);
}

#[test]
fn qualifying_reading_in_same_band_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[70, 80, 90]);
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        control.cycle(&mut hw, &mut sink);
    }

    assert_eq!(hw.duties.len(), 1);
    assert_eq!(sink.fan_changes(), 1);
}

#[test]
fn cold_first_reading_still_drives_the_fan_off() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[0]);
    let mut sink = RecordingSink::new();

    let t = control.cycle(&mut hw, &mut sink).unwrap();
    assert_eq!(t.new_state, FanState::Off);
    assert_eq!(hw.duty_values(), [0]);
}

#[test]
fn steady_reading_holds_until_a_new_one_arrives() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[60]);
    let mut sink = RecordingSink::new();

    // The last reading repeats while nothing new is queued.
    for _ in 0..3 {
        control.cycle(&mut hw, &mut sink);
    }
    assert_eq!(control.state(), FanState::Slow);

    hw.push_reading(75);
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Fast);

    hw.push_reading(50);
    control.cycle(&mut hw, &mut sink);
    assert_eq!(control.state(), FanState::Off);

    assert_eq!(hw.duty_values(), [512, 1023, 0]);
    assert_eq!(sink.fan_changes(), 3);
}

// ── Heartbeat ─────────────────────────────────────────────────

#[test]
fn heartbeat_once_per_alive_interval() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[60]);
    let mut sink = RecordingSink::new();

    // 30 simulated minutes at the default 5 s poll.
    for _ in 0..360 {
        clock.advance(5);
        control.cycle(&mut hw, &mut sink);
    }

    assert_eq!(sink.heartbeats(), 3);
    let lines = log_lines(&config);
    let beats = lines
        .iter()
        .filter(|l| l.ends_with(HEARTBEAT_MESSAGE))
        .count();
    assert_eq!(beats, 3);
    assert_eq!(lines.len(), 4); // one transition + three heartbeats
}

// ── Rotation ──────────────────────────────────────────────────

#[test]
fn cycle_rotates_oldest_lines_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = SystemConfig {
        max_log_lines: 3,
        ..config_in(dir.path())
    };
    fs::write(&config.log_path, "old1\nold2\nold3\nold4\nold5\n").unwrap();
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[70]);
    let mut sink = RecordingSink::new();

    control.cycle(&mut hw, &mut sink);

    let lines = log_lines(&config);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[..2], ["old4", "old5"]);
    assert!(lines[2].ends_with("fan at 100%"));
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::LogRotated { evicted: 3 }))
    );
}

#[test]
fn rotation_failure_is_reported_and_loop_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = SystemConfig {
        max_log_lines: 1,
        ..config_in(dir.path())
    };
    fs::write(&config.log_path, "old1\nold2\n").unwrap();
    let tmp = dir.path().join("tempfan.log.tmp");
    fs::create_dir(&tmp).unwrap();

    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[70, 40]);
    let mut sink = RecordingSink::new();

    control.cycle(&mut hw, &mut sink);
    assert!(
        sink.events
            .iter()
            .any(|e| matches!(e, AppEvent::LogRotationFailed(LogError::RotationFailed)))
    );
    assert_eq!(log_lines(&config).len(), 3);

    // Next cycle still acts on the fan and retries rotation.
    fs::remove_dir(&tmp).unwrap();
    control.cycle(&mut hw, &mut sink);
    assert_eq!(hw.duty_values(), [1023, 0]);
    let lines = log_lines(&config);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("fan off"));
}

#[test]
fn unwritable_log_does_not_stop_control() {
    let dir = tempfile::tempdir().unwrap();
    let config = SystemConfig {
        log_path: dir.path().join("missing-dir").join("tempfan.log"),
        ..SystemConfig::default()
    };
    let clock = SimClock::at(T0);
    let mut control = ControlLoop::new(&config, &clock);
    let mut hw = MockHardware::with_readings(&[70, 40]);
    let mut sink = RecordingSink::new();

    control.cycle(&mut hw, &mut sink);
    control.cycle(&mut hw, &mut sink);

    assert_eq!(hw.duty_values(), [1023, 0]);
    assert_eq!(control.log().line_count(), 0);
}
