//! Fuzz target: `BoundedLog` rotation and append
//!
//! The first byte picks the line cap, the rest is written verbatim as the
//! log file body.  Verifies:
//! - No panics on arbitrary (non-UTF-8, unterminated) file contents
//! - `enforce_cap` leaves at most `max_lines` lines
//! - The newest lines survive byte-for-byte and in order
//! - `try_append` adds exactly one line, never longer than `MAX_LINE_LEN`
//!
//! cargo fuzz run fuzz_activity_log

#![no_main]

use std::fs;

use chrono::{DateTime, Local, TimeZone};
use libfuzzer_sys::fuzz_target;
use tempfan::activity_log::{BoundedLog, MAX_LINE_LEN};
use tempfan::app::ports::TimePort;

struct FixedClock;

impl TimePort for FixedClock {
    fn now(&self) -> DateTime<Local> {
        Local
            .timestamp_opt(1_498_208_707, 0)
            .single()
            .unwrap_or_else(Local::now)
    }
}

/// Lines as `BufRead::split(b'\n')` yields them: a trailing newline does
/// not start another line.
fn split_lines(body: &[u8]) -> Vec<&[u8]> {
    if body.is_empty() {
        return Vec::new();
    }
    let body = body.strip_suffix(b"\n").unwrap_or(body);
    body.split(|&b| b == b'\n').collect()
}

fuzz_target!(|data: &[u8]| {
    let Some((&cap, body)) = data.split_first() else {
        return;
    };
    let max_lines = usize::from(cap % 32);

    let dir = tempfile::tempdir().expect("scratch dir");
    let path = dir.path().join("tempfan.log");
    fs::write(&path, body).expect("seed log");

    // ── Rotation ─────────────────────────────────────────────
    let mut log = BoundedLog::new(&path, max_lines, FixedClock);
    let original = split_lines(body);
    assert_eq!(log.line_count(), original.len());

    let evicted = log.enforce_cap().expect("rotation in a writable dir");
    assert!(log.line_count() <= max_lines);
    assert_eq!(evicted, original.len().saturating_sub(max_lines));

    let after = fs::read(&path).expect("log still present");
    if evicted == 0 {
        assert_eq!(after, body, "untouched when under the cap");
    } else {
        let mut expected = Vec::new();
        for line in &original[evicted..] {
            expected.extend_from_slice(line);
            expected.push(b'\n');
        }
        assert_eq!(after, expected, "newest lines survive in order");
    }

    // ── Append ───────────────────────────────────────────────
    let fresh = dir.path().join("fresh.log");
    let mut log = BoundedLog::new(&fresh, max_lines, FixedClock);
    let message = String::from_utf8_lossy(body);
    log.try_append(&message).expect("append in a writable dir");
    assert_eq!(log.line_count(), 1);

    let written = fs::read_to_string(&fresh).expect("appended line is UTF-8");
    let line = written.strip_suffix('\n').expect("newline-terminated");
    assert!(line.len() <= MAX_LINE_LEN);
    assert!(!line.contains(['\n', '\r']));
});
