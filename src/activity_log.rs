//! Bounded, line-oriented activity log.
//!
//! A flat UTF-8 text file, one event per line:
//!
//! ```text
//! [23/6/2017-9:5:7] Temperature high (70°C), fan at 100%
//! ```
//!
//! The file never holds more than `max_lines` lines after
//! [`BoundedLog::enforce_cap`] runs; the oldest lines go first.  Rotation
//! copies the survivors into `<path>.tmp` and renames it over the original,
//! so a failed copy leaves the original intact.  The read-and-copy step is
//! not atomic with respect to other writers; a single writer process is
//! assumed.
//!
//! Every I/O failure is swallowed by the public best-effort API: logging
//! must never stop the fan controller.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Timelike};
use log::{debug, warn};

use crate::app::ports::TimePort;
use crate::error::LogError;

/// Longest line written, timestamp included, newline excluded.
pub const MAX_LINE_LEN: usize = 128;

/// Fixed message for the liveness heartbeat.
pub const HEARTBEAT_MESSAGE: &str = "Status: alive and running";

const LINE_BUF: usize = MAX_LINE_LEN + 1;

/// File-backed log with a line-count cap and a heartbeat clock.
pub struct BoundedLog<C: TimePort> {
    path: PathBuf,
    tmp_path: PathBuf,
    max_lines: usize,
    clock: C,
    last_heartbeat: DateTime<Local>,
}

impl<C: TimePort> BoundedLog<C> {
    /// The heartbeat clock starts now; the first heartbeat is due one
    /// interval after construction.
    pub fn new(path: impl Into<PathBuf>, max_lines: usize, clock: C) -> Self {
        let path = path.into();
        let tmp_path = tmp_path_for(&path);
        let last_heartbeat = clock.now();
        Self {
            path,
            tmp_path,
            max_lines,
            clock,
            last_heartbeat,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Current time on the log's clock.
    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn last_heartbeat(&self) -> DateTime<Local> {
        self.last_heartbeat
    }

    /// Append one stamped line. Best-effort: failures are dropped.
    pub fn append(&mut self, message: &str) {
        if let Err(e) = self.try_append(message) {
            debug!("activity log: append to {} skipped: {}", self.path.display(), e);
        }
    }

    /// Append one stamped line, reporting failure.
    ///
    /// The file is opened in append mode for this write only, and the line
    /// goes out in a single `write_all` so existing content is never
    /// touched.
    pub fn try_append(&mut self, message: &str) -> Result<(), LogError> {
        let mut line = format_line(&self.clock.now(), message);
        // Capacity is MAX_LINE_LEN + 1, always room for the newline.
        let _ = line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|_| LogError::Unavailable)?;
        file.write_all(line.as_bytes())
            .map_err(|_| LogError::Unavailable)
    }

    /// Number of lines in the file. 0 if it does not exist or cannot be
    /// opened.  An unterminated trailing fragment counts as a line.
    pub fn line_count(&self) -> usize {
        let Ok(file) = File::open(&self.path) else {
            return 0;
        };
        BufReader::new(file)
            .split(b'\n')
            .take_while(Result::is_ok)
            .count()
    }

    /// Drop the first `n` lines, preserving the order of the rest.
    ///
    /// Returns how many lines were actually dropped.  If the temporary file
    /// cannot be created or written the original is left untouched and
    /// [`LogError::RotationFailed`] is returned.
    pub fn evict_oldest(&mut self, n: usize) -> Result<usize, LogError> {
        let source = File::open(&self.path).map_err(|_| LogError::Unavailable)?;
        let tmp = File::create(&self.tmp_path).map_err(|_| LogError::RotationFailed)?;

        let evicted = match copy_survivors(source, tmp, n) {
            Ok(evicted) => evicted,
            Err(e) => {
                warn!("activity log: rotation copy failed: {}", e);
                let _ = fs::remove_file(&self.tmp_path);
                return Err(LogError::RotationFailed);
            }
        };

        self.replace_original()?;
        Ok(evicted)
    }

    /// Move the finished temporary file over the log.  On failure the
    /// temporary file is removed and the original stays as it was.
    fn replace_original(&self) -> Result<(), LogError> {
        // rename(2) replaces the destination atomically.
        fs::rename(&self.tmp_path, &self.path).map_err(|e| {
            warn!("activity log: replacing {} failed: {}", self.path.display(), e);
            let _ = fs::remove_file(&self.tmp_path);
            LogError::ReplaceFailed
        })
    }

    /// Evict oldest lines until the cap is respected.
    ///
    /// Returns the total number of lines evicted.  Stops at the first
    /// failure; the next call retries.
    pub fn enforce_cap(&mut self) -> Result<usize, LogError> {
        let mut total = 0;
        loop {
            let count = self.line_count();
            if count <= self.max_lines {
                return Ok(total);
            }
            let evicted = self.evict_oldest(count - self.max_lines)?;
            if evicted == 0 {
                return Ok(total);
            }
            total += evicted;
        }
    }

    /// Append the heartbeat line if at least `interval` has elapsed since
    /// the previous one. Returns whether a heartbeat was due.
    ///
    /// A clock that moved backwards never makes a heartbeat due early.
    pub fn maybe_heartbeat(&mut self, now: DateTime<Local>, interval: Duration) -> bool {
        let due = now
            .signed_duration_since(self.last_heartbeat)
            .to_std()
            .is_ok_and(|elapsed| elapsed >= interval);
        if due {
            self.append(HEARTBEAT_MESSAGE);
            self.last_heartbeat = now;
        }
        due
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Copy every line after the first `skip` into `dest`, newline-terminated.
fn copy_survivors(source: File, dest: File, skip: usize) -> io::Result<usize> {
    let mut writer = BufWriter::new(dest);
    let mut evicted = 0;
    for (index, line) in BufReader::new(source).split(b'\n').enumerate() {
        let line = line?;
        if index < skip {
            evicted += 1;
            continue;
        }
        writer.write_all(&line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(evicted)
}

/// `[D/M/YYYY-H:M:S] message`, unpadded fields, truncated to
/// [`MAX_LINE_LEN`] bytes on a char boundary.  Line breaks inside the
/// message are flattened to spaces so one event stays one line.
fn format_line(now: &DateTime<Local>, message: &str) -> heapless::String<LINE_BUF> {
    let mut line = heapless::String::new();
    // The stamp is at most 22 bytes, it always fits.
    let _ = core::fmt::Write::write_fmt(
        &mut line,
        format_args!(
            "[{}/{}/{}-{}:{}:{}] ",
            now.day(),
            now.month(),
            now.year(),
            now.hour(),
            now.minute(),
            now.second()
        ),
    );
    for c in message.chars() {
        let c = if matches!(c, '\n' | '\r') { ' ' } else { c };
        if line.len() + c.len_utf8() > MAX_LINE_LEN || line.push(c).is_err() {
            break;
        }
    }
    line
}
