//! crates/diag/src/format.rs
//! Rendering of one diagnostic record into one output line.

use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::level::Level;
use crate::subsys::Subsys;

/// Upper bound on the rendered line, excluding the trailing newline.
///
/// Overlong lines are truncated, never split across writes and never an
/// error. The cap respects UTF-8 boundaries.
pub(crate) const LINE_CAPACITY: usize = 1024;

/// Everything needed to render one line. Stack-only and never stored.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Record<'a> {
    pub level: Level,
    pub subsys: Subsys,
    pub file: &'a str,
    pub line: u32,
    pub timestamp: &'a str,
    pub hostname: &'a str,
    pub pid: u32,
    pub tid: i32,
    pub label: &'a str,
    pub device: i32,
    /// Milliseconds since the initialization epoch; TRACE layouts only.
    pub elapsed_ms: f64,
    pub message: &'a str,
}

/// Renders a record into a complete newline-terminated line.
///
/// The layout depends on the severity. Levels without a layout (VERSION,
/// ABORT, NONE) render nothing and the call becomes a no-op; that matches
/// the long-standing output contract where those levels only influence
/// filtering.
pub(crate) fn render(record: &Record<'_>) -> Option<String> {
    let mut line = String::with_capacity(128 + record.message.len().min(LINE_CAPACITY));
    match record.level {
        Level::Warn => {
            let _ = write!(
                line,
                "\n{} {}:{}:{} [{}][{}] {}:{} NCCL WARN {}",
                record.timestamp,
                record.hostname,
                record.pid,
                record.tid,
                record.device,
                record.label,
                record.file,
                record.line,
                record.message,
            );
        }
        Level::Info => {
            let _ = write!(
                line,
                "{} {}:{}:{} [{}][{}] NCCL INFO {}",
                record.timestamp,
                record.hostname,
                record.pid,
                record.tid,
                record.device,
                record.label,
                record.message,
            );
        }
        // Call tracing skips the device query entirely, so the layout has no
        // device column. The comparison is exact: CALL combined with other
        // flags uses the regular trace layout.
        Level::Trace if record.subsys == Subsys::CALL => {
            let _ = write!(
                line,
                "{} {}:{}:{} [{}] NCCL CALL {}",
                record.timestamp,
                record.hostname,
                record.pid,
                record.tid,
                record.label,
                record.message,
            );
        }
        Level::Trace => {
            let _ = write!(
                line,
                "{} {}:{}:{} [{}][{}] {:.6} {}:{} NCCL TRACE {}",
                record.timestamp,
                record.hostname,
                record.pid,
                record.tid,
                record.device,
                record.label,
                record.elapsed_ms,
                record.file,
                record.line,
                record.message,
            );
        }
        Level::None | Level::Version | Level::Abort => return None,
    }

    truncate_on_char_boundary(&mut line, LINE_CAPACITY);
    line.push('\n');
    Some(line)
}

/// Truncates `text` to at most `max` bytes without splitting a code point.
pub(crate) fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// Formats the current wall-clock time as `YYYY/MM/DD HH:MM:SS` (UTC).
pub(crate) fn now_timestamp() -> String {
    let epoch_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    format_timestamp(epoch_secs)
}

/// Formats a Unix epoch timestamp as `YYYY/MM/DD HH:MM:SS`.
///
/// The conversion is done manually to keep the hot logging path free of
/// calendar-library dependencies.
pub(crate) fn format_timestamp(epoch_secs: u64) -> String {
    let total_days = epoch_secs / 86400;
    let day_seconds = (epoch_secs % 86400) as u32;
    let hours = day_seconds / 3600;
    let minutes = (day_seconds % 3600) / 60;
    let seconds = day_seconds % 60;

    let (year, month, day) = civil_from_days(total_days as i64);

    format!("{year:04}/{month:02}/{day:02} {hours:02}:{minutes:02}:{seconds:02}")
}

/// Converts a day count (days since 1970-01-01) to a civil date (year, month, day).
///
/// Algorithm from Howard Hinnant's date library (public domain).
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m, d)
}
