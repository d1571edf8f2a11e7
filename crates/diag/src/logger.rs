//! crates/diag/src/logger.rs
//! The common logging entry point behind the `warn_log!` / `info_log!` /
//! `trace_log!` macros.

use std::fmt;
use std::sync::OnceLock;

use crate::config;
use crate::format::{self, Record};
use crate::last_error;
use crate::level::Level;
use crate::subsys::Subsys;
use crate::thread;

/// Device id rendered when no accelerator context is active.
pub const NO_DEVICE: i32 = -1;

static DEVICE_QUERY: OnceLock<fn() -> i32> = OnceLock::new();

/// Registers the accelerator layer's device-id query.
///
/// Log lines include the device the calling thread is bound to. The logger
/// itself has no accelerator dependency, so the layer that owns device
/// contexts registers a query here during its own bootstrap. Only the first
/// registration takes effect; without one, lines render [`NO_DEVICE`]. The
/// query must not panic.
pub fn register_device_query(query: fn() -> i32) {
    let _ = DEVICE_QUERY.set(query);
}

fn device_id() -> i32 {
    DEVICE_QUERY.get().map_or(NO_DEVICE, |query| query())
}

/// Logs one diagnostic record.
///
/// This is the common path shared by every severity:
///
/// 1. resolve the process configuration (one-time work on the first call);
/// 2. apply the calling thread's warning suppression, demoting WARN to INFO
///    under the suppression's subsystem;
/// 3. update the last-error register for calls still carrying WARN;
/// 4. drop the call unless its severity passes the configured ceiling and
///    its subsystem intersects the configured mask;
/// 5. resolve the thread identity, render the line, and hand it to the
///    output target in a single write. Warnings going to a file target are
///    mirrored to the error stream.
///
/// Call sites normally go through the macros, which capture the source
/// location and defer argument formatting.
pub fn log(level: Level, subsys: Subsys, file: &str, line: u32, message: fmt::Arguments<'_>) {
    let config = config::config();

    let suppression = thread::warn_suppression();
    let (level, subsys) = if level == Level::Warn && !suppression.is_empty() {
        (Level::Info, suppression)
    } else {
        (level, subsys)
    };

    if level == Level::Warn {
        last_error::record_warning(message);
    }

    if config.level < level || !subsys.intersects(config.mask) {
        return;
    }

    // Call tracing is the hottest path; skip the device query there.
    let device = if level == Level::Trace && subsys == Subsys::CALL {
        NO_DEVICE
    } else {
        device_id()
    };

    let timestamp = format::now_timestamp();
    let elapsed_ms = config.epoch.elapsed().as_secs_f64() * 1000.0;
    let text = message.to_string();

    thread::with_identity(|identity| {
        let record = Record {
            level,
            subsys,
            file,
            line,
            timestamp: &timestamp,
            hostname: &config.hostname,
            pid: config.pid,
            tid: identity.tid,
            label: &identity.label,
            device,
            elapsed_ms,
            message: &text,
        };
        if let Some(rendered) = format::render(&record) {
            #[cfg(feature = "tracing")]
            crate::tracing_bridge::forward(level, subsys, &text);

            let mirror = config.target.is_file() && level == Level::Warn;
            config.target.write_line(&rendered, mirror);
        }
    });
}
