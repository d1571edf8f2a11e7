//! crates/diag/src/config.rs
//! One-time resolution of the process-wide debug configuration.

use std::sync::OnceLock;
use std::time::Instant;

use cvars::Cvars;

use crate::level::Level;
use crate::platform;
use crate::sink::{self, OutputTarget};
use crate::subsys::{self, Subsys};

/// The resolved diagnostic configuration.
///
/// Built exactly once, on the first log call or an explicit
/// [`ensure_init`], and immutable afterwards: the hot path reads it without
/// locks. Publication through a `OnceLock` gives the classic double-checked
/// shape — an atomic acquire load on the fast path and a lock around the
/// single slow-path execution, with concurrent first callers blocking until
/// the winner finishes.
#[derive(Debug)]
pub(crate) struct DebugConfig {
    /// Configured severity ceiling.
    pub level: Level,
    /// Configured subsystem mask.
    pub mask: Subsys,
    /// Hostname, cached for the process lifetime.
    pub hostname: String,
    /// Process id, cached for the process lifetime.
    pub pid: u32,
    /// Monotonic epoch for TRACE relative timestamps.
    pub epoch: Instant,
    /// Where accepted lines are written.
    pub target: OutputTarget,
}

impl DebugConfig {
    /// Resolves a configuration from raw variable values.
    ///
    /// Nothing here is fatal: an unknown severity token leaves logging
    /// disabled, unknown subsystem tokens are ignored by the mask parser,
    /// and a file target that cannot be opened falls back to the console.
    /// The file target is only attempted when the severity is more verbose
    /// than VERSION, so pure banner runs never touch the filesystem.
    pub(crate) fn resolve(debug: &str, debug_subsys: &str, debug_file: &str) -> Self {
        let level = debug.parse::<Level>().unwrap_or(Level::None);
        let mask = subsys::parse_mask(debug_subsys);

        let hostname = platform::hostname();
        let pid = std::process::id();

        let target = if level > Level::Version {
            let path = sink::expand_path_template(debug_file, &hostname, pid);
            OutputTarget::open_file(&path).unwrap_or(OutputTarget::Stdout)
        } else {
            OutputTarget::Stdout
        };

        Self {
            level,
            mask,
            hostname,
            pid,
            epoch: Instant::now(),
            target,
        }
    }
}

static CONFIG: OnceLock<DebugConfig> = OnceLock::new();

/// Returns the process-wide configuration, resolving it on first use.
pub(crate) fn config() -> &'static DebugConfig {
    CONFIG.get_or_init(|| {
        let cvars = Cvars::get();
        DebugConfig::resolve(&cvars.debug, &cvars.debug_subsys, &cvars.debug_file)
    })
}

/// Forces configuration resolution now instead of on the first log call.
///
/// Idempotent and safe to race: every caller returns only after one
/// resolution has completed. Useful for bootstrap code that wants the
/// environment read (and the log file opened) at a deterministic point.
pub fn ensure_init() {
    let _ = config();
}

/// The severity ceiling the process resolved at initialization.
#[must_use]
pub fn debug_level() -> Level {
    config().level
}

/// The subsystem mask the process resolved at initialization.
#[must_use]
pub fn debug_mask() -> Subsys {
    config().mask
}
