#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/diag/src/lib.rs
//!
//! # Overview
//!
//! `diag` is the process-wide diagnostic logging facility: severity- and
//! subsystem-filtered text lines, controlled entirely through environment
//! variables so a deployment can turn tracing on without recompiling. Call
//! sites use the [`warn_log!`], [`info_log!`] and [`trace_log!`] macros;
//! everything else — filter resolution, output-target selection, thread
//! identity — happens lazily behind them.
//!
//! # Design
//!
//! The first log call (or an explicit [`ensure_init`]) resolves the
//! configuration exactly once: `NCCL_DEBUG` picks the severity ceiling,
//! `NCCL_DEBUG_SUBSYS` the subsystem mask, and `NCCL_DEBUG_FILE` an optional
//! file target with `%h`/`%p` path templating. The resolved triple is
//! immutable afterwards, so the hot path is an atomic load, two integer
//! comparisons, and — for accepted records — one formatted write. Warnings
//! additionally update a process-wide last-error register that stays current
//! even when the warning itself is filtered from the output.
//!
//! # Invariants
//!
//! - Initialization is idempotent and safe to race; concurrent first
//!   callers block until the single resolution completes, and the resolved
//!   values are published with release/acquire ordering.
//! - Each line is fully assembled before a single write call, so concurrent
//!   writers interleave at line granularity, never mid-line.
//! - Nothing in this crate aborts the process or propagates an error: bad
//!   configuration degrades to documented defaults, an unopenable log file
//!   falls back to the console, and overlong arguments are truncated.
//!
//! # Examples
//!
//! ```
//! use diag::{Subsys, info_log, warn_log};
//!
//! diag::ensure_init();
//! info_log!(Subsys::INIT, "using {} rings", 4);
//! warn_log!("rank {} unreachable", 7);
//! assert_eq!(diag::last_error(), "rank 7 unreachable");
//! ```
//!
//! # See also
//!
//! - [`cvars`] for the typed configuration registry this crate reads its
//!   variables from.

mod config;
mod format;
mod last_error;
mod level;
mod logger;
mod macros;
mod platform;
mod sink;
mod subsys;
mod thread;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{debug_level, debug_mask, ensure_init};
pub use last_error::last_error;
pub use level::{Level, ParseLevelError};
pub use logger::{NO_DEVICE, log, register_device_query};
pub use subsys::{ParseSubsysError, Subsys, parse_mask};
pub use thread::{WarnSuppressGuard, set_os_thread_name, set_thread_label, suppress_warn};
