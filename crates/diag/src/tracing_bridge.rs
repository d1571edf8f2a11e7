//! crates/diag/src/tracing_bridge.rs
//! Optional forwarding of accepted records to the tracing ecosystem.
//!
//! Behind the `tracing` feature, every record that passes the emit gate is
//! also published as a `tracing` event under the `nccl` target, so hosts
//! that already run a subscriber can collect library diagnostics without
//! parsing text lines. The text sink remains authoritative: the bridge
//! never filters, and severities without a text layout are not forwarded.

use crate::level::Level;
use crate::subsys::Subsys;

/// Forwards one accepted record as a tracing event.
pub(crate) fn forward(level: Level, subsys: Subsys, message: &str) {
    match level {
        Level::Warn => tracing::warn!(target: "nccl", subsys = %subsys, "{message}"),
        Level::Info => tracing::info!(target: "nccl", subsys = %subsys, "{message}"),
        Level::Trace => tracing::trace!(target: "nccl", subsys = %subsys, "{message}"),
        Level::None | Level::Version | Level::Abort => {}
    }
}
