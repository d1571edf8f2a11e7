//! crates/diag/src/macros.rs
//! Call-site macros capturing source location and deferring formatting.

/// Logs a warning.
///
/// Warnings carry every subsystem flag so a mask never filters them; only
/// the severity ceiling and per-thread suppression apply.
///
/// ```
/// diag::warn_log!("connection to rank {} lost", 3);
/// ```
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::log(
            $crate::Level::Warn,
            $crate::Subsys::ALL,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}

/// Logs an informational message under the given subsystem flag(s).
///
/// ```
/// use diag::Subsys;
///
/// diag::info_log!(Subsys::INIT, "bootstrap complete on {} ranks", 8);
/// ```
#[macro_export]
macro_rules! info_log {
    ($subsys:expr, $($arg:tt)*) => {
        $crate::log(
            $crate::Level::Info,
            $subsys,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}

/// Logs a trace record under the given subsystem flag(s).
///
/// With [`Subsys::CALL`](crate::Subsys::CALL) alone this selects the
/// lightweight call-tracing layout.
///
/// ```
/// use diag::Subsys;
///
/// diag::trace_log!(Subsys::CALL, "AllReduce(count={})", 1024);
/// ```
#[macro_export]
macro_rules! trace_log {
    ($subsys:expr, $($arg:tt)*) => {
        $crate::log(
            $crate::Level::Trace,
            $subsys,
            file!(),
            line!(),
            format_args!($($arg)*),
        )
    };
}
