//! crates/diag/src/thread.rs
//! Per-thread identity, labeling, and warning suppression.

use std::cell::{Cell, RefCell};

use crate::format::truncate_on_char_boundary;
use crate::platform;
use crate::subsys::Subsys;

/// Upper bound on a thread label, in bytes.
pub(crate) const THREAD_LABEL_CAPACITY: usize = 16;

/// Label given to threads that log without ever naming themselves.
///
/// Internal worker threads label themselves during spawn, so an unlabeled
/// logging thread is assumed to be an application thread.
const DEFAULT_LABEL: &str = "main";

/// Cached identity of one thread: kernel thread id plus display label.
#[derive(Debug)]
pub(crate) struct ThreadIdentity {
    pub tid: i32,
    pub label: String,
}

thread_local! {
    static IDENTITY: RefCell<Option<ThreadIdentity>> = const { RefCell::new(None) };
    static NO_WARN: Cell<u64> = const { Cell::new(0) };
}

/// Runs `f` with the calling thread's identity, creating it on first use.
///
/// The creation path queries the kernel thread id once and applies the
/// default label; afterwards the identity is immutable for the thread's
/// lifetime and the hot path never queries the OS again.
pub(crate) fn with_identity<R>(f: impl FnOnce(&ThreadIdentity) -> R) -> R {
    IDENTITY.with(|slot| {
        let mut borrow = slot.borrow_mut();
        let identity = borrow.get_or_insert_with(|| ThreadIdentity {
            tid: platform::thread_id(),
            label: DEFAULT_LABEL.to_owned(),
        });
        f(identity)
    })
}

/// Names the calling thread for log lines.
///
/// Captures the kernel thread id at the same time so later log calls never
/// have to query it. The label is capped at [`THREAD_LABEL_CAPACITY`] bytes.
/// A thread is named once: calls after the identity exists (whether from an
/// earlier explicit label or from logging with the default) are ignored.
pub fn set_thread_label(label: &str) {
    IDENTITY.with(|slot| {
        let mut borrow = slot.borrow_mut();
        if borrow.is_some() {
            return;
        }
        let mut label = label.to_owned();
        truncate_on_char_boundary(&mut label, THREAD_LABEL_CAPACITY);
        *borrow = Some(ThreadIdentity {
            tid: platform::thread_id(),
            label,
        });
    });
}

/// The subsystem substituted for suppressed warnings on this thread, or an
/// empty set when suppression is off.
pub(crate) fn warn_suppression() -> Subsys {
    Subsys(NO_WARN.with(Cell::get))
}

/// RAII guard that demotes WARN calls on the current thread to INFO.
///
/// While the guard lives, WARN calls from this thread are logged at INFO
/// severity under the guard's subsystem instead, letting a caller locally
/// silence expected warnings (retry loops, probing) without touching global
/// configuration. Dropping the guard restores the previous suppression
/// state, so guards nest.
#[derive(Debug)]
pub struct WarnSuppressGuard {
    previous: u64,
}

/// Starts suppressing warnings on the calling thread.
#[must_use]
pub fn suppress_warn(subsys: Subsys) -> WarnSuppressGuard {
    let previous = NO_WARN.with(|slot| slot.replace(subsys.0));
    WarnSuppressGuard { previous }
}

impl Drop for WarnSuppressGuard {
    fn drop(&mut self) {
        NO_WARN.with(|slot| slot.set(self.previous));
    }
}

/// Best-effort request to the OS to display `label` for `handle`'s thread.
///
/// Only active when `NCCL_SET_THREAD_NAME` is `1`; otherwise, and on
/// platforms without thread naming, this is a no-op. The log-line label is
/// unaffected; threads set that themselves via [`set_thread_label`].
#[cfg(target_os = "linux")]
pub fn set_os_thread_name<T>(handle: &std::thread::JoinHandle<T>, label: &str) {
    use std::os::unix::thread::JoinHandleExt as _;

    if cvars::Cvars::get().set_thread_name != 1 {
        return;
    }
    platform::set_native_thread_name(handle.as_pthread_t(), label);
}

/// Best-effort request to the OS to display `label` for `handle`'s thread.
///
/// This platform lacks thread-name support; the call is a no-op.
#[cfg(not(target_os = "linux"))]
pub fn set_os_thread_name<T>(_handle: &std::thread::JoinHandle<T>, _label: &str) {}
