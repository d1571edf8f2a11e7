//! crates/diag/src/platform.rs
//! Thin platform layer: hostname, kernel thread ids, native thread names.
//!
//! All unsafe interactions with libc live here so the rest of the crate can
//! stay under `deny(unsafe_code)`. Every helper is best-effort: failures
//! degrade to a sentinel value and never propagate.

/// Sentinel thread id used when the platform query is unavailable.
pub(crate) const UNKNOWN_TID: i32 = -1;

/// Returns the machine's hostname, truncated at the first `.`.
#[cfg(unix)]
#[allow(unsafe_code)]
pub(crate) fn hostname() -> String {
    let mut buf = [0_u8; 256];
    // SAFETY: the buffer outlives the call and its length is passed along.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return "unknown".to_owned();
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]);
    let short = name.split('.').next().unwrap_or("");
    if short.is_empty() {
        "unknown".to_owned()
    } else {
        short.to_owned()
    }
}

/// Returns the machine's hostname, truncated at the first `.`.
#[cfg(not(unix))]
pub(crate) fn hostname() -> String {
    std::env::var("COMPUTERNAME").map_or_else(
        |_| "unknown".to_owned(),
        |name| {
            name.split('.')
                .next()
                .filter(|short| !short.is_empty())
                .unwrap_or("unknown")
                .to_owned()
        },
    )
}

/// Returns the kernel thread id of the calling thread.
#[cfg(target_os = "linux")]
#[allow(unsafe_code)]
pub(crate) fn thread_id() -> i32 {
    // SAFETY: gettid takes no arguments and cannot fail.
    (unsafe { libc::syscall(libc::SYS_gettid) }) as i32
}

/// Returns a process-unique id for the calling thread.
///
/// Platforms without a cheap kernel thread id query get a monotonically
/// assigned stand-in; log lines only need the id to distinguish writers.
#[cfg(not(target_os = "linux"))]
pub(crate) fn thread_id() -> i32 {
    use std::sync::atomic::{AtomicI32, Ordering};
    static NEXT: AtomicI32 = AtomicI32::new(1);
    thread_local! {
        static TID: i32 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    TID.with(|tid| *tid)
}

/// Asks the OS to display `name` for the thread behind `handle`.
///
/// pthread_setname_np is a GNU extension; the kernel caps names at 15 bytes
/// plus the terminator, so longer labels are truncated here.
#[cfg(target_os = "linux")]
#[allow(unsafe_code)]
pub(crate) fn set_native_thread_name(handle: libc::pthread_t, name: &str) {
    use std::ffi::CString;

    let capped: String = name.chars().take(15).collect();
    let Ok(cname) = CString::new(capped) else {
        return;
    };
    // SAFETY: handle came from a live JoinHandle and cname is NUL-terminated.
    unsafe {
        libc::pthread_setname_np(handle, cname.as_ptr());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_is_nonempty_and_undotted() {
        let host = hostname();
        assert!(!host.is_empty());
        assert!(!host.contains('.'));
    }

    #[test]
    fn thread_ids_differ_across_threads() {
        let here = thread_id();
        let there = std::thread::spawn(thread_id).join().expect("join");
        assert_ne!(here, there);
    }

    #[test]
    fn thread_id_is_stable_within_a_thread() {
        assert_eq!(thread_id(), thread_id());
    }
}
