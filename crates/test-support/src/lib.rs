#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/test-support/src/lib.rs
//!
//! Shared helpers for manipulating environment variables within tests. The
//! helpers centralise the unsafe interactions with `std::env` so individual
//! tests can remain focused on their specific assertions while ensuring the
//! environment is restored even when panics occur.

use std::env;
use std::ffi::OsString;
use std::sync::Mutex;

/// Global mutex guarding environment mutations performed by tests.
///
/// Tests across the workspace adjust `NCCL_`-prefixed variables. Acquiring
/// the mutex before applying overrides keeps the environment consistent when
/// tests run in parallel.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Scoped helper that applies an environment change and restores the
/// previous value when dropped.
#[derive(Debug)]
pub struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvGuard {
    /// Sets `key` to `value` for the duration of the guard.
    #[allow(unsafe_code)]
    #[must_use]
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = env::var_os(key);
        // SAFETY: callers hold ENV_LOCK or run before spawning threads.
        unsafe {
            env::set_var(key, value);
        }
        Self { key, previous }
    }

    /// Removes `key` for the duration of the guard.
    #[allow(unsafe_code)]
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let previous = env::var_os(key);
        // SAFETY: callers hold ENV_LOCK or run before spawning threads.
        unsafe {
            env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: restores the exact pre-guard state under the same locking
        // discipline as the constructors.
        unsafe {
            match &self.previous {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_restore() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        {
            let _guard = EnvGuard::set("TEST_SUPPORT_PROBE", "on");
            assert_eq!(env::var("TEST_SUPPORT_PROBE").as_deref(), Ok("on"));
        }
        assert!(env::var_os("TEST_SUPPORT_PROBE").is_none());
    }

    #[test]
    fn remove_and_restore() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _outer = EnvGuard::set("TEST_SUPPORT_PROBE2", "kept");
        {
            let _guard = EnvGuard::remove("TEST_SUPPORT_PROBE2");
            assert!(env::var_os("TEST_SUPPORT_PROBE2").is_none());
        }
        assert_eq!(env::var("TEST_SUPPORT_PROBE2").as_deref(), Ok("kept"));
    }
}
