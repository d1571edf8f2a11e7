//! Last-error behavior when output is fully disabled.
//!
//! With no severity configured, nothing is ever written, yet the last-error
//! register must keep tracking warnings. Configuration is per-process, so
//! this binary holds a single test.

use diag::{Level, Subsys, info_log, warn_log};
use test_support::{ENV_LOCK, EnvGuard};

#[test]
fn register_tracks_warnings_even_when_output_is_off() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let _debug = EnvGuard::remove("NCCL_DEBUG");
    let _subsys = EnvGuard::remove("NCCL_DEBUG_SUBSYS");
    let _file = EnvGuard::remove("NCCL_DEBUG_FILE");

    diag::ensure_init();
    assert_eq!(diag::debug_level(), Level::None);

    // Filtered from output, still recorded.
    warn_log!("transport setup failed for rank {}", 2);
    assert_eq!(diag::last_error(), "transport setup failed for rank 2");

    // Only warnings touch the register.
    info_log!(Subsys::INIT, "still initializing");
    assert_eq!(diag::last_error(), "transport setup failed for rank 2");

    // The most recent warning wins.
    warn_log!("ring construction failed");
    assert_eq!(diag::last_error(), "ring construction failed");

    // Suppressed warnings are demoted before the register is consulted.
    {
        let _guard = diag::suppress_warn(Subsys::NET);
        warn_log!("expected probe failure");
    }
    assert_eq!(diag::last_error(), "ring construction failed");
}
