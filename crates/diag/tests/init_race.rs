//! Concurrent first use: many threads race the one-time initialization.
//!
//! Configuration resolution happens once per process, so this binary holds
//! a single test. Every thread below calls into the logger without any
//! prior [`diag::ensure_init`], which makes the first log calls race the
//! resolution itself.

use std::fs;
use std::thread;

use diag::{Level, Subsys, info_log};
use test_support::{ENV_LOCK, EnvGuard};

const WORKERS: usize = 16;

#[test]
fn racing_first_callers_agree_on_one_configuration() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("race.log");

    let _debug = EnvGuard::set("NCCL_DEBUG", "TRACE");
    let _subsys = EnvGuard::set("NCCL_DEBUG_SUBSYS", "ALL");
    let _file = EnvGuard::set("NCCL_DEBUG_FILE", path.to_str().expect("utf-8"));

    let handles: Vec<_> = (0..WORKERS)
        .map(|index| {
            thread::spawn(move || {
                diag::set_thread_label(&format!("worker{index:02}"));
                info_log!(Subsys::INIT, "worker {index} starting");
                (diag::debug_level(), diag::debug_mask())
            })
        })
        .collect();

    let mut observed = Vec::with_capacity(WORKERS);
    for handle in handles {
        observed.push(handle.join().expect("worker thread"));
    }

    // Every racer saw the same resolved pair.
    for (level, mask) in observed {
        assert_eq!(level, Level::Trace);
        assert_eq!(mask, Subsys::ALL);
    }

    // Exactly one file target was opened and every line landed in it whole:
    // each worker's line appears once, fully formed, never spliced into a
    // neighbour's output.
    let contents = fs::read_to_string(&path).expect("read log file");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), WORKERS);
    for index in 0..WORKERS {
        let needle = format!("NCCL INFO worker {index} starting");
        let count = lines.iter().filter(|line| line.contains(&needle)).count();
        assert_eq!(count, 1, "worker {index} line missing or duplicated");
        let labelled = format!("[worker{index:02}]");
        assert!(
            lines
                .iter()
                .any(|line| line.contains(&needle) && line.contains(&labelled)),
            "worker {index} line lost its thread label"
        );
    }
}
