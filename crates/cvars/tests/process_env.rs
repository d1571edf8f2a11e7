//! Loading from the real process environment.
//!
//! The unit tests feed synthetic snapshots; these go through
//! [`EnvSnapshot::from_process`] with guarded environment mutations, the
//! same path [`Cvars::get`] takes on first touch. The global accessor itself
//! is left alone so each test observes exactly the variables it set.

use cvars::{AllreduceAlgo, Cvars, EnvSnapshot, audit};
use test_support::{ENV_LOCK, EnvGuard};

#[test]
fn process_overrides_reach_the_registry() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let _ranks = EnvGuard::set("NCCL_DDA_MAX_RANKS", "64");
    let _algo = EnvGuard::set("NCCL_ALLREDUCE_ALGO2", "dda");
    let _hca = EnvGuard::set("NCCL_IB_HCA", "=mlx5_2:1");

    let cvars = Cvars::from_snapshot(&EnvSnapshot::from_process());
    assert_eq!(cvars.dda_max_ranks, 64);
    assert_eq!(cvars.allreduce_algo, AllreduceAlgo::Orig);
    assert_eq!(cvars.allreduce_algo2, AllreduceAlgo::Dda);
    assert_eq!(cvars.ib_hca_prefix, "=");
    assert_eq!(cvars.ib_hca, vec!["mlx5_2:1".to_owned()]);
}

#[test]
fn set_but_empty_differs_from_unset() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let _empty = EnvGuard::set("NCCL_DDA_ALLREDUCE_MAX_BLOCKS", "");
    let _unset = EnvGuard::remove("NCCL_CTRAN_IB_MAX_QPS");

    let cvars = Cvars::from_snapshot(&EnvSnapshot::from_process());
    // Explicitly empty parses as zero instead of the schema default of 1.
    assert_eq!(cvars.dda_allreduce_max_blocks, 0);
    // Unset falls back to the schema default.
    assert_eq!(cvars.ctran_ib_max_qps, 1);
}

#[test]
fn audit_flags_reserved_strays_in_the_process_environment() {
    let _lock = ENV_LOCK.lock().expect("env lock");
    let _known = EnvGuard::set("NCCL_DEBUG", "WARN");
    let _passthrough = EnvGuard::set("NCCL_SOCKET_IFNAME", "eth0");
    let _stray = EnvGuard::set("NCCL_DEBUGG", "INFO");

    let unknown = audit::unknown_names(&EnvSnapshot::from_process());
    assert!(unknown.contains(&"NCCL_DEBUGG".to_owned()));
    assert!(!unknown.contains(&"NCCL_DEBUG".to_owned()));
    assert!(!unknown.contains(&"NCCL_SOCKET_IFNAME".to_owned()));
}
