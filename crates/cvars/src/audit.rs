//! crates/cvars/src/audit.rs
//! Reserved-namespace scan over the process environment.
//!
//! At load time every environment variable in the reserved `NCCL_` namespace
//! is checked against the known-name set: the typed schema in
//! [`crate::spec::CVARS`] plus the pass-through allowlist below. Unknown
//! names are only reported to a diagnostic hook that is currently silent; no
//! value is rejected or altered.

use crate::env::EnvSnapshot;
use crate::spec;

/// Reserved environment-variable prefix owned by the library.
pub const RESERVED_PREFIX: &str = "NCCL_";

/// Variables in the reserved namespace that are consumed elsewhere in the
/// stack (transports, topology, tuner plugins) rather than decoded into the
/// typed registry. They are valid namespace members for audit purposes.
pub const PASSTHROUGH_NAMES: &[&str] = &[
    "NCCL_ALGO",
    "NCCL_COLLNET_ENABLE",
    "NCCL_COLLTRACE_LOCAL_SUBDIR",
    "NCCL_COMM_ID",
    "NCCL_CUDA_PATH",
    "NCCL_CROSS_NIC",
    "NCCL_GRAPH_DUMP_FILE",
    "NCCL_GRAPH_FILE",
    "NCCL_HOSTID",
    "NCCL_IB_DISABLE",
    "NCCL_IB_GID_INDEX",
    "NCCL_IB_TC",
    "NCCL_IB_TIMEOUT",
    "NCCL_IB_QPS_PER_CONNECTION",
    "NCCL_LAUNCH_MODE",
    "NCCL_NET",
    "NCCL_NET_PLUGIN",
    "NCCL_NET_SHARED_COMMS",
    "NCCL_NSOCKS_PERTHREAD",
    "NCCL_PROTO",
    "NCCL_PROXY_PROFILE",
    "NCCL_PXN_DISABLE",
    "NCCL_P2P_LEVEL",
    "NCCL_SHM_DISABLE",
    "NCCL_SOCKET_FAMILY",
    "NCCL_SOCKET_IFNAME",
    "NCCL_SOCKET_NTHREADS",
    "NCCL_THREAD_THRESHOLDS",
    "NCCL_TOPO_DUMP_FILE",
    "NCCL_TOPO_FILE",
    "NCCL_TUNER_PLUGIN",
];

/// Reports whether `name` belongs to the known-name set.
#[must_use]
pub fn is_known(name: &str) -> bool {
    spec::find(name).is_some() || PASSTHROUGH_NAMES.contains(&name)
}

/// Scans the snapshot for reserved-prefix variables outside the known-name
/// set and returns them in sorted order.
///
/// Each finding feeds the (currently silent) unknown-variable hook. Nothing
/// is rejected; the return value exists so the check stays observable.
#[must_use]
pub fn unknown_names(snapshot: &EnvSnapshot) -> Vec<String> {
    let mut unknown = Vec::new();
    for name in snapshot.names() {
        if name.starts_with(RESERVED_PREFIX) && !is_known(name) {
            warn_unknown_variable(name);
            unknown.push(name.to_owned());
        }
    }
    unknown
}

/// Diagnostic hook for variables in the reserved namespace that no schema
/// entry or allowlist covers. Currently silent.
fn warn_unknown_variable(_name: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_and_passthrough_are_known() {
        assert!(is_known("NCCL_DDA_MAX_RANKS"));
        assert!(is_known("NCCL_DEBUG"));
        assert!(is_known("NCCL_SOCKET_IFNAME"));
        assert!(!is_known("NCCL_TYPO"));
    }

    #[test]
    fn audit_reports_only_reserved_unknowns() {
        let snap = EnvSnapshot::from_pairs([
            ("NCCL_DEBUG", "INFO"),
            ("NCCL_TYPO", "1"),
            ("NCCL_EXPERIMENTAL_KNOB", "on"),
            ("HOME", "/root"),
        ]);
        assert_eq!(
            unknown_names(&snap),
            vec![
                "NCCL_EXPERIMENTAL_KNOB".to_owned(),
                "NCCL_TYPO".to_owned()
            ]
        );
    }

    #[test]
    fn audit_is_empty_for_clean_namespace() {
        let snap = EnvSnapshot::from_pairs([("NCCL_DEBUG", "WARN"), ("PATH", "/bin")]);
        assert!(unknown_names(&snap).is_empty());
    }

    #[test]
    fn passthrough_names_stay_inside_namespace() {
        assert!(
            PASSTHROUGH_NAMES
                .iter()
                .all(|name| name.starts_with(RESERVED_PREFIX))
        );
    }
}
