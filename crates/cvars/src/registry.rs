//! crates/cvars/src/registry.rs
//! The typed registry of decoded control variables.
//!
//! Every slot is resolved exactly once, during [`Cvars::get`]'s first call or
//! an explicit [`Cvars::from_snapshot`], and is read-only afterwards. Library
//! startup must touch the registry before spawning threads that read
//! configuration; the `OnceLock` accessor makes a racing first touch safe,
//! but the contract is that loading happens in the single-threaded bootstrap
//! phase.

use std::sync::OnceLock;

use crate::audit;
use crate::env::EnvSnapshot;
use crate::parse;
use crate::spec::{self, CvarSpec, IB_HCA_PREFIXES};

/// Allreduce algorithm selection.
///
/// Decoded from `NCCL_ALLREDUCE_ALGO` / `NCCL_ALLREDUCE_ALGO2` by exact,
/// case-sensitive tag match. Unknown tags keep the build-time default.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllreduceAlgo {
    /// Baseline ring/tree implementation.
    #[default]
    Orig,
    /// Direct-access allreduce.
    Dda,
}

impl AllreduceAlgo {
    /// Decodes a tag from [`spec::ALLREDUCE_ALGO_TAGS`](crate::spec::ALLREDUCE_ALGO_TAGS).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "orig" => Some(Self::Orig),
            "dda" => Some(Self::Dda),
            _ => None,
        }
    }
}

/// Decoded control variables, one field per schema slot.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cvars {
    /// `NCCL_DDA_ALLREDUCE_LARGE_MESSAGE_HCM`
    pub dda_allreduce_large_message_hcm: bool,
    /// `NCCL_DDA_ALLREDUCE_TMPBUFF_SIZE`
    pub dda_allreduce_tmpbuff_size: i64,
    /// `NCCL_DDA_MAX_RANKS`
    pub dda_max_ranks: i64,
    /// `NCCL_ALLREDUCE_ALGO`
    pub allreduce_algo: AllreduceAlgo,
    /// `NCCL_ALLREDUCE_ALGO2`
    pub allreduce_algo2: AllreduceAlgo,
    /// `NCCL_ALLGATHER_DIRECT_CUTOFF`
    pub allgather_direct_cutoff: i64,
    /// `NCCL_DDA_ALLREDUCE_MAX_BLOCKS`
    pub dda_allreduce_max_blocks: i64,
    /// `NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_NVS`
    pub dda_allreduce_tree_threshold_nvs: i64,
    /// `NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_HCM`
    pub dda_allreduce_tree_threshold_hcm: i64,
    /// `NCCL_ALLREDUCE_SPARSE_BLOCK_NUM_THREAD_BLOCKS`
    pub allreduce_sparse_block_num_thread_blocks: i64,
    /// `NCCL_ALLREDUCE_SPARSE_BLOCK_THREAD_BLOCK_SIZE`
    pub allreduce_sparse_block_thread_block_size: i64,
    /// `NCCL_DDA_FORCE_P2P_ACCESS`
    pub dda_force_p2p_access: bool,
    /// Prefix marker of `NCCL_IB_HCA` (empty when none was given).
    pub ib_hca_prefix: String,
    /// Device list of `NCCL_IB_HCA`.
    pub ib_hca: Vec<String>,
    /// `NCCL_CTRAN_IB_MAX_QPS`
    pub ctran_ib_max_qps: i64,
    /// `NCCL_CTRAN_IB_QP_SCALING_THRESHOLD`
    pub ctran_ib_qp_scaling_threshold: i64,
    /// `NCCL_SET_THREAD_NAME`
    pub set_thread_name: i64,
    /// `NCCL_DEBUG` (raw severity token, decoded by the diagnostics layer)
    pub debug: String,
    /// `NCCL_DEBUG_SUBSYS` (raw subsystem filter, decoded by the diagnostics layer)
    pub debug_subsys: String,
    /// `NCCL_DEBUG_FILE` (raw path template, decoded by the diagnostics layer)
    pub debug_file: String,
}

static REGISTRY: OnceLock<Cvars> = OnceLock::new();

impl Cvars {
    /// Returns the process-wide registry, loading it from the environment on
    /// first use.
    ///
    /// The first call captures an environment snapshot, runs the namespace
    /// audit, and decodes every slot. The `OnceLock` publication gives later
    /// readers a happens-before relationship with the load.
    #[must_use]
    pub fn get() -> &'static Self {
        REGISTRY.get_or_init(|| {
            let snapshot = EnvSnapshot::from_process();
            let _ = audit::unknown_names(&snapshot);
            Self::from_snapshot(&snapshot)
        })
    }

    /// Decodes every schema slot from the given snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        let (ib_hca_prefix, ib_hca) = prefixed_list(snapshot, "NCCL_IB_HCA", IB_HCA_PREFIXES);
        Self {
            dda_allreduce_large_message_hcm: bool_slot(
                snapshot,
                "NCCL_DDA_ALLREDUCE_LARGE_MESSAGE_HCM",
            ),
            dda_allreduce_tmpbuff_size: int_slot(snapshot, "NCCL_DDA_ALLREDUCE_TMPBUFF_SIZE"),
            dda_max_ranks: int_slot(snapshot, "NCCL_DDA_MAX_RANKS"),
            allreduce_algo: algo_slot(snapshot, "NCCL_ALLREDUCE_ALGO"),
            allreduce_algo2: algo_slot(snapshot, "NCCL_ALLREDUCE_ALGO2"),
            allgather_direct_cutoff: int_slot(snapshot, "NCCL_ALLGATHER_DIRECT_CUTOFF"),
            dda_allreduce_max_blocks: int_slot(snapshot, "NCCL_DDA_ALLREDUCE_MAX_BLOCKS"),
            dda_allreduce_tree_threshold_nvs: int_slot(
                snapshot,
                "NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_NVS",
            ),
            dda_allreduce_tree_threshold_hcm: int_slot(
                snapshot,
                "NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_HCM",
            ),
            allreduce_sparse_block_num_thread_blocks: int_slot(
                snapshot,
                "NCCL_ALLREDUCE_SPARSE_BLOCK_NUM_THREAD_BLOCKS",
            ),
            allreduce_sparse_block_thread_block_size: int_slot(
                snapshot,
                "NCCL_ALLREDUCE_SPARSE_BLOCK_THREAD_BLOCK_SIZE",
            ),
            dda_force_p2p_access: bool_slot(snapshot, "NCCL_DDA_FORCE_P2P_ACCESS"),
            ib_hca_prefix,
            ib_hca,
            ctran_ib_max_qps: int_slot(snapshot, "NCCL_CTRAN_IB_MAX_QPS"),
            ctran_ib_qp_scaling_threshold: int_slot(
                snapshot,
                "NCCL_CTRAN_IB_QP_SCALING_THRESHOLD",
            ),
            set_thread_name: int_slot(snapshot, "NCCL_SET_THREAD_NAME"),
            debug: string_slot(snapshot, "NCCL_DEBUG"),
            debug_subsys: string_slot(snapshot, "NCCL_DEBUG_SUBSYS"),
            debug_file: string_slot(snapshot, "NCCL_DEBUG_FILE"),
        }
    }
}

/// Returns the raw value for a schema slot after default substitution.
fn raw<'a>(snapshot: &'a EnvSnapshot, name: &'static str) -> &'a str {
    let entry: Option<&CvarSpec> = spec::find(name);
    debug_assert!(entry.is_some(), "{name} is missing from the cvar schema");
    parse::resolve(snapshot, name, entry.map_or("", |s| s.default))
}

fn bool_slot(snapshot: &EnvSnapshot, name: &'static str) -> bool {
    parse::bool_value(raw(snapshot, name))
}

fn int_slot(snapshot: &EnvSnapshot, name: &'static str) -> i64 {
    parse::int_value(raw(snapshot, name))
}

fn string_slot(snapshot: &EnvSnapshot, name: &'static str) -> String {
    parse::string_value(raw(snapshot, name))
}

fn prefixed_list(
    snapshot: &EnvSnapshot,
    name: &'static str,
    prefixes: &[&str],
) -> (String, Vec<String>) {
    parse::prefixed_list_value(raw(snapshot, name), prefixes)
}

/// Decodes an algorithm selector, keeping the default on unknown tags.
fn algo_slot(snapshot: &EnvSnapshot, name: &'static str) -> AllreduceAlgo {
    let value = raw(snapshot, name);
    AllreduceAlgo::from_tag(value).unwrap_or_else(|| {
        warn_unknown_enum_value(name, value);
        AllreduceAlgo::default()
    })
}

/// Diagnostic hook for enum tags outside
/// [`spec::ALLREDUCE_ALGO_TAGS`](crate::spec::ALLREDUCE_ALGO_TAGS). Currently
/// silent.
fn warn_unknown_enum_value(_name: &str, _value: &str) {}
