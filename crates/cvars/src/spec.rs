//! crates/cvars/src/spec.rs
//! Declarative control-variable schema.
//!
//! One table describes every typed control variable: its environment name,
//! value kind, and build-time default. The loader walks this table to
//! populate the registry and the namespace audit derives its known-name set
//! from it, so there is exactly one source of truth for which variables the
//! library owns.

/// Value kind of a control variable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CvarKind {
    /// Boolean with the permissive truth table of [`crate::parse::bool_value`].
    Bool,
    /// Decimal integer with leading-digits conversion.
    Int,
    /// Whitespace-trimmed string.
    String,
    /// Exact-match selection from a fixed set of tags.
    Enum,
    /// Comma-separated string list.
    StringList,
    /// String list optionally tagged with a leading prefix marker.
    PrefixedStringList,
}

/// Schema entry for one control variable.
#[derive(Clone, Copy, Debug)]
pub struct CvarSpec {
    /// Environment variable name, including the reserved `NCCL_` prefix.
    pub name: &'static str,
    /// Value kind consumed by the loader.
    pub kind: CvarKind,
    /// Build-time default, substituted when the variable is unset.
    pub default: &'static str,
}

impl CvarSpec {
    const fn new(name: &'static str, kind: CvarKind, default: &'static str) -> Self {
        Self {
            name,
            kind,
            default,
        }
    }
}

/// Prefix markers recognised by `NCCL_IB_HCA`: `^` excludes the listed
/// devices, `=` requires exact device-name matches.
pub const IB_HCA_PREFIXES: &[&str] = &["^", "="];

/// Tags accepted by the allreduce algorithm selectors.
pub const ALLREDUCE_ALGO_TAGS: &[&str] = &["orig", "dda"];

/// The full control-variable schema, in load order.
pub const CVARS: &[CvarSpec] = &[
    CvarSpec::new(
        "NCCL_DDA_ALLREDUCE_LARGE_MESSAGE_HCM",
        CvarKind::Bool,
        "False",
    ),
    CvarSpec::new("NCCL_DDA_ALLREDUCE_TMPBUFF_SIZE", CvarKind::Int, "33554432"),
    CvarSpec::new("NCCL_DDA_MAX_RANKS", CvarKind::Int, "16"),
    CvarSpec::new("NCCL_ALLREDUCE_ALGO", CvarKind::Enum, "orig"),
    CvarSpec::new("NCCL_ALLREDUCE_ALGO2", CvarKind::Enum, "orig"),
    CvarSpec::new("NCCL_ALLGATHER_DIRECT_CUTOFF", CvarKind::Int, "524288"),
    CvarSpec::new("NCCL_DDA_ALLREDUCE_MAX_BLOCKS", CvarKind::Int, "1"),
    CvarSpec::new(
        "NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_NVS",
        CvarKind::Int,
        "262144",
    ),
    CvarSpec::new(
        "NCCL_DDA_ALLREDUCE_TREE_THRESHOLD_HCM",
        CvarKind::Int,
        "65536",
    ),
    CvarSpec::new(
        "NCCL_ALLREDUCE_SPARSE_BLOCK_NUM_THREAD_BLOCKS",
        CvarKind::Int,
        "-1",
    ),
    CvarSpec::new(
        "NCCL_ALLREDUCE_SPARSE_BLOCK_THREAD_BLOCK_SIZE",
        CvarKind::Int,
        "-1",
    ),
    CvarSpec::new("NCCL_DDA_FORCE_P2P_ACCESS", CvarKind::Bool, "False"),
    CvarSpec::new("NCCL_IB_HCA", CvarKind::PrefixedStringList, ""),
    CvarSpec::new("NCCL_CTRAN_IB_MAX_QPS", CvarKind::Int, "1"),
    CvarSpec::new(
        "NCCL_CTRAN_IB_QP_SCALING_THRESHOLD",
        CvarKind::Int,
        "1048576",
    ),
    CvarSpec::new("NCCL_SET_THREAD_NAME", CvarKind::Int, "0"),
    CvarSpec::new("NCCL_DEBUG", CvarKind::String, ""),
    CvarSpec::new("NCCL_DEBUG_SUBSYS", CvarKind::String, ""),
    CvarSpec::new("NCCL_DEBUG_FILE", CvarKind::String, ""),
];

/// Looks up the schema entry for `name`.
#[must_use]
pub fn find(name: &str) -> Option<&'static CvarSpec> {
    CVARS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_are_unique() {
        for (i, spec) in CVARS.iter().enumerate() {
            assert!(
                CVARS.iter().skip(i + 1).all(|other| other.name != spec.name),
                "duplicate schema entry for {}",
                spec.name
            );
        }
    }

    #[test]
    fn schema_names_carry_reserved_prefix() {
        assert!(CVARS.iter().all(|spec| spec.name.starts_with("NCCL_")));
    }

    #[test]
    fn find_returns_matching_entry() {
        let spec = find("NCCL_DDA_MAX_RANKS").expect("schema entry exists");
        assert_eq!(spec.kind, CvarKind::Int);
        assert_eq!(spec.default, "16");
        assert!(find("NCCL_NOT_A_CVAR").is_none());
    }
}
