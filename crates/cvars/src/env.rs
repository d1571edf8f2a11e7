//! crates/cvars/src/env.rs
//! Immutable snapshot of the process environment taken once per load.

use std::collections::BTreeMap;
use std::env;

/// An immutable view of the process environment.
///
/// The loader and the namespace audit both read through a snapshot instead of
/// calling into `std::env` per variable. This keeps every coercion pure with
/// respect to a single observation of the environment and lets tests supply
/// synthetic environments without mutating process state.
///
/// Entries whose name or value is not valid UTF-8 are skipped; the reserved
/// namespace only contains ASCII names and the coercions below are defined
/// over strings.
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    entries: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            entries: env::vars().collect(),
        }
    }

    /// Builds a snapshot from explicit `(name, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the value of `name`, or `None` when the variable is unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterates over every variable name in the snapshot.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
