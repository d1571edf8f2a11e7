#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/cvars/src/lib.rs
//!
//! # Overview
//!
//! `cvars` decodes the library's control variables from the process
//! environment into one strongly-typed, process-wide registry. A declarative
//! schema ([`CvarSpec`] entries in [`spec::CVARS`]) is the single source of
//! truth: the loader walks it to populate [`Cvars`] and the namespace audit
//! derives its known-name set from it.
//!
//! # Design
//!
//! Loading is a pure pipeline over an [`EnvSnapshot`]: default substitution
//! first (an unset variable is replaced by its schema default), then a
//! per-kind coercion from [`parse`]. Coercions never fail; malformed input
//! degrades to a documented permissive result, so configuration can never
//! abort the process. The decoded registry is published through
//! [`Cvars::get`], a `OnceLock` accessor that gives every reader a
//! happens-before relationship with the load.
//!
//! # Invariants
//!
//! - Every slot is fully resolved (environment value or default) before any
//!   reader can observe the registry.
//! - The registry is written once and read-only afterwards; startup must
//!   touch it before spawning threads that read configuration.
//! - The audit never rejects or mutates a variable; unknown reserved-prefix
//!   names only feed a silent diagnostic hook.
//!
//! # Examples
//!
//! Decode a synthetic environment without touching process state:
//!
//! ```
//! use cvars::{Cvars, EnvSnapshot};
//!
//! let snap = EnvSnapshot::from_pairs([("NCCL_DDA_MAX_RANKS", "32")]);
//! let cvars = Cvars::from_snapshot(&snap);
//! assert_eq!(cvars.dda_max_ranks, 32);
//! assert_eq!(cvars.ctran_ib_max_qps, 1); // schema default
//! ```

pub mod audit;
mod env;
pub mod parse;
pub mod spec;
mod registry;

pub use env::EnvSnapshot;
pub use registry::{AllreduceAlgo, Cvars};
pub use spec::{CvarKind, CvarSpec};
