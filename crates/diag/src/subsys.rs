//! crates/diag/src/subsys.rs
//! Subsystem bit-flags and the `NCCL_DEBUG_SUBSYS` filter syntax.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};
use std::str::FromStr;

/// A set of subsystem flags carried by every diagnostic call.
///
/// Calls pass the subsystem(s) they belong to; the configured mask filters
/// them independently of severity. Flags combine with `|`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subsys(pub u64);

impl Subsys {
    /// Initialization and bootstrap.
    pub const INIT: Self = Self(1 << 0);
    /// Collective operations.
    pub const COLL: Self = Self(1 << 1);
    /// Point-to-point operations.
    pub const P2P: Self = Self(1 << 2);
    /// Shared-memory transport.
    pub const SHM: Self = Self(1 << 3);
    /// Network transport.
    pub const NET: Self = Self(1 << 4);
    /// Topology graph search.
    pub const GRAPH: Self = Self(1 << 5);
    /// Tuning decisions.
    pub const TUNING: Self = Self(1 << 6);
    /// Environment handling.
    pub const ENV: Self = Self(1 << 7);
    /// Buffer allocation.
    pub const ALLOC: Self = Self(1 << 8);
    /// Public API call tracing.
    pub const CALL: Self = Self(1 << 9);
    /// Proxy progress threads.
    pub const PROXY: Self = Self(1 << 10);
    /// NVLink SHARP.
    pub const NVLS: Self = Self(1 << 11);
    /// Every subsystem.
    pub const ALL: Self = Self(!0);

    /// Build-time default mask.
    pub const DEFAULT: Self = Self(Self::INIT.0 | Self::ENV.0);

    /// Reports whether any flag in `self` is also present in `mask`.
    #[must_use]
    pub const fn intersects(self, mask: Self) -> bool {
        self.0 & mask.0 != 0
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Subsys {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Subsys {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Subsys {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Subsys {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for Subsys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Error returned when a subsystem token is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown debug subsystem `{0}`")]
pub struct ParseSubsysError(pub String);

impl FromStr for Subsys {
    type Err = ParseSubsysError;

    /// Parses one subsystem token case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INIT" => Ok(Self::INIT),
            "COLL" => Ok(Self::COLL),
            "P2P" => Ok(Self::P2P),
            "SHM" => Ok(Self::SHM),
            "NET" => Ok(Self::NET),
            "GRAPH" => Ok(Self::GRAPH),
            "TUNING" => Ok(Self::TUNING),
            "ENV" => Ok(Self::ENV),
            "ALLOC" => Ok(Self::ALLOC),
            "CALL" => Ok(Self::CALL),
            "PROXY" => Ok(Self::PROXY),
            "NVLS" => Ok(Self::NVLS),
            "ALL" => Ok(Self::ALL),
            _ => Err(ParseSubsysError(s.to_owned())),
        }
    }
}

/// Parses the `NCCL_DEBUG_SUBSYS` filter into a mask.
///
/// The filter is a comma-separated token list. A leading `^` inverts the
/// construction: the mask starts from all bits set and listed subsystems are
/// subtracted, instead of starting from zero and adding them. Tokens are
/// trimmed of surrounding whitespace and unrecognised tokens are silently
/// ignored. An empty filter keeps [`Subsys::DEFAULT`].
#[must_use]
pub fn parse_mask(filter: &str) -> Subsys {
    if filter.is_empty() {
        return Subsys::DEFAULT;
    }

    let (invert, list) = match filter.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, filter),
    };

    let mut mask = if invert { Subsys::ALL } else { Subsys(0) };
    for token in list.split(',') {
        let Ok(flag) = token.trim().parse::<Subsys>() else {
            continue;
        };
        if invert {
            mask = mask & !flag;
        } else {
            mask |= flag;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("init".parse::<Subsys>(), Ok(Subsys::INIT));
        assert_eq!("NeT".parse::<Subsys>(), Ok(Subsys::NET));
        assert_eq!("ALL".parse::<Subsys>(), Ok(Subsys::ALL));
        assert!("BOGUS".parse::<Subsys>().is_err());
    }

    #[test]
    fn mask_composition_adds_listed_flags() {
        assert_eq!(parse_mask("INIT,NET"), Subsys::INIT | Subsys::NET);
        assert_eq!(parse_mask(" coll , p2p "), Subsys::COLL | Subsys::P2P);
    }

    #[test]
    fn caret_inverts_the_starting_mask() {
        let mask = parse_mask("^COLL");
        assert!(!Subsys::COLL.intersects(mask));
        assert!(Subsys::INIT.intersects(mask));
        assert!(Subsys::NVLS.intersects(mask));
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        assert_eq!(parse_mask("INIT,JUNK,NET"), Subsys::INIT | Subsys::NET);
        assert_eq!(parse_mask("JUNK"), Subsys(0));
    }

    #[test]
    fn empty_filter_keeps_the_default() {
        assert_eq!(parse_mask(""), Subsys::DEFAULT);
        assert_eq!(Subsys::DEFAULT, Subsys::INIT | Subsys::ENV);
    }

    #[test]
    fn all_covers_every_named_flag() {
        for flag in [
            Subsys::INIT,
            Subsys::COLL,
            Subsys::P2P,
            Subsys::SHM,
            Subsys::NET,
            Subsys::GRAPH,
            Subsys::TUNING,
            Subsys::ENV,
            Subsys::ALLOC,
            Subsys::CALL,
            Subsys::PROXY,
            Subsys::NVLS,
        ] {
            assert!(flag.intersects(Subsys::ALL));
        }
    }

    #[test]
    fn inverted_empty_list_is_all() {
        assert_eq!(parse_mask("^"), Subsys::ALL);
    }
}
