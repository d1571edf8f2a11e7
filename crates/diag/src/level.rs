//! crates/diag/src/level.rs
//! Ordered severity levels gating log emission.

use std::fmt;
use std::str::FromStr;

/// Severity level of a diagnostic call.
///
/// Levels form a total order from `None` (nothing is emitted) to `Trace`
/// (the most verbose). A call is emitted only when the configured level is
/// at least the call's level.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Logging disabled.
    #[default]
    None,
    /// Version banner only.
    Version,
    /// Warnings.
    Warn,
    /// Informational messages.
    Info,
    /// Messages emitted on abort paths.
    Abort,
    /// Full call tracing.
    Trace,
}

impl Level {
    /// Token rendered into log lines (`NCCL WARN`, `NCCL INFO`, ...).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Version => "VERSION",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Abort => "ABORT",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Error returned when a severity token is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown debug level `{0}`")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a severity token case-insensitively.
    ///
    /// The empty string maps to [`Level::None`]; any other unrecognised
    /// token is an error, which initialization treats as "leave logging
    /// disabled" rather than a failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::None);
        }
        match s.to_ascii_uppercase().as_str() {
            "VERSION" => Ok(Self::Version),
            "WARN" => Ok(Self::Warn),
            "INFO" => Ok(Self::Info),
            "ABORT" => Ok(Self::Abort),
            "TRACE" => Ok(Self::Trace),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_verbosity() {
        assert!(Level::None < Level::Version);
        assert!(Level::Version < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Abort);
        assert!(Level::Abort < Level::Trace);
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        for (token, level) in [
            ("VERSION", Level::Version),
            ("warn", Level::Warn),
            ("Info", Level::Info),
            ("aBoRt", Level::Abort),
            ("trace", Level::Trace),
        ] {
            assert_eq!(token.parse::<Level>(), Ok(level), "token {token}");
        }
    }

    #[test]
    fn empty_token_is_none() {
        assert_eq!("".parse::<Level>(), Ok(Level::None));
    }

    #[test]
    fn unknown_token_is_an_error() {
        let err = "LOUD".parse::<Level>().unwrap_err();
        assert_eq!(err, ParseLevelError("LOUD".to_owned()));
    }

    #[test]
    fn display_uses_uppercase_tokens() {
        assert_eq!(Level::Warn.to_string(), "WARN");
        assert_eq!(Level::Trace.to_string(), "TRACE");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&Level::Info).expect("serialize");
        assert_eq!(json, "\"Info\"");
        let back: Level = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Level::Info);
    }
}
