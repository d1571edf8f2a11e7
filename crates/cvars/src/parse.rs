//! crates/cvars/src/parse.rs
//! Type coercions from raw environment strings to typed values.
//!
//! Every function here is pure: it receives the raw string *after* default
//! substitution (an unset variable is replaced by its schema default before any
//! parsing happens) and never fails. Malformed input degrades to a documented
//! permissive result instead of an error, so configuration loading can never
//! abort the process.

use crate::env::EnvSnapshot;

/// Returns the raw string for `name`: the environment value when the variable
/// is set, otherwise `default`.
///
/// Default substitution happens at this layer only. A variable that is set to
/// an empty or unparseable string still goes through the coercion with that
/// string, it does not fall back to the default.
#[must_use]
pub fn resolve<'a>(snapshot: &'a EnvSnapshot, name: &str, default: &'a str) -> &'a str {
    snapshot.get(name).unwrap_or(default)
}

/// Coerces a raw string to a boolean.
///
/// Case-insensitively accepts `y`, `yes`, `t`, `true`, `1` as true and `n`,
/// `no`, `f`, `false`, `0` as false. Any other string, including an empty
/// one, coerces to **true**. That permissive fallback is long-standing
/// observed behavior and callers rely on `NCCL_FOO=whatever` enabling the
/// knob; changing it is a product decision, not a bug fix.
#[must_use]
pub fn bool_value(raw: &str) -> bool {
    let lowered = raw.to_ascii_lowercase();
    match lowered.as_str() {
        "n" | "no" | "f" | "false" | "0" => false,
        "y" | "yes" | "t" | "true" | "1" => true,
        other => {
            warn_unknown_value(other);
            true
        }
    }
}

/// Coerces a raw string to an integer using leading-digits conversion.
///
/// Skips leading whitespace, honors an optional sign, and consumes decimal
/// digits until the first non-digit. No digits yields `0`. Values beyond the
/// `i64` range saturate.
#[must_use]
pub fn int_value(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let mut value: i64 = 0;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(10) else { break };
        value = match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit)))
        {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }

    if negative { -value } else { value }
}

/// Coerces a raw string to a string value by trimming surrounding whitespace.
#[must_use]
pub fn string_value(raw: &str) -> String {
    raw.trim().to_owned()
}

/// Splits a raw string into a comma-separated token list.
///
/// Tokens are trimmed of surrounding whitespace and empty tokens are
/// dropped. First-seen order is preserved and duplicates are kept; repeated
/// tokens feed a diagnostic hook that is currently silent.
#[must_use]
pub fn list_value(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for piece in raw.split(',') {
        let token = piece.trim();
        if token.is_empty() {
            continue;
        }
        if tokens.iter().any(|seen| seen == token) {
            warn_duplicate_token(token);
        }
        tokens.push(token.to_owned());
    }
    tokens
}

/// Splits a raw string into an optional prefix marker and a token list.
///
/// The markers in `prefixes` are tried in order against the start of the raw
/// string. On the first match the marker is returned together with the
/// tokenized remainder; when none matches the whole string is tokenized and
/// the marker is empty.
#[must_use]
pub fn prefixed_list_value(raw: &str, prefixes: &[&str]) -> (String, Vec<String>) {
    for prefix in prefixes {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return ((*prefix).to_owned(), list_value(rest));
        }
    }
    (String::new(), list_value(raw))
}

/// Diagnostic hook for unrecognised boolean values. Currently silent.
fn warn_unknown_value(_value: &str) {}

/// Diagnostic hook for duplicate list tokens. Currently silent.
fn warn_duplicate_token(_token: &str) {}
