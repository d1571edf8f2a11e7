//! crates/diag/src/last_error.rs
//! Single-slot register of the most recent warning message.

use std::fmt;
use std::sync::Mutex;

use crate::format::truncate_on_char_boundary;

/// Upper bound on the stored message, in bytes.
const LAST_ERROR_CAPACITY: usize = 1024;

/// The register holds the message text only, no layout prefix. A dedicated
/// lock keeps updates atomic; the configuration lock is never involved.
static LAST_ERROR: Mutex<String> = Mutex::new(String::new());

/// Stores `message` as the most recent warning.
///
/// Called for every WARN-severity log call before the emit gate, so the
/// register is current even when the warning itself is filtered out of the
/// output. Each call overwrites the previous message.
pub(crate) fn record_warning(message: fmt::Arguments<'_>) {
    let mut text = message.to_string();
    truncate_on_char_boundary(&mut text, LAST_ERROR_CAPACITY);
    // A poisoned lock means a panic mid-assignment; the slot still contains
    // a whole previous message, keep serving that.
    if let Ok(mut slot) = LAST_ERROR.lock() {
        *slot = text;
    }
}

/// Returns the text of the most recent warning, or an empty string when no
/// warning has been logged yet.
#[must_use]
pub fn last_error() -> String {
    LAST_ERROR.lock().map(|slot| slot.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test body: the register is a process-wide slot, and separate tests
    // mutating it would race under the parallel test runner.
    #[test]
    fn register_overwrites_and_stays_bounded() {
        record_warning(format_args!("first failure"));
        record_warning(format_args!("second failure"));
        assert_eq!(last_error(), "second failure");

        let long = "w".repeat(4 * LAST_ERROR_CAPACITY);
        record_warning(format_args!("{long}"));
        assert_eq!(last_error().len(), LAST_ERROR_CAPACITY);
    }
}
