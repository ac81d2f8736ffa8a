//! Rendering period timestamps as short labels.

use chrono::DateTime;
use std::fmt::Write;

/// Default label pattern, e.g. `"Jan 5"`.
pub const DEFAULT_LABEL_FORMAT: &str = "%b %-d";

/// Turns a Unix timestamp into a human-readable period label.
pub trait DateLabeler {
    /// Returns the label for `timestamp` (seconds since the epoch).
    fn label(&self, timestamp: i64) -> String;
}

impl<F> DateLabeler for F
where
    F: Fn(i64) -> String,
{
    fn label(&self, timestamp: i64) -> String {
        self(timestamp)
    }
}

/// Labels timestamps in UTC with a `chrono` strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronoLabeler {
    format: String,
}

impl ChronoLabeler {
    /// Creates a labeler with the given strftime pattern.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for ChronoLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_FORMAT)
    }
}

impl DateLabeler for ChronoLabeler {
    fn label(&self, timestamp: i64) -> String {
        let Some(dt) = DateTime::from_timestamp(timestamp, 0) else {
            return timestamp.to_string();
        };
        // chrono reports unknown specifiers as a formatting error
        let mut out = String::new();
        match write!(out, "{}", dt.format(&self.format)) {
            Ok(()) => out,
            Err(_) => timestamp.to_string(),
        }
    }
}
