//! Errors raised by the statistics engine.

use thiserror::Error;

/// Result alias used across the engine.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors produced while computing LP or market statistics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A snapshot holds a zero or negative value where a ratio needs a divisor.
    #[error("invalid snapshot at {date}: {reason}")]
    InvalidSnapshot {
        /// Period start of the offending snapshot.
        date: i64,
        /// What was wrong with it.
        reason: String,
    },
    /// Snapshot dates are not strictly increasing.
    #[error("series is not strictly ascending at index {index}")]
    UnorderedSeries {
        /// Index of the first snapshot that does not follow its predecessor.
        index: usize,
    },
    /// The reference asset price is zero or negative.
    #[error("reference price must be positive, got {0}")]
    InvalidReferencePrice(String),
    /// A scalar argument is out of its valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Decimal arithmetic left the representable range.
    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),
}

impl StatsError {
    /// Builds an [`StatsError::InvalidSnapshot`].
    pub fn invalid_snapshot(date: i64, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            date,
            reason: reason.into(),
        }
    }
}
