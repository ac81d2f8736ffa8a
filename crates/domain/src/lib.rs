//! Domain types and pure formulas for liquidity-provider statistics.
//!
//! This crate holds everything that does not need to fold over a series:
//! - Pool snapshots, pairs and tokens as read from an indexer
//! - The constant-product impermanent loss formula
//! - Fee helpers (pool share, fee ratio, annualised yield)
//! - Position sizing across USD and token denominations

/// Pool, pair and token records.
pub mod entities;
/// Shared enums.
pub mod enums;
/// Error taxonomy.
pub mod error;
/// Financial metrics.
pub mod metrics;
/// Derived value objects.
pub mod value_objects;

pub use error::{StatsError, StatsResult};
