//! Sources of market data for the statistics engine.
//!
//! The engine itself never performs I/O. This crate defines the seams it is
//! fed through and ships local implementations of them.

/// Data source errors.
pub mod error;
/// Provider implementations.
pub mod providers;

pub use error::DataError;

use async_trait::async_trait;
use lp_stats_domain::entities::{MarketSnapshot, Pair};
use lp_stats_domain::enums::Period;
use rust_decimal::Decimal;

/// Supplies pair metadata and ordered snapshot series.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Lists the pairs the source knows about.
    async fn get_pairs(&self) -> Result<Vec<Pair>, DataError>;

    /// Fetches one pair by id.
    async fn get_pair(&self, pair_id: &str) -> Result<Pair, DataError>;

    /// Fetches snapshots of `period` granularity with `date >= since`,
    /// ordered by ascending date.
    async fn get_history(
        &self,
        pair_id: &str,
        since: i64,
        period: Period,
    ) -> Result<Vec<MarketSnapshot>, DataError>;
}

/// Supplies the USD price of the reference asset (ETH).
#[async_trait]
pub trait ReferencePriceProvider: Send + Sync {
    /// Current USD price of one unit of the reference asset.
    async fn eth_price(&self) -> Result<Decimal, DataError>;
}
