//! Market data loaded from a JSON fixture.
//!
//! File layout:
//!
//! ```json
//! {
//!   "ethPrice": "1850.00",
//!   "pairs": [
//!     {
//!       "id": "0xpair",
//!       "token0": { "symbol": "WETH", "decimals": "18" },
//!       "token1": { "symbol": "USDC", "decimals": "6" },
//!       "reserveUSD": "1000000",
//!       "daily": [ { "date": 1609459200, "reserve0": "1", "reserve1": "1",
//!                    "reserveUSD": "1000000", "dailyVolumeUSD": "0" } ],
//!       "hourly": []
//!     }
//!   ]
//! }
//! ```

use crate::{DataError, MarketDataProvider, ReferencePriceProvider};
use async_trait::async_trait;
use lp_stats_domain::entities::{MarketSnapshot, Pair};
use lp_stats_domain::enums::Period;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A pair together with its recorded series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairHistory {
    #[serde(flatten)]
    pub pair: Pair,
    #[serde(default)]
    pub daily: Vec<MarketSnapshot>,
    #[serde(default)]
    pub hourly: Vec<MarketSnapshot>,
}

impl PairHistory {
    /// Series of the given granularity.
    #[must_use]
    pub fn series(&self, period: Period) -> &[MarketSnapshot] {
        match period {
            Period::Daily => &self.daily,
            Period::Hourly => &self.hourly,
        }
    }
}

/// Contents of a market data fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDataset {
    #[serde(default)]
    pub eth_price: Option<Decimal>,
    #[serde(default)]
    pub pairs: Vec<PairHistory>,
}

/// Serves pairs, series and the reference price from a [`MarketDataset`].
#[derive(Debug, Clone, Default)]
pub struct JsonFileProvider {
    dataset: MarketDataset,
}

impl JsonFileProvider {
    /// Wraps an in-memory dataset.
    #[must_use]
    pub fn new(dataset: MarketDataset) -> Self {
        Self { dataset }
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid dataset.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let dataset: MarketDataset =
            serde_json::from_str(&raw).map_err(|source| DataError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), pairs = dataset.pairs.len(), "market dataset loaded");
        Ok(Self::new(dataset))
    }

    fn find(&self, pair_id: &str) -> Result<&PairHistory, DataError> {
        self.dataset
            .pairs
            .iter()
            .find(|p| p.pair.id == pair_id)
            .ok_or_else(|| DataError::NotFound(format!("pair {pair_id}")))
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn get_pairs(&self) -> Result<Vec<Pair>, DataError> {
        Ok(self.dataset.pairs.iter().map(|p| p.pair.clone()).collect())
    }

    async fn get_pair(&self, pair_id: &str) -> Result<Pair, DataError> {
        self.find(pair_id).map(|p| p.pair.clone())
    }

    async fn get_history(
        &self,
        pair_id: &str,
        since: i64,
        period: Period,
    ) -> Result<Vec<MarketSnapshot>, DataError> {
        let mut series: Vec<MarketSnapshot> = self
            .find(pair_id)?
            .series(period)
            .iter()
            .filter(|s| s.date >= since)
            .cloned()
            .collect();
        series.sort_by_key(|s| s.date);
        Ok(series)
    }
}

#[async_trait]
impl ReferencePriceProvider for JsonFileProvider {
    async fn eth_price(&self) -> Result<Decimal, DataError> {
        self.dataset
            .eth_price
            .ok_or_else(|| DataError::NotFound("ethPrice".to_string()))
    }
}
