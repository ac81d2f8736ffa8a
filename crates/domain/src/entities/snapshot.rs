//! Per-period pool snapshots.

use super::serde_helpers::int_or_string;
use crate::enums::Period;
use crate::error::{StatsError, StatsResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// State of a pool at the start of one period (a day or an hour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Unix timestamp of the period start.
    #[serde(alias = "hourStartUnix", deserialize_with = "int_or_string")]
    pub date: i64,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    /// Total pool liquidity in USD.
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: Decimal,
    #[serde(rename = "dailyVolumeUSD", default)]
    pub daily_volume_usd: Decimal,
    #[serde(rename = "hourlyVolumeUSD", default)]
    pub hourly_volume_usd: Decimal,
}

impl MarketSnapshot {
    /// Creates a daily snapshot.
    #[must_use]
    pub fn daily(
        date: i64,
        reserve0: Decimal,
        reserve1: Decimal,
        reserve_usd: Decimal,
        volume_usd: Decimal,
    ) -> Self {
        Self {
            date,
            reserve0,
            reserve1,
            reserve_usd,
            daily_volume_usd: volume_usd,
            hourly_volume_usd: Decimal::ZERO,
        }
    }

    /// Creates an hourly snapshot.
    #[must_use]
    pub fn hourly(
        date: i64,
        reserve0: Decimal,
        reserve1: Decimal,
        reserve_usd: Decimal,
        volume_usd: Decimal,
    ) -> Self {
        Self {
            date,
            reserve0,
            reserve1,
            reserve_usd,
            daily_volume_usd: Decimal::ZERO,
            hourly_volume_usd: volume_usd,
        }
    }

    /// Trading volume in USD for the given granularity.
    #[must_use]
    pub fn volume(&self, period: Period) -> Decimal {
        match period {
            Period::Daily => self.daily_volume_usd,
            Period::Hourly => self.hourly_volume_usd,
        }
    }

    /// Fails unless both token reserves are strictly positive.
    pub fn ensure_live_reserves(&self) -> StatsResult<()> {
        if self.reserve0 <= Decimal::ZERO {
            return Err(StatsError::invalid_snapshot(
                self.date,
                format!("reserve0 must be positive, got {}", self.reserve0),
            ));
        }
        if self.reserve1 <= Decimal::ZERO {
            return Err(StatsError::invalid_snapshot(
                self.date,
                format!("reserve1 must be positive, got {}", self.reserve1),
            ));
        }
        Ok(())
    }

    /// Fraction of the pool's USD liquidity that `usd` represents.
    pub fn pool_share(&self, usd: Decimal) -> StatsResult<Decimal> {
        if self.reserve_usd <= Decimal::ZERO {
            return Err(StatsError::invalid_snapshot(
                self.date,
                format!("reserveUSD must be positive, got {}", self.reserve_usd),
            ));
        }
        usd.checked_div(self.reserve_usd)
            .ok_or(StatsError::Overflow("pool share"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_volume_by_period() {
        let daily = MarketSnapshot::daily(0, dec!(1), dec!(1), dec!(2), dec!(50));
        assert_eq!(daily.volume(Period::Daily), dec!(50));
        assert_eq!(daily.volume(Period::Hourly), Decimal::ZERO);

        let hourly = MarketSnapshot::hourly(0, dec!(1), dec!(1), dec!(2), dec!(7));
        assert_eq!(hourly.volume(Period::Hourly), dec!(7));
    }

    #[test]
    fn test_zero_reserve_rejected() {
        let snap = MarketSnapshot::daily(42, dec!(10), dec!(0), dec!(1), dec!(0));
        let err = snap.ensure_live_reserves().unwrap_err();
        assert!(matches!(err, StatsError::InvalidSnapshot { date: 42, .. }));

        let snap = MarketSnapshot::daily(42, dec!(-1), dec!(3), dec!(1), dec!(0));
        assert!(snap.ensure_live_reserves().is_err());
    }

    #[test]
    fn test_pool_share() {
        let snap = MarketSnapshot::daily(0, dec!(1), dec!(1), dec!(20000), dec!(0));
        assert_eq!(snap.pool_share(dec!(2000)).unwrap(), dec!(0.1));

        let empty = MarketSnapshot::daily(0, dec!(1), dec!(1), dec!(0), dec!(0));
        assert!(empty.pool_share(dec!(2000)).is_err());
    }

    #[test]
    fn test_deserialize_day_data() {
        let json = r#"{
            "date": 1609459200,
            "reserve0": "1000.5",
            "reserve1": "10",
            "reserveUSD": "20000",
            "dailyVolumeUSD": "5000.25"
        }"#;
        let snap: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.date, 1_609_459_200);
        assert_eq!(snap.reserve0, dec!(1000.5));
        assert_eq!(snap.volume(Period::Daily), dec!(5000.25));
        assert_eq!(snap.hourly_volume_usd, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_hour_data() {
        let json = r#"{
            "hourStartUnix": "1609462800",
            "reserve0": 4,
            "reserve1": 2,
            "reserveUSD": 8,
            "hourlyVolumeUSD": "12"
        }"#;
        let snap: MarketSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.date, 1_609_462_800);
        assert_eq!(snap.volume(Period::Hourly), dec!(12));
    }
}
