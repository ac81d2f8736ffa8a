//! Per-pair aggregates used to rank pools against each other.

use crate::config::StatsConfig;
use lp_stats_domain::entities::{MarketSnapshot, Pair};
use lp_stats_domain::enums::Period;
use lp_stats_domain::error::{StatsError, StatsResult};
use lp_stats_domain::metrics::impermanent_loss;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Aggregate metrics for one pair over its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    #[serde(flatten)]
    pub pair: Pair,
    /// `"TOKEN0/TOKEN1"`.
    pub market: String,
    /// Unscaled impermanent loss fraction, first to last snapshot.
    pub impermanent_loss: Decimal,
    /// Summed volume in USD.
    pub volume: Decimal,
    /// `volume * fee_ratio`.
    pub fees: Decimal,
    /// Current pool liquidity in USD.
    pub liquidity: Decimal,
    /// `fees + impermanent_loss`.
    #[serde(rename = "returnsUSD")]
    pub returns_usd: Decimal,
    /// `returns_usd / liquidity`.
    pub pct_return: Decimal,
    /// `returns_usd` in the reference asset.
    #[serde(rename = "returnsETH")]
    pub returns_eth: Decimal,
    /// `impermanent_loss * returns_usd`, kept for display.
    pub il_gross: Decimal,
}

/// Why a pair was left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer than two snapshots: no loss can be bracketed.
    #[error("insufficient data: {snapshots} snapshot(s), need at least 2")]
    InsufficientData {
        /// Snapshots available for the pair.
        snapshots: usize,
    },
    /// A snapshot had non-positive reserves.
    #[error("{0}")]
    InvalidSnapshot(String),
    /// The pair reports no USD liquidity to divide returns by.
    #[error("pair has no USD liquidity")]
    ZeroLiquidity,
    /// Decimal arithmetic failed.
    #[error("{0}")]
    Arithmetic(String),
}

impl From<StatsError> for SkipReason {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::InvalidSnapshot { .. } => Self::InvalidSnapshot(err.to_string()),
            other => Self::Arithmetic(other.to_string()),
        }
    }
}

/// A pair omitted from the output, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    /// Position of the pair in the input batch.
    pub index: usize,
    pub market: String,
    pub reason: SkipReason,
}

/// Result of aggregating a batch of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatsReport {
    /// Computed records in input order.
    pub stats: Vec<MarketStats>,
    /// Omitted pairs in input order.
    pub skipped: Vec<SkippedPair>,
}

impl MarketStatsReport {
    /// Computed records sorted by `pct_return`, best first. Ties keep input order.
    #[must_use]
    pub fn ranked_by_return(&self) -> Vec<&MarketStats> {
        let mut ranked: Vec<&MarketStats> = self.stats.iter().collect();
        ranked.sort_by(|a, b| b.pct_return.cmp(&a.pct_return));
        ranked
    }
}

/// Aggregates one pair's series.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the pair cannot be evaluated.
pub fn evaluate_pair(
    pair: &Pair,
    series: &[MarketSnapshot],
    eth_price: Decimal,
    fee_ratio: Decimal,
    period: Period,
) -> Result<MarketStats, SkipReason> {
    let (first, last) = match series {
        [first, .., last] => (first, last),
        _ => {
            return Err(SkipReason::InsufficientData {
                snapshots: series.len(),
            });
        }
    };
    if pair.reserve_usd <= Decimal::ZERO {
        return Err(SkipReason::ZeroLiquidity);
    }

    let impermanent_loss = impermanent_loss(first, last)?;
    let volume = series
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.volume(period)))
        .ok_or(StatsError::Overflow("volume"))?;
    let fees = volume
        .checked_mul(fee_ratio)
        .ok_or(StatsError::Overflow("fees"))?;
    let returns_usd = fees
        .checked_add(impermanent_loss)
        .ok_or(StatsError::Overflow("returns"))?;
    let pct_return = returns_usd
        .checked_div(pair.reserve_usd)
        .ok_or(StatsError::Overflow("percentage return"))?;
    let returns_eth = returns_usd
        .checked_div(eth_price)
        .ok_or(StatsError::Overflow("returns in reference asset"))?;
    let il_gross = impermanent_loss
        .checked_mul(returns_usd)
        .ok_or(StatsError::Overflow("gross impermanent loss"))?;

    Ok(MarketStats {
        market: pair.market(),
        pair: pair.clone(),
        impermanent_loss,
        volume,
        fees,
        liquidity: pair.reserve_usd,
        returns_usd,
        pct_return,
        returns_eth,
        il_gross,
    })
}

/// Aggregates a batch of pairs, each matched positionally with its series.
///
/// Pairs that cannot be evaluated are reported in
/// [`MarketStatsReport::skipped`] and do not affect the others.
///
/// # Errors
///
/// [`StatsError::InvalidReferencePrice`] if `eth_price` is not positive.
pub fn compute_market_stats<S>(
    pairs: &[Pair],
    history: &[S],
    eth_price: Decimal,
    config: &StatsConfig,
) -> StatsResult<MarketStatsReport>
where
    S: AsRef<[MarketSnapshot]>,
{
    if eth_price <= Decimal::ZERO {
        return Err(StatsError::InvalidReferencePrice(eth_price.to_string()));
    }
    if history.len() > pairs.len() {
        debug!(
            pairs = pairs.len(),
            series = history.len(),
            "ignoring series without a matching pair"
        );
    }

    let mut report = MarketStatsReport::default();
    for (index, pair) in pairs.iter().enumerate() {
        let series: &[MarketSnapshot] = history.get(index).map_or(&[], |s| s.as_ref());
        match evaluate_pair(pair, series, eth_price, config.fee_ratio, config.period) {
            Ok(stats) => report.stats.push(stats),
            Err(reason) => {
                let market = pair.market();
                warn!(index, market = %market, reason = %reason, "skipping pair");
                report.skipped.push(SkippedPair {
                    index,
                    market,
                    reason,
                });
            }
        }
    }

    debug!(
        computed = report.stats.len(),
        skipped = report.skipped.len(),
        period = %config.period,
        "market stats computed"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_stats_domain::entities::Token;
    use rust_decimal_macros::dec;

    fn pair(a: &str, b: &str, reserve_usd: Decimal) -> Pair {
        Pair::new(format!("{a}-{b}"), Token::new(a, 18), Token::new(b, 6), reserve_usd)
    }

    fn flat(len: i64, volume: Decimal) -> Vec<MarketSnapshot> {
        (0..len)
            .map(|d| MarketSnapshot::daily(d * 86_400, dec!(100), dec!(100), dec!(1000), volume))
            .collect()
    }

    #[test]
    fn test_flat_market() {
        let pairs = vec![pair("WETH", "USDC", dec!(10000))];
        let history = vec![flat(3, dec!(1000))];
        let report =
            compute_market_stats(&pairs, &history, dec!(2000), &StatsConfig::default()).unwrap();

        assert!(report.skipped.is_empty());
        let stats = &report.stats[0];
        assert_eq!(stats.market, "WETH/USDC");
        assert_eq!(stats.impermanent_loss, Decimal::ZERO);
        assert_eq!(stats.volume, dec!(3000));
        assert_eq!(stats.fees, dec!(9));
        assert_eq!(stats.returns_usd, dec!(9));
        assert_eq!(stats.liquidity, dec!(10000));
        assert_eq!(stats.pct_return, dec!(0.0009));
        assert_eq!(stats.returns_eth, dec!(0.0045));
        assert_eq!(stats.il_gross, Decimal::ZERO);
    }

    #[test]
    fn test_short_series_skipped_and_order_kept() {
        let pairs = vec![
            pair("A", "B", dec!(100)),
            pair("C", "D", dec!(100)),
            pair("E", "F", dec!(100)),
        ];
        let history = vec![flat(2, dec!(1)), flat(1, dec!(1)), flat(4, dec!(1))];
        let report =
            compute_market_stats(&pairs, &history, dec!(1), &StatsConfig::default()).unwrap();

        assert_eq!(report.stats.len(), 2);
        assert_eq!(report.stats[0].market, "A/B");
        assert_eq!(report.stats[1].market, "E/F");
        assert_eq!(
            report.skipped,
            vec![SkippedPair {
                index: 1,
                market: "C/D".to_string(),
                reason: SkipReason::InsufficientData { snapshots: 1 },
            }]
        );
    }

    #[test]
    fn test_missing_series_skipped() {
        let pairs = vec![pair("A", "B", dec!(100)), pair("C", "D", dec!(100))];
        let history = vec![flat(2, dec!(1))];
        let report =
            compute_market_stats(&pairs, &history, dec!(1), &StatsConfig::default()).unwrap();
        assert_eq!(report.stats.len(), 1);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::InsufficientData { snapshots: 0 }
        );
    }

    #[test]
    fn test_invalid_snapshot_does_not_abort_batch() {
        let pairs = vec![pair("A", "B", dec!(100)), pair("C", "D", dec!(100))];
        let mut broken = flat(3, dec!(1));
        broken[2].reserve1 = Decimal::ZERO;
        let history = vec![broken, flat(3, dec!(1))];
        let report =
            compute_market_stats(&pairs, &history, dec!(1), &StatsConfig::default()).unwrap();

        assert_eq!(report.stats.len(), 1);
        assert_eq!(report.stats[0].market, "C/D");
        assert!(matches!(
            report.skipped[0].reason,
            SkipReason::InvalidSnapshot(_)
        ));
    }

    #[test]
    fn test_zero_liquidity_skipped() {
        let pairs = vec![pair("A", "B", Decimal::ZERO)];
        let report =
            compute_market_stats(&pairs, &[flat(2, dec!(1))], dec!(1), &StatsConfig::default())
                .unwrap();
        assert_eq!(report.skipped[0].reason, SkipReason::ZeroLiquidity);
    }

    #[test]
    fn test_invalid_reference_price() {
        let pairs = vec![pair("A", "B", dec!(100))];
        let err = compute_market_stats(&pairs, &[flat(2, dec!(1))], Decimal::ZERO, &StatsConfig::default())
            .unwrap_err();
        assert!(matches!(err, StatsError::InvalidReferencePrice(_)));
    }

    #[test]
    fn test_price_move_and_ratio_law() {
        let pairs = vec![pair("A", "B", dec!(3333)), pair("C", "D", dec!(777))];
        let moved = vec![
            MarketSnapshot::daily(0, dec!(100), dec!(100), dec!(1000), dec!(500)),
            MarketSnapshot::daily(86_400, dec!(141.42), dec!(70.71), dec!(1000), dec!(700)),
        ];
        let history = vec![moved.clone(), moved];
        let report =
            compute_market_stats(&pairs, &history, dec!(1800), &StatsConfig::default()).unwrap();

        for stats in &report.stats {
            assert!(stats.impermanent_loss < Decimal::ZERO);
            assert_eq!(stats.volume, dec!(1200));
            assert_eq!(stats.fees, dec!(3.6));
            assert_eq!(stats.returns_usd, stats.fees + stats.impermanent_loss);
            assert_eq!(stats.pct_return, stats.returns_usd / stats.pair.reserve_usd);
            assert_eq!(stats.returns_eth, stats.returns_usd / dec!(1800));
            assert_eq!(stats.il_gross, stats.impermanent_loss * stats.returns_usd);
        }
    }

    #[test]
    fn test_large_reserve_pair_not_skipped() {
        let pairs = vec![pair("MEME", "WETH", dec!(20000))];
        let history = vec![vec![
            MarketSnapshot::daily(0, dec!(300000000000000), dec!(300000000000000), dec!(20000), dec!(0)),
            MarketSnapshot::daily(
                86_400,
                dec!(330000000000000),
                dec!(272700000000000),
                dec!(20000),
                dec!(5000),
            ),
        ]];
        let report =
            compute_market_stats(&pairs, &history, dec!(2000), &StatsConfig::default()).unwrap();

        assert!(report.skipped.is_empty());
        let stats = &report.stats[0];
        assert_eq!(stats.fees, dec!(15));
        assert!((stats.impermanent_loss - dec!(-0.0045296180)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_hourly_volume_selected() {
        let pairs = vec![pair("A", "B", dec!(100))];
        let history = vec![vec![
            MarketSnapshot::hourly(0, dec!(1), dec!(1), dec!(10), dec!(40)),
            MarketSnapshot::hourly(3600, dec!(1), dec!(1), dec!(10), dec!(60)),
        ]];
        let hourly = StatsConfig::default().with_period(Period::Hourly);
        let report = compute_market_stats(&pairs, &history, dec!(1), &hourly).unwrap();
        assert_eq!(report.stats[0].volume, dec!(100));

        let daily = compute_market_stats(&pairs, &history, dec!(1), &StatsConfig::default()).unwrap();
        assert_eq!(daily.stats[0].volume, Decimal::ZERO);
    }

    #[test]
    fn test_ranked_by_return() {
        let pairs = vec![
            pair("LOW", "X", dec!(1000)),
            pair("HIGH", "X", dec!(10)),
            pair("MID", "X", dec!(100)),
        ];
        let history = vec![flat(2, dec!(100)), flat(2, dec!(100)), flat(2, dec!(100))];
        let report =
            compute_market_stats(&pairs, &history, dec!(1), &StatsConfig::default()).unwrap();
        let ranked: Vec<_> = report.ranked_by_return().iter().map(|s| s.market.as_str()).collect();
        assert_eq!(ranked, vec!["HIGH/X", "MID/X", "LOW/X"]);
        // input order untouched
        assert_eq!(report.stats[0].market, "LOW/X");
    }

    #[test]
    fn test_serialized_record_carries_pair_fields() {
        let pairs = vec![pair("WETH", "USDC", dec!(10000))];
        let report =
            compute_market_stats(&pairs, &[flat(2, dec!(1))], dec!(1), &StatsConfig::default())
                .unwrap();
        let json = serde_json::to_value(&report.stats[0]).unwrap();
        assert_eq!(json["market"], "WETH/USDC");
        assert!(json.get("reserveUSD").is_some());
        assert!(json.get("token0").is_some());
        assert!(json.get("ilGross").is_some());
        assert!(json.get("returnsETH").is_some());
    }
}
