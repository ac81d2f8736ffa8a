//! Running and total statistics for a single liquidity position.
//!
//! The position is modelled as a fixed USD contribution made at the first
//! snapshot of the series. Each later period earns a share of that period's
//! swap fees proportional to `contributed / reserveUSD` and suffers the
//! impermanent loss of the price move since the previous period, both scaled
//! by the same contribution. Fees are not compounded into the position.

use crate::config::StatsConfig;
use crate::labels::DateLabeler;
use lp_stats_domain::entities::MarketSnapshot;
use lp_stats_domain::enums::Period;
use lp_stats_domain::error::{StatsError, StatsResult};
use lp_stats_domain::metrics::{annualized_yield, impermanent_loss_usd, period_fees};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Statistics for one position over a snapshot series.
///
/// The `running_*` sequences and `days` are index-aligned with the input
/// series. Index 0 is the entry baseline and always zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpStats {
    /// Fees earned over the whole series.
    pub total_fees: Decimal,
    /// Impermanent loss in USD from entry to the current pool state.
    pub impermanent_loss: Decimal,
    /// `total_fees + impermanent_loss`.
    pub total_return: Decimal,
    /// Cumulative pool volume in USD.
    pub running_volume: Vec<Decimal>,
    /// Cumulative fees earned by the position.
    pub running_fees: Vec<Decimal>,
    /// Cumulative day-over-day impermanent loss in USD.
    pub running_impermanent_loss: Vec<Decimal>,
    /// Cumulative fees plus impermanent loss.
    pub running_return: Vec<Decimal>,
    /// Period labels.
    pub days: Vec<String>,
}

impl LpStats {
    /// Number of periods covered, including the baseline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when computed from an empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Annualised fee yield on the contribution.
    ///
    /// `None` when fewer than two periods were recorded, since no time has elapsed.
    pub fn fee_yield(&self, contributed_usd: Decimal, period: Period) -> StatsResult<Option<Decimal>> {
        let elapsed = self.len().saturating_sub(1);
        if elapsed == 0 {
            return Ok(None);
        }
        let periods = u32::try_from(elapsed).map_err(|_| StatsError::Overflow("elapsed periods"))?;
        annualized_yield(self.total_fees, contributed_usd, periods, period).map(Some)
    }
}

/// Per-period increments recorded by the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDelta {
    /// Pool volume in USD for the period.
    pub volume: Decimal,
    /// Position's fraction of pool liquidity.
    pub pool_share: Decimal,
    /// Fees earned this period.
    pub fees: Decimal,
    /// Impermanent loss in USD relative to the previous period.
    pub impermanent_loss: Decimal,
    /// `fees + impermanent_loss`.
    pub net_return: Decimal,
}

/// Folds a snapshot series into [`LpStats`] one period at a time.
#[derive(Debug)]
pub struct LpStatsAccumulator {
    contributed_usd: Decimal,
    fee_ratio: Decimal,
    period: Period,
    stats: LpStats,
}

impl LpStatsAccumulator {
    /// Creates an accumulator for a fixed USD contribution.
    ///
    /// # Arguments
    ///
    /// * `contributed_usd` - Value the LP contributed at entry
    /// * `fee_ratio` - Share of volume paid to LPs
    /// * `period` - Granularity, selects the volume field
    #[must_use]
    pub fn new(contributed_usd: Decimal, fee_ratio: Decimal, period: Period) -> Self {
        Self {
            contributed_usd,
            fee_ratio,
            period,
            stats: LpStats::default(),
        }
    }

    /// Records the entry period: zero on every running series.
    pub fn record_baseline(&mut self, label: String) {
        self.stats.running_volume.push(Decimal::ZERO);
        self.stats.running_fees.push(Decimal::ZERO);
        self.stats.running_impermanent_loss.push(Decimal::ZERO);
        self.stats.running_return.push(Decimal::ZERO);
        self.stats.days.push(label);
    }

    /// Records one period following `previous`.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidSnapshot`] if either snapshot has non-positive
    /// reserves or `snapshot` has non-positive USD liquidity.
    pub fn record_period(
        &mut self,
        previous: &MarketSnapshot,
        snapshot: &MarketSnapshot,
        label: String,
    ) -> StatsResult<PeriodDelta> {
        let pool_share = snapshot.pool_share(self.contributed_usd)?;
        let volume = snapshot.volume(self.period);
        let fees = period_fees(volume, pool_share, self.fee_ratio)?;
        let impermanent_loss = impermanent_loss_usd(previous, snapshot, self.contributed_usd)?;
        let net_return = fees
            .checked_add(impermanent_loss)
            .ok_or(StatsError::Overflow("period return"))?;

        push_cumulative(&mut self.stats.running_volume, volume)?;
        push_cumulative(&mut self.stats.running_fees, fees)?;
        push_cumulative(&mut self.stats.running_impermanent_loss, impermanent_loss)?;
        push_cumulative(&mut self.stats.running_return, net_return)?;
        self.stats.days.push(label);

        let delta = PeriodDelta {
            volume,
            pool_share,
            fees,
            impermanent_loss,
            net_return,
        };
        trace!(date = snapshot.date, ?delta, "period recorded");
        Ok(delta)
    }

    /// Closes the fold, pricing whole-window impermanent loss against `current`.
    pub fn finish(mut self, entry: &MarketSnapshot, current: &MarketSnapshot) -> StatsResult<LpStats> {
        let total_fees = self
            .stats
            .running_fees
            .last()
            .copied()
            .unwrap_or(Decimal::ZERO);
        let impermanent_loss = impermanent_loss_usd(entry, current, self.contributed_usd)?;

        self.stats.total_fees = total_fees;
        self.stats.impermanent_loss = impermanent_loss;
        self.stats.total_return = total_fees
            .checked_add(impermanent_loss)
            .ok_or(StatsError::Overflow("total return"))?;
        Ok(self.stats)
    }
}

fn push_cumulative(series: &mut Vec<Decimal>, delta: Decimal) -> StatsResult<()> {
    let previous = series.last().copied().unwrap_or(Decimal::ZERO);
    let next = previous
        .checked_add(delta)
        .ok_or(StatsError::Overflow("running total"))?;
    series.push(next);
    Ok(())
}

/// Computes LP statistics for a position entered at `series[0]`.
///
/// `current` is the live pool state used for the whole-window impermanent
/// loss. An empty series yields an empty [`LpStats`] rather than an error.
///
/// # Arguments
///
/// * `current` - Latest pool snapshot
/// * `series` - Snapshots ordered by ascending date, starting at entry
/// * `contributed_usd` - USD value contributed at entry
/// * `config` - Fee ratio and granularity
/// * `labeler` - Renders period labels
pub fn compute_lp_stats<L>(
    current: &MarketSnapshot,
    series: &[MarketSnapshot],
    contributed_usd: Decimal,
    config: &StatsConfig,
    labeler: &L,
) -> StatsResult<LpStats>
where
    L: DateLabeler + ?Sized,
{
    let Some(entry) = series.first() else {
        debug!("empty series, no LP stats");
        return Ok(LpStats::default());
    };

    let mut acc = LpStatsAccumulator::new(contributed_usd, config.fee_ratio, config.period);
    acc.record_baseline(labeler.label(entry.date));
    for window in series.windows(2) {
        acc.record_period(&window[0], &window[1], labeler.label(window[1].date))?;
    }
    let stats = acc.finish(entry, current)?;

    debug!(
        periods = stats.len(),
        total_fees = %stats.total_fees,
        impermanent_loss = %stats.impermanent_loss,
        "LP stats computed"
    );
    Ok(stats)
}
