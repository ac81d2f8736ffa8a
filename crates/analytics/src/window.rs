//! Selecting and checking the slice of a series a position covers.

use lp_stats_domain::entities::{MarketSnapshot, Pair};
use lp_stats_domain::error::{StatsError, StatsResult};

/// Clamps a requested entry date so it is never earlier than pair creation.
#[must_use]
pub fn effective_entry_date(pair: &Pair, requested: i64) -> i64 {
    match pair.created_at {
        Some(created_at) if requested < created_at => created_at,
        _ => requested,
    }
}

/// Returns the suffix of an ascending series starting at `entry_date`.
///
/// The first returned snapshot is the first one whose `date >= entry_date`.
#[must_use]
pub fn series_from(series: &[MarketSnapshot], entry_date: i64) -> &[MarketSnapshot] {
    let start = series.partition_point(|s| s.date < entry_date);
    &series[start..]
}

/// Checks that snapshot dates are strictly increasing.
pub fn validate_series(series: &[MarketSnapshot]) -> StatsResult<()> {
    match series.windows(2).position(|w| w[1].date <= w[0].date) {
        Some(i) => Err(StatsError::UnorderedSeries { index: i + 1 }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_stats_domain::entities::Token;
    use rust_decimal_macros::dec;

    fn series(dates: &[i64]) -> Vec<MarketSnapshot> {
        dates
            .iter()
            .map(|&d| MarketSnapshot::daily(d, dec!(1), dec!(1), dec!(1), dec!(0)))
            .collect()
    }

    #[test]
    fn test_effective_entry_date() {
        let mut pair = Pair::new("p", Token::new("A", 18), Token::new("B", 18), dec!(1));
        pair.created_at = Some(1_000);
        assert_eq!(effective_entry_date(&pair, 500), 1_000);
        assert_eq!(effective_entry_date(&pair, 2_000), 2_000);

        let unknown = Pair::new("p", Token::new("A", 18), Token::new("B", 18), dec!(1));
        assert_eq!(effective_entry_date(&unknown, 500), 500);
    }

    #[test]
    fn test_series_from() {
        let s = series(&[100, 200, 300, 400]);
        assert_eq!(series_from(&s, 0).len(), 4);
        assert_eq!(series_from(&s, 200)[0].date, 200);
        assert_eq!(series_from(&s, 250)[0].date, 300);
        assert!(series_from(&s, 500).is_empty());
    }

    #[test]
    fn test_validate_series() {
        assert!(validate_series(&[]).is_ok());
        assert!(validate_series(&series(&[1, 2, 3])).is_ok());
        assert_eq!(
            validate_series(&series(&[1, 3, 3, 4])),
            Err(StatsError::UnorderedSeries { index: 2 })
        );
        assert_eq!(
            validate_series(&series(&[5, 4])),
            Err(StatsError::UnorderedSeries { index: 1 })
        );
    }
}
