//! Engine configuration.

use crate::labels::{ChronoLabeler, DEFAULT_LABEL_FORMAT};
use lp_stats_domain::enums::Period;
use lp_stats_domain::metrics::FEE_RATIO;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Parameters shared by the LP accumulator and the market aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Share of swap volume paid to liquidity providers.
    pub fee_ratio: Decimal,
    /// Granularity of the input series; selects the volume field.
    pub period: Period,
    /// strftime pattern for period labels.
    pub label_format: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            fee_ratio: FEE_RATIO,
            period: Period::Daily,
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
        }
    }
}

impl StatsConfig {
    /// Sets the fee ratio.
    #[must_use]
    pub fn with_fee_ratio(mut self, fee_ratio: Decimal) -> Self {
        self.fee_ratio = fee_ratio;
        self
    }

    /// Sets the series granularity.
    #[must_use]
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Sets the label pattern.
    #[must_use]
    pub fn with_label_format(mut self, label_format: impl Into<String>) -> Self {
        self.label_format = label_format.into();
        self
    }

    /// Builds the labeler described by `label_format`.
    #[must_use]
    pub fn labeler(&self) -> ChronoLabeler {
        ChronoLabeler::new(self.label_format.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::DateLabeler;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = StatsConfig::default();
        assert_eq!(config.fee_ratio, dec!(0.003));
        assert_eq!(config.period, Period::Daily);
        assert_eq!(config.labeler().label(1_609_804_800), "Jan 5");
    }

    #[test]
    fn test_builders() {
        let config = StatsConfig::default()
            .with_fee_ratio(dec!(0.0005))
            .with_period(Period::Hourly)
            .with_label_format("%H:%M");
        assert_eq!(config.fee_ratio, dec!(0.0005));
        assert_eq!(config.period, Period::Hourly);
        assert_eq!(config.label_format, "%H:%M");
    }
}
