use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of a snapshot series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One snapshot per calendar day.
    #[default]
    Daily,
    /// One snapshot per hour.
    Hourly,
}

impl Period {
    /// Number of periods in a (non-leap) year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Daily => 365,
            Self::Hourly => 365 * 24,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Hourly => write!(f, "hourly"),
        }
    }
}

impl FromStr for Period {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "hourly" | "hour" => Ok(Self::Hourly),
            _ => Err(StatsError::InvalidInput("period must be 'daily' or 'hourly'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("daily".parse::<Period>().unwrap(), Period::Daily);
        assert_eq!("Hourly".parse::<Period>().unwrap(), Period::Hourly);
        assert!("weekly".parse::<Period>().is_err());
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Period::Daily.periods_per_year(), 365);
        assert_eq!(Period::Hourly.periods_per_year(), 8760);
        assert_eq!(Period::default(), Period::Daily);
    }
}
