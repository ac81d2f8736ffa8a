//! Converting an LP contribution between USD and token amounts.
//!
//! All conversions go through the pool share implied by the entry snapshot:
//! a contribution worth `share` of the pool holds `share` of each reserve.

use crate::entities::MarketSnapshot;
use crate::error::{StatsError, StatsResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit an LP contribution is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    Usd,
    Token0,
    Token1,
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd => write!(f, "usd"),
            Self::Token0 => write!(f, "token0"),
            Self::Token1 => write!(f, "token1"),
        }
    }
}

impl FromStr for Denomination {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "token0" => Ok(Self::Token0),
            "token1" => Ok(Self::Token1),
            _ => Err(StatsError::InvalidInput(
                "denomination must be 'usd', 'token0' or 'token1'",
            )),
        }
    }
}

/// An LP contribution expressed in every denomination at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSize {
    /// Value in USD at the snapshot.
    pub usd: Decimal,
    /// Amount of token0 backing the position.
    pub token0: Decimal,
    /// Amount of token1 backing the position.
    pub token1: Decimal,
    /// Fraction of the pool the position represents.
    pub pool_share: Decimal,
}

impl PositionSize {
    /// Sizes a position from an amount in any denomination.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidSnapshot`] if the reserve used as divisor is not positive.
    pub fn from_amount(
        snapshot: &MarketSnapshot,
        denomination: Denomination,
        amount: Decimal,
    ) -> StatsResult<Self> {
        let reserve = match denomination {
            Denomination::Usd => snapshot.reserve_usd,
            Denomination::Token0 => snapshot.reserve0,
            Denomination::Token1 => snapshot.reserve1,
        };
        if reserve <= Decimal::ZERO {
            return Err(StatsError::invalid_snapshot(
                snapshot.date,
                format!("{denomination} reserve must be positive, got {reserve}"),
            ));
        }
        let pool_share = amount
            .checked_div(reserve)
            .ok_or(StatsError::Overflow("pool share"))?;

        let scale = |r: Decimal| {
            pool_share
                .checked_mul(r)
                .ok_or(StatsError::Overflow("position size"))
        };

        // Keep the caller's amount verbatim rather than share * reserve.
        let (usd, token0, token1) = match denomination {
            Denomination::Usd => (amount, scale(snapshot.reserve0)?, scale(snapshot.reserve1)?),
            Denomination::Token0 => (scale(snapshot.reserve_usd)?, amount, scale(snapshot.reserve1)?),
            Denomination::Token1 => (scale(snapshot.reserve_usd)?, scale(snapshot.reserve0)?, amount),
        };

        Ok(Self {
            usd,
            token0,
            token1,
            pool_share,
        })
    }
}
