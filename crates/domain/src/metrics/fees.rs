use crate::enums::Period;
use crate::error::{StatsError, StatsResult};
use rust_decimal::Decimal;

/// Uniswap V2 swap fee paid to liquidity providers: 30 bps.
pub const FEE_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 3);

/// Converts a fee tier in basis points to a ratio.
#[must_use]
pub fn fee_ratio_from_bps(bps: u32) -> Decimal {
    Decimal::from(bps) / Decimal::from(10000)
}

/// Fees earned over one period by a position holding `pool_share` of the pool.
pub fn period_fees(volume_usd: Decimal, pool_share: Decimal, fee_ratio: Decimal) -> StatsResult<Decimal> {
    volume_usd
        .checked_mul(pool_share)
        .and_then(|v| v.checked_mul(fee_ratio))
        .ok_or(StatsError::Overflow("period fees"))
}

/// Annualises a fee return earned over `periods` periods of the given granularity.
pub fn annualized_yield(
    fees_earned: Decimal,
    principal: Decimal,
    periods: u32,
    period: Period,
) -> StatsResult<Decimal> {
    if principal.is_zero() {
        return Err(StatsError::InvalidInput("principal cannot be zero"));
    }
    if periods == 0 {
        return Err(StatsError::InvalidInput("periods cannot be zero"));
    }

    let per_year = Decimal::from(period.periods_per_year());
    let roi = fees_earned
        .checked_div(principal)
        .ok_or(StatsError::Overflow("return on principal"))?;

    roi.checked_mul(per_year / Decimal::from(periods))
        .ok_or(StatsError::Overflow("annualized yield"))
}
