use crate::entities::MarketSnapshot;
use crate::error::{StatsError, StatsResult};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

const TWO: Decimal = Decimal::TWO;

/// Fractional impermanent loss of holding a pool position from `start` to `end`
/// instead of holding the two assets.
///
/// Zero when the exchange rate is unchanged, negative for any move.
///
/// # Errors
///
/// [`StatsError::InvalidSnapshot`] when either snapshot has a non-positive reserve.
pub fn impermanent_loss(start: &MarketSnapshot, end: &MarketSnapshot) -> StatsResult<Decimal> {
    let (num, den) = ratio_terms(start, end)?;
    if num == den {
        return Ok(Decimal::ZERO);
    }
    // IL(k) == IL(1/k): fold onto k > 1 so swapping token roles is exact.
    let (num, den) = if num > den { (num, den) } else { (den, num) };
    let price_ratio = num
        .checked_div(den)
        .ok_or(StatsError::Overflow("price ratio"))?;
    il_from_price_ratio(price_ratio)
}

/// Impermanent loss between two snapshots scaled to a position size in USD.
pub fn impermanent_loss_usd(
    start: &MarketSnapshot,
    end: &MarketSnapshot,
    liquidity_usd: Decimal,
) -> StatsResult<Decimal> {
    impermanent_loss(start, end)?
        .checked_mul(liquidity_usd)
        .ok_or(StatsError::Overflow("impermanent loss in USD"))
}

/// Two terms whose quotient is `rate_end / rate_start` for the `reserve0 / reserve1` rate.
///
/// Cross-multiplied when that fits in a `Decimal`, otherwise per-token growth factors
/// `(r0_end / r0_start, r1_end / r1_start)`. Both forms swap exactly when the tokens swap.
fn ratio_terms(start: &MarketSnapshot, end: &MarketSnapshot) -> StatsResult<(Decimal, Decimal)> {
    start.ensure_live_reserves()?;
    end.ensure_live_reserves()?;

    let cross = end
        .reserve0
        .checked_mul(start.reserve1)
        .zip(end.reserve1.checked_mul(start.reserve0));
    if let Some(terms) = cross {
        return Ok(terms);
    }

    let growth0 = end
        .reserve0
        .checked_div(start.reserve0)
        .ok_or(StatsError::Overflow("price ratio"))?;
    let growth1 = end
        .reserve1
        .checked_div(start.reserve1)
        .ok_or(StatsError::Overflow("price ratio"))?;
    Ok((growth0, growth1))
}

fn il_from_price_ratio(price_ratio: Decimal) -> StatsResult<Decimal> {
    if price_ratio <= Decimal::ZERO {
        return Err(StatsError::InvalidInput("price ratio must be positive"));
    }
    if price_ratio == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let sqrt_ratio = price_ratio
        .sqrt()
        .ok_or(StatsError::Overflow("square root of price ratio"))?;
    let numerator = TWO
        .checked_mul(sqrt_ratio)
        .ok_or(StatsError::Overflow("impermanent loss"))?;
    let denominator = price_ratio
        .checked_add(Decimal::ONE)
        .ok_or(StatsError::Overflow("impermanent loss"))?;
    let il = numerator
        .checked_div(denominator)
        .ok_or(StatsError::Overflow("impermanent loss"))?
        - Decimal::ONE;

    // sqrt rounding can leave a positive residue when the ratio is close to 1
    Ok(il.min(Decimal::ZERO))
}
