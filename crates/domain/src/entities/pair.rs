use super::serde_helpers::opt_int_or_string;
use crate::entities::token::Token;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static identity of a two-asset pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(default)]
    pub id: String,
    pub token0: Token,
    pub token1: Token,
    /// Current pool liquidity in USD.
    #[serde(rename = "reserveUSD")]
    pub reserve_usd: Decimal,
    /// Unix timestamp of pool creation, when the indexer reports it.
    #[serde(
        default,
        rename = "createdAtTimestamp",
        deserialize_with = "opt_int_or_string"
    )]
    pub created_at: Option<i64>,
}

impl Pair {
    pub fn new(id: impl Into<String>, token0: Token, token1: Token, reserve_usd: Decimal) -> Self {
        Self {
            id: id.into(),
            token0,
            token1,
            reserve_usd,
            created_at: None,
        }
    }

    /// Market label, e.g. `"WETH/USDC"`.
    #[must_use]
    pub fn market(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }
}
