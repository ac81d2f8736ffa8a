use super::serde_helpers::int_or_string;
use serde::{Deserialize, Serialize};

/// One side of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Contract address or indexer id.
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "int_or_string")]
    pub decimals: u8,
}

impl Token {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            id: String::new(),
            symbol: symbol.into(),
            name: String::new(),
            decimals,
        }
    }
}
