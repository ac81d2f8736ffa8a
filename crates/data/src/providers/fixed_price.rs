use crate::{DataError, ReferencePriceProvider};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Reference price known ahead of time (flag, environment, fixture).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPriceProvider {
    price: Decimal,
}

impl FixedPriceProvider {
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self { price }
    }
}

#[async_trait]
impl ReferencePriceProvider for FixedPriceProvider {
    async fn eth_price(&self) -> Result<Decimal, DataError> {
        Ok(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fixed_price() {
        let provider = FixedPriceProvider::new(dec!(1850.25));
        assert_eq!(provider.eth_price().await.unwrap(), dec!(1850.25));
    }
}
