//! Provider implementations.

mod fixed_price;
mod json_file;

pub use fixed_price::FixedPriceProvider;
pub use json_file::{JsonFileProvider, MarketDataset, PairHistory};
