pub mod pair;
pub mod snapshot;
pub mod token;

mod serde_helpers;

// Re-export for easier access
pub use pair::Pair;
pub use snapshot::MarketSnapshot;
pub use token::Token;
