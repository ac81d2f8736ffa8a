//! Folds that turn a pool's snapshot series into LP and market statistics.
//!
//! - [`lp_stats`]: running fees, impermanent loss and return for one position
//! - [`market_stats`]: per-pair aggregates for ranking many pools
//! - [`labels`]: period labels for chart axes
//! - [`window`]: selecting the part of a series a position was live for
//!
//! Every computation is a pure function of its inputs.

/// Prelude module for convenient imports.
pub mod prelude;

/// Engine configuration.
pub mod config;
/// Date labels.
pub mod labels;
/// LP statistics accumulator.
pub mod lp_stats;
/// Market statistics aggregator.
pub mod market_stats;
/// Series windowing and validation.
pub mod window;
