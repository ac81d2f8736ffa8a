//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate and
//! the domain types they operate on.
//!
//! # Example
//!
//! ```rust
//! use lp_stats_analytics::prelude::*;
//! ```

// Configuration
pub use crate::config::StatsConfig;

// Labels
pub use crate::labels::{ChronoLabeler, DEFAULT_LABEL_FORMAT, DateLabeler};

// LP statistics
pub use crate::lp_stats::{LpStats, LpStatsAccumulator, PeriodDelta, compute_lp_stats};

// Market statistics
pub use crate::market_stats::{
    MarketStats, MarketStatsReport, SkipReason, SkippedPair, compute_market_stats, evaluate_pair,
};

// Windowing
pub use crate::window::{effective_entry_date, series_from, validate_series};

// Domain
pub use lp_stats_domain::entities::{MarketSnapshot, Pair, Token};
pub use lp_stats_domain::enums::Period;
pub use lp_stats_domain::error::{StatsError, StatsResult};
pub use lp_stats_domain::metrics::{FEE_RATIO, impermanent_loss, impermanent_loss_usd};
pub use lp_stats_domain::value_objects::{Denomination, PositionSize};
