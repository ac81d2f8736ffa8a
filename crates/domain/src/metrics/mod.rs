pub mod fees;
pub mod impermanent_loss;

pub use fees::{FEE_RATIO, annualized_yield, fee_ratio_from_bps, period_fees};
pub use impermanent_loss::{impermanent_loss, impermanent_loss_usd};
