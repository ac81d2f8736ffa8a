//! Terminal tables for command output.

use lp_stats_analytics::lp_stats::LpStats;
use lp_stats_analytics::market_stats::MarketStatsReport;
use lp_stats_domain::entities::Pair;
use lp_stats_domain::value_objects::PositionSize;
use prettytable::{Table, row};
use rust_decimal::Decimal;

const RULE: &str = "════════════════════════════════════";

/// Formats a fraction as a percentage, or as the raw fraction when scaling overflows.
fn percent(ratio: Decimal, dp: usize) -> String {
    ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .map_or_else(|| format!("{ratio:.dp$}x"), |pct| format!("{pct:.dp$}%"))
}

pub fn print_lp_stats(pair: &Pair, contributed: Decimal, stats: &LpStats, fee_yield: Option<Decimal>) {
    println!("\n📊 LP Position: {}", pair.market());
    println!("{RULE}");
    println!("Contributed:      ${:.2}", contributed);
    println!("Fees Earned:      ${:.2}", stats.total_fees);
    println!("Impermanent Loss: ${:.2}", stats.impermanent_loss);
    println!("Total Return:     ${:.2}", stats.total_return);
    if let Some(apy) = fee_yield {
        println!("Fee APY:          {}", percent(apy, 2));
    }
    println!("{RULE}");

    let mut table = Table::new();
    table.set_titles(row!["Day", "Volume", "Fees", "Imp. Loss", "Return"]);
    for i in 0..stats.len() {
        table.add_row(row![
            stats.days[i],
            format!("{:.2}", stats.running_volume[i]),
            format!("{:.4}", stats.running_fees[i]),
            format!("{:.4}", stats.running_impermanent_loss[i]),
            format!("{:.4}", stats.running_return[i]),
        ]);
    }
    table.printstd();
}

pub fn print_market_stats(report: &MarketStatsReport, eth_price: Decimal) {
    println!("\n📊 Market Stats (ETH = ${:.2})", eth_price);

    let mut table = Table::new();
    table.set_titles(row![
        "#", "Market", "Liquidity", "Volume", "Fees", "IL", "Returns USD", "% Return", "Returns ETH"
    ]);
    for (rank, stats) in report.ranked_by_return().into_iter().enumerate() {
        table.add_row(row![
            rank + 1,
            stats.market,
            format!("{:.2}", stats.liquidity),
            format!("{:.2}", stats.volume),
            format!("{:.2}", stats.fees),
            percent(stats.impermanent_loss, 4),
            format!("{:.2}", stats.returns_usd),
            percent(stats.pct_return, 4),
            format!("{:.6}", stats.returns_eth),
        ]);
    }
    table.printstd();

    for skipped in &report.skipped {
        println!("⚠️  Skipped {} (#{}): {}", skipped.market, skipped.index, skipped.reason);
    }
}

pub fn print_position_size(pair: &Pair, entry_date: i64, size: &PositionSize) {
    println!("\n💧 Position size for {} at {}", pair.market(), entry_date);
    println!("{RULE}");
    println!("USD:        ${:.2}", size.usd);
    println!("{:<11} {:.6}", format!("{}:", pair.token0.symbol), size.token0);
    println!("{:<11} {:.6}", format!("{}:", pair.token1.symbol), size.token1);
    println!("Pool share: {}", percent(size.pool_share, 6));
    println!("{RULE}");
}
