//! Command Line Interface for the LP statistics engine.
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lp_stats_analytics::prelude::*;
use lp_stats_data::providers::{FixedPriceProvider, JsonFileProvider};
use lp_stats_data::{MarketDataProvider, ReferencePriceProvider};
use lp_stats_domain::metrics::fee_ratio_from_bps;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use tracing::info;

mod render;

#[derive(Parser)]
#[command(name = "lp-stats")]
#[command(about = "Fee income, impermanent loss and returns for liquidity positions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Running and total statistics for one LP position
    Position {
        /// Market data fixture (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Pair id
        #[arg(short, long)]
        pair: String,

        /// Entry date (YYYY-MM-DD or Unix seconds)
        #[arg(short, long, value_parser = parse_date)]
        since: i64,

        /// USD contributed at entry
        #[arg(short, long)]
        contributed: Decimal,

        /// Series granularity (daily or hourly)
        #[arg(long, default_value = "daily")]
        period: Period,

        /// strftime pattern for period labels
        #[arg(long, default_value = DEFAULT_LABEL_FORMAT)]
        date_format: String,

        /// Fee tier in basis points
        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Aggregate statistics for every pair in a fixture
    Markets {
        /// Market data fixture (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Series granularity (daily or hourly)
        #[arg(long, default_value = "daily")]
        period: Period,

        /// ETH price in USD (falls back to ETH_PRICE_USD, then the fixture)
        #[arg(long)]
        eth_price: Option<Decimal>,

        /// Fee tier in basis points
        #[arg(long, default_value_t = 30)]
        fee_bps: u32,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Convert a contribution between USD and token amounts at entry
    Size {
        /// Market data fixture (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Pair id
        #[arg(short, long)]
        pair: String,

        /// Entry date (YYYY-MM-DD or Unix seconds)
        #[arg(short, long, value_parser = parse_date)]
        since: i64,

        /// Amount contributed
        #[arg(short, long)]
        amount: Decimal,

        /// Unit of the amount (usd, token0, token1)
        #[arg(long, default_value = "usd")]
        denomination: Denomination,
    },
}

fn parse_date(s: &str) -> Result<i64, String> {
    if let Ok(ts) = s.parse::<i64>() {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| format!("'{s}' is neither YYYY-MM-DD nor a Unix timestamp"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Position {
            data,
            pair,
            since,
            contributed,
            period,
            date_format,
            fee_bps,
            json,
        } => {
            let provider = JsonFileProvider::load(data).await?;
            let pair = provider.get_pair(pair).await?;

            let entry_date = effective_entry_date(&pair, *since);
            if entry_date != *since {
                info!(requested = since, entry_date, "entry date moved to pair creation");
            }

            let history = provider.get_history(&pair.id, i64::MIN, *period).await?;
            validate_series(&history)?;
            let Some(current) = history.last() else {
                println!("❌ No {} data for {}.", period, pair.market());
                return Ok(());
            };
            let series = series_from(&history, entry_date);

            let config = StatsConfig::default()
                .with_period(*period)
                .with_fee_ratio(fee_ratio_from_bps(*fee_bps))
                .with_label_format(date_format.clone());
            let stats = compute_lp_stats(current, series, *contributed, &config, &config.labeler())?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else if stats.is_empty() {
                println!("❌ No data for {} since {}.", pair.market(), entry_date);
            } else {
                let fee_yield = stats.fee_yield(*contributed, *period).ok().flatten();
                render::print_lp_stats(&pair, *contributed, &stats, fee_yield);
            }
        }
        Commands::Markets {
            data,
            period,
            eth_price,
            fee_bps,
            json,
        } => {
            let provider = JsonFileProvider::load(data).await?;
            let eth_price = resolve_eth_price(*eth_price, &provider).await?;

            let pairs = provider.get_pairs().await?;
            let mut history = Vec::with_capacity(pairs.len());
            for pair in &pairs {
                history.push(provider.get_history(&pair.id, i64::MIN, *period).await?);
            }
            info!(pairs = pairs.len(), %period, "computing market stats");

            let config = StatsConfig::default()
                .with_period(*period)
                .with_fee_ratio(fee_ratio_from_bps(*fee_bps));
            let report = compute_market_stats(&pairs, &history, eth_price, &config)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render::print_market_stats(&report, eth_price);
            }
        }
        Commands::Size {
            data,
            pair,
            since,
            amount,
            denomination,
        } => {
            let provider = JsonFileProvider::load(data).await?;
            let pair = provider.get_pair(pair).await?;
            let entry_date = effective_entry_date(&pair, *since);

            let history = provider
                .get_history(&pair.id, entry_date, Period::Daily)
                .await?;
            let Some(entry) = history.first() else {
                bail!("no daily data for {} since {}", pair.market(), entry_date);
            };

            let size = PositionSize::from_amount(entry, *denomination, *amount)?;
            render::print_position_size(&pair, entry.date, &size);
        }
    }

    Ok(())
}

/// Flag, then `ETH_PRICE_USD`, then the fixture's `ethPrice`.
async fn resolve_eth_price(flag: Option<Decimal>, fixture: &JsonFileProvider) -> Result<Decimal> {
    let from_env = env::var("ETH_PRICE_USD")
        .ok()
        .map(|raw| {
            raw.trim()
                .parse::<Decimal>()
                .with_context(|| format!("ETH_PRICE_USD is not a decimal: {raw}"))
        })
        .transpose()?;

    let price = match flag.or(from_env) {
        Some(price) => FixedPriceProvider::new(price).eth_price().await?,
        None => fixture
            .eth_price()
            .await
            .context("no ETH price: pass --eth-price, set ETH_PRICE_USD or add ethPrice to the data file")?,
    };
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1609459200"), Ok(1_609_459_200));
        assert_eq!(parse_date("2021-01-01"), Ok(1_609_459_200));
        assert!(parse_date("Jan 1").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "lp-stats",
            "position",
            "--data",
            "market.json",
            "--pair",
            "0xabc",
            "--since",
            "2021-01-01",
            "--contributed",
            "2000.50",
            "--period",
            "hourly",
        ])
        .unwrap();
        match cli.command {
            Commands::Position {
                since,
                contributed,
                period,
                fee_bps,
                ..
            } => {
                assert_eq!(since, 1_609_459_200);
                assert_eq!(contributed, Decimal::new(200050, 2));
                assert_eq!(period, Period::Hourly);
                assert_eq!(fee_bps, 30);
            }
            _ => panic!("expected position command"),
        }
    }
}
