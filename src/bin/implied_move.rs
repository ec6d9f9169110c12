//! Options implied move CLI
//!
//! Calculates the options implied move of a stock symbol from its nearest
//! (or a chosen) option expiration.
//!
//! Usage:
//! ```text
//! implied-move SPY
//! implied-move SPY -e 2024-03-22 -f 15 -p
//! implied-move TEST --snapshot data/sample_chain.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use implied_move::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "implied-move",
    version,
    about = "Calculates the options implied move of a given stock symbol"
)]
struct Args {
    /// Symbol for which the options implied move will be calculated
    symbol: String,

    /// Expiration date (YYYY-MM-DD) of the option chain to use; defaults to the nearest
    #[arg(short, long)]
    expiration: Option<String>,

    /// Drop quotes traded more than this many minutes before the chain's latest trade
    #[arg(short, long, default_value_t = 30)]
    filter: i64,

    /// Print sampled call/put price and IV curves as CSV
    #[arg(short, long)]
    plot_data: bool,

    /// Strike step for --plot-data
    #[arg(long, default_value_t = 0.1)]
    plot_step: f64,

    /// Read the chain and spot price from a JSON snapshot instead of Yahoo Finance
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the full analysis as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = AnalysisConfig {
        freshness_minutes: args.filter,
        plot_step: args.plot_step,
    };
    let calc = ImpliedMoveCalculator::new(config)?;

    let source: Box<dyn ChainSource> = match &args.snapshot {
        Some(path) => Box::new(SnapshotFile::open(path)?),
        None => Box::new(YahooClient::new()?),
    };

    let catalog = source
        .option_chain(&args.symbol)
        .with_context(|| format!("fetching option chain for {}", args.symbol))?;
    let spot = source
        .spot_price(&args.symbol)
        .with_context(|| format!("fetching spot price for {}", args.symbol))?;

    let result = calc.compute(&catalog, spot, args.expiration.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_quote_table(&result.calls));
        print!("{}", render_quote_table(&result.puts));
        println!();
        print!("{}", render_summary(&result));
    }

    if args.plot_data {
        let plot = PlotData::from_result(&result, calc.config().plot_step);
        println!();
        print!("{}", plot.to_csv());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
