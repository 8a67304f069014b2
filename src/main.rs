use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use invest_tracker_tui::{
    api::{MemoryStore, SampleQuotes},
    app::{App, Portfolio, chart::Period},
    models::InstrumentKind,
};

#[derive(Debug, Parser)]
#[command(about = "A terminal-based investment portfolio tracker")]
struct Args {
    /// Bucket to open with: stock, fund or forex
    #[arg(long, default_value = "stock")]
    bucket: String,

    /// Initial history window: 1D, 1W, 1M, 3M, 6M, YTD, 1Y or 2Y
    #[arg(long, default_value = "6M")]
    period: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let bucket = InstrumentKind::from_str(&args.bucket)?;
    let period = Period::from_str(&args.period)?;

    let store = Arc::new(MemoryStore::with_sample_data());
    let quotes = Arc::new(SampleQuotes::with_sample_data());

    let mut portfolio = Portfolio::new(store);
    portfolio.load().await?;

    let mut app = App::new(portfolio, quotes, bucket, period);
    app.run().await?;

    Ok(())
}
