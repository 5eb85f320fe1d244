// In app/src/main.rs

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

mod replay;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A Heikin-Ashi / Bollinger / RSI trading bot.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replays recorded bars through the strategy against a simulated account.
    Replay {
        /// CSV file with columns index,open_time,open,high,low,close.
        #[arg(short, long)]
        bars: PathBuf,

        /// Number of leading bars used only to warm up the candle series and indicators.
        #[arg(long, default_value_t = 0)]
        warmup: usize,

        /// Print every strategy event as a JSON line.
        #[arg(long)]
        events: bool,
    },

    /// Prints the effective configuration after all layers are merged.
    ShowConfig,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings()?;

    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!(environment = %settings.app.environment, "Starting application");

    match cli.command {
        Commands::Replay {
            bars,
            warmup,
            events,
        } => {
            let raw_bars = replay::load_bars(&bars)?;
            tracing::info!(count = raw_bars.len(), path = %bars.display(), "Loaded bars for replay.");
            let summary = replay::run_replay(&settings, &raw_bars, warmup, events).await?;
            replay::print_summary(&summary);
        }
        Commands::ShowConfig => {
            println!("{:#?}", settings);
        }
    }

    tracing::info!("Application has finished successfully.");

    Ok(())
}
