// In app/src/replay.rs

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use app_config::Settings;
use core_types::{AccountSnapshot, Position, RawBar, Signal};
use engine::{Bot, Decision};
use events::StrategyEvent;
use execution::SimulatedGateway;
use num_traits::FromPrimitive;
use risk::FractionalRiskManager;
use rust_decimal::Decimal;
use strategies::{HeikinBollingerRsi, TaIndicatorFeed};
use tokio::sync::broadcast;

/// Totals collected over a replay run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub bootstrapped: usize,
    pub processed: usize,
    pub entry_signals: usize,
    pub exit_signals: usize,
    pub fills: usize,
    pub rejections: usize,
    pub final_position: Position,
    pub cash: Decimal,
    pub equity: Decimal,
}

/// Reads raw bars from a CSV file with the header `index,open_time,open,high,low,close`.
pub fn load_bars(path: &Path) -> Result<Vec<RawBar>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open bar file {}", path.display()))?;
    parse_bars(file)
}

pub fn parse_bars<R: Read>(reader: R) -> Result<Vec<RawBar>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for (row, record) in rdr.deserialize().enumerate() {
        let bar: RawBar = record.with_context(|| format!("Malformed bar on row {}", row + 1))?;
        bars.push(bar);
    }
    Ok(bars)
}

/// Drives the full pipeline over recorded bars against the simulated gateway.
///
/// The first `warmup` bars seed the indicator feed and are replayed into the
/// synthetic series through `Bot::bootstrap`; the rest are processed as live bars.
pub async fn run_replay(
    settings: &Settings,
    bars: &[RawBar],
    warmup: usize,
    print_events: bool,
) -> Result<ReplaySummary> {
    let strategy = HeikinBollingerRsi::new(settings.strategy.clone())?;
    let risk_manager = FractionalRiskManager::new(&settings.risk)?;
    let mut feed = TaIndicatorFeed::new(&settings.strategy)?;
    let mut gateway = SimulatedGateway::new(&settings.simulation)?;

    let (tx, mut rx) = broadcast::channel::<StrategyEvent>(1024);
    let mut bot = Bot::new(
        "REPLAY",
        &settings.strategy.label,
        Box::new(strategy),
        Box::new(risk_manager),
    )
    .with_events(tx);

    let (history, live) = bars.split_at(warmup.min(bars.len()));
    for bar in history {
        feed.next(bar);
    }
    bot.bootstrap(history)?;

    let mut summary = ReplaySummary {
        bootstrapped: history.len(),
        processed: 0,
        entry_signals: 0,
        exit_signals: 0,
        fills: 0,
        rejections: 0,
        final_position: Position::flat(),
        cash: Decimal::ZERO,
        equity: Decimal::ZERO,
    };
    let mut last_price = Decimal::ZERO;

    for bar in live {
        let indicators = feed.next(bar);
        let ask = Decimal::from_f64(bar.close)
            .with_context(|| format!("Close price of bar {} is not representable", bar.index))?;
        let account = AccountSnapshot {
            balance: gateway.portfolio().cash,
            ask,
        };

        let outcome = bot.on_bar(bar, indicators.as_ref(), &account, &mut gateway).await?;
        summary.processed += 1;
        match outcome.signal {
            Signal::EnterLong => summary.entry_signals += 1,
            Signal::ExitLong => summary.exit_signals += 1,
            Signal::None => {}
        }
        match outcome.decision {
            Decision::Filled { .. } => summary.fills += 1,
            Decision::Rejected { .. } => summary.rejections += 1,
            Decision::Ignored => {}
        }
        last_price = ask;

        while let Ok(event) = rx.try_recv() {
            if print_events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    summary.final_position = bot.position().clone();
    summary.cash = gateway.portfolio().cash;
    summary.equity = gateway.portfolio().equity(last_price);
    tracing::info!(processed = summary.processed, fills = summary.fills, "Replay finished.");
    Ok(summary)
}

/// Helper function to print the replay summary in a readable format.
pub fn print_summary(summary: &ReplaySummary) {
    println!("\n--- Replay Summary ---");
    println!("----------------------");
    println!("Bootstrapped bars:     {}", summary.bootstrapped);
    println!("Processed bars:        {}", summary.processed);
    println!("Entry signals:         {}", summary.entry_signals);
    println!("Exit signals:          {}", summary.exit_signals);
    println!("Orders filled:         {}", summary.fills);
    println!("Orders rejected:       {}", summary.rejections);
    println!("----------------------");
    println!(
        "Final position:        {:?} {}",
        summary.final_position.side, summary.final_position.volume
    );
    println!("Cash:                  {:.2}", summary.cash);
    println!("Equity:                {:.2}", summary.equity);
    println!("----------------------");
}
