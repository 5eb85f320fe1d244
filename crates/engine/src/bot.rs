// In crates/engine/src/bot.rs

use crate::tracker::{Decision, PositionTracker};
use crate::{Error, Result};
use core_types::{AccountSnapshot, IndicatorValues, Position, RawBar, Signal, SyntheticCandle};
use events::{SignalMarker, StrategyEvent, SubmissionFailure};
use execution::OrderGateway;
use risk::RiskManager;
use strategies::{CandleTransform, Strategy};
use tokio::sync::broadcast;

/// Everything that happened while processing one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarOutcome {
    pub candle: SyntheticCandle,
    pub signal: Signal,
    pub decision: Decision,
}

/// A single trading instance: one bar stream, one strategy, one position.
///
/// Each bar runs the full pipeline to completion before the next is accepted:
/// candle transform, signal evaluation, position gating, order submission.
pub struct Bot {
    /// A unique identifier for this bot instance (e.g., "EURUSD_h1_HeikinAshiBollingerRsi").
    pub id: String,
    transform: CandleTransform,
    strategy: Box<dyn Strategy + Send + Sync>,
    tracker: PositionTracker,
    risk_manager: Box<dyn RiskManager + Send + Sync>,
    events: Option<broadcast::Sender<StrategyEvent>>,
    /// Set after a bar error; holds the index the bot was waiting for.
    halted_at: Option<u64>,
}

impl Bot {
    /// Creates a new `Bot` instance.
    pub fn new(
        instrument: &str,
        label: &str,
        strategy: Box<dyn Strategy + Send + Sync>,
        risk_manager: Box<dyn RiskManager + Send + Sync>,
    ) -> Self {
        let id = format!("{}_{}", instrument, strategy.name());
        tracing::info!(id = %id, label, risk = risk_manager.name(), "Creating new bot instance.");

        Self {
            id,
            transform: CandleTransform::new(),
            strategy,
            tracker: PositionTracker::new(label),
            risk_manager,
            events: None,
            halted_at: None,
        }
    }

    /// Attaches a channel that receives signal, fill and failure events.
    pub fn with_events(mut self, tx: broadcast::Sender<StrategyEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn position(&self) -> &Position {
        self.tracker.position()
    }

    pub fn candles(&self) -> &CandleTransform {
        &self.transform
    }

    pub fn is_halted(&self) -> bool {
        self.halted_at.is_some()
    }

    /// Rebuilds the synthetic series by replaying `history` from index 0 and clears
    /// any halt. Used once at start-up and to resynchronise after a bar error.
    /// The open position is not touched.
    pub fn bootstrap(&mut self, history: &[RawBar]) -> Result<()> {
        self.transform = CandleTransform::bootstrap(history)?;
        self.halted_at = None;
        tracing::info!(
            id = %self.id,
            candles = self.transform.len(),
            "Synthetic series replayed from history."
        );
        Ok(())
    }

    /// This is the primary logic for a single bot instance, called once per new bar.
    ///
    /// # Errors
    ///
    /// * `Error::Bar` for an out-of-sequence or invalid bar; the bot then halts.
    /// * `Error::Halted` for any bar offered while halted.
    /// * `Error::Sizing` if the account state cannot size an entry.
    ///
    /// A gateway rejection is returned as `Decision::Rejected` inside `Ok`.
    pub async fn on_bar(
        &mut self,
        bar: &RawBar,
        indicators: Option<&IndicatorValues>,
        account: &AccountSnapshot,
        gateway: &mut (dyn OrderGateway + Send),
    ) -> Result<BarOutcome> {
        if let Some(expected) = self.halted_at {
            return Err(Error::Halted { expected });
        }

        // 1. Extend the synthetic series.
        let candle = match self.transform.extend(bar) {
            Ok(candle) => candle,
            Err(e) => {
                let expected = self.transform.next_index();
                self.halted_at = Some(expected);
                tracing::error!(id = %self.id, error = %e, "Bar rejected; halting until bootstrap.");
                self.emit(StrategyEvent::Halted {
                    bot_id: self.id.clone(),
                    expected,
                    got: bar.index,
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };

        // 2. Evaluate.
        let signal = self.strategy.evaluate(&candle, indicators);
        if signal != Signal::None {
            tracing::info!(id = %self.id, index = candle.index, ?signal, "Strategy generated a signal.");
            self.emit(StrategyEvent::Signal(SignalMarker {
                bot_id: self.id.clone(),
                index: candle.index,
                bar_time: bar.open_time_utc(),
                signal,
                price: match signal {
                    Signal::ExitLong => candle.high,
                    _ => candle.close,
                },
            }));
        }

        // 3. Gate against the position and submit.
        let decision = self
            .tracker
            .act(signal, self.risk_manager.as_ref(), account, gateway, bar.open_time)
            .await?;

        match &decision {
            Decision::Filled { execution, .. } => {
                self.emit(StrategyEvent::OrderExecuted(execution.clone()));
            }
            Decision::Rejected { order, error } => {
                self.emit(StrategyEvent::SubmissionFailed(SubmissionFailure {
                    bot_id: self.id.clone(),
                    index: candle.index,
                    order: order.clone(),
                    reason: error.to_string(),
                }));
            }
            Decision::Ignored => {}
        }

        Ok(BarOutcome {
            candle,
            signal,
            decision,
        })
    }

    fn emit(&self, event: StrategyEvent) {
        if let Some(tx) = &self.events {
            // No subscribers is fine.
            let _ = tx.send(event);
        }
    }
}
