// In crates/engine/src/tracker.rs

use crate::Result;
use core_types::{AccountSnapshot, Direction, Execution, OrderRequest, Position, Side, Signal};
use execution::OrderGateway;
use risk::RiskManager;
use rust_decimal::Decimal;

/// What the tracker did with a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// No order: the signal was `None`, or not actionable in the current state.
    Ignored,
    /// The order was filled and the transition is committed.
    Filled {
        order: OrderRequest,
        execution: Execution,
    },
    /// The gateway refused the order; the position was restored to its prior value.
    Rejected {
        order: OrderRequest,
        error: execution::Error,
    },
}

/// Owns the single position of one strategy instance.
///
/// `Flat --EnterLong--> Long` sizes the entry through the risk manager and
/// `Long --ExitLong--> Flat` closes exactly the recorded volume. Every other
/// signal/state pair is ignored. No other component mutates the position.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    label: String,
    position: Position,
}

impl PositionTracker {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            position: Position::flat(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side(&self) -> Side {
        self.position.side
    }

    pub fn volume(&self) -> Decimal {
        self.position.volume
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Builds the order a signal calls for in the current state, if any.
    pub fn plan(
        &self,
        signal: Signal,
        risk_manager: &(dyn RiskManager + Sync),
        account: &AccountSnapshot,
    ) -> Result<Option<OrderRequest>> {
        let order = match (self.position.side, signal) {
            (Side::Flat, Signal::EnterLong) => Some(OrderRequest {
                direction: Direction::Buy,
                volume_in_units: risk_manager.entry_volume(account)?,
                label: self.label.clone(),
                comment: "Buy Signal".to_string(),
                originating_signal: signal,
            }),
            (Side::Long, Signal::ExitLong) => Some(OrderRequest {
                direction: Direction::Sell,
                volume_in_units: self.position.volume,
                label: self.label.clone(),
                comment: "Sell Signal".to_string(),
                originating_signal: signal,
            }),
            _ => None,
        };
        Ok(order)
    }

    /// Plans, submits and records the transition for one signal.
    ///
    /// The position only changes once the gateway has returned a fill. A failed or
    /// cancelled submission leaves it as it was.
    pub async fn act(
        &mut self,
        signal: Signal,
        risk_manager: &(dyn RiskManager + Sync),
        account: &AccountSnapshot,
        gateway: &mut (dyn OrderGateway + Send),
        bar_time: i64,
    ) -> Result<Decision> {
        let Some(order) = self.plan(signal, risk_manager, account)? else {
            if signal != Signal::None {
                tracing::debug!(?signal, side = ?self.position.side, "Signal not actionable in current state.");
            }
            return Ok(Decision::Ignored);
        };

        let next = transition(&order, bar_time);
        match gateway.submit(&order, account.ask, bar_time).await {
            Ok(execution) => {
                self.position = next;
                tracing::info!(
                    label = %self.label,
                    direction = ?order.direction,
                    volume = %order.volume_in_units,
                    side = ?self.position.side,
                    "Position transition committed."
                );
                Ok(Decision::Filled { order, execution })
            }
            Err(error) => {
                tracing::warn!(
                    label = %self.label,
                    error = %error,
                    side = ?self.position.side,
                    "Order submission failed; position unchanged."
                );
                Ok(Decision::Rejected { order, error })
            }
        }
    }
}

fn transition(order: &OrderRequest, bar_time: i64) -> Position {
    match order.direction {
        Direction::Buy => Position::long(order.volume_in_units, bar_time),
        Direction::Sell => Position::flat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use risk::{FractionalRiskManager, RiskSettings};
    use rust_decimal_macros::dec;

    /// Fills everything at the requested price, or fails everything.
    struct StubGateway {
        fail: bool,
        submitted: Vec<OrderRequest>,
    }

    impl StubGateway {
        fn new(fail: bool) -> Self {
            Self { fail, submitted: Vec::new() }
        }
    }

    #[async_trait]
    impl OrderGateway for StubGateway {
        fn name(&self) -> &'static str {
            "StubGateway"
        }

        async fn submit(
            &mut self,
            order_request: &OrderRequest,
            current_price: Decimal,
            current_time: i64,
        ) -> execution::Result<Execution> {
            self.submitted.push(order_request.clone());
            if self.fail {
                return Err(execution::Error::ExecutionFailed {
                    reason: "rejected".to_string(),
                });
            }
            Ok(Execution {
                direction: order_request.direction,
                price: current_price,
                volume: order_request.volume_in_units,
                fee: Decimal::ZERO,
                time: current_time,
                source_request: order_request.clone(),
            })
        }
    }

    /// Accepts the order and never answers.
    struct PendingGateway;

    #[async_trait]
    impl OrderGateway for PendingGateway {
        fn name(&self) -> &'static str {
            "PendingGateway"
        }

        async fn submit(
            &mut self,
            _order_request: &OrderRequest,
            _current_price: Decimal,
            _current_time: i64,
        ) -> execution::Result<Execution> {
            std::future::pending().await
        }
    }

    fn risk() -> FractionalRiskManager {
        FractionalRiskManager::new(&RiskSettings::default()).unwrap()
    }

    fn account() -> AccountSnapshot {
        AccountSnapshot { balance: dec!(1000), ask: dec!(125) }
    }

    #[tokio::test]
    async fn entry_then_exit_round_trip() {
        let mut tracker = PositionTracker::new("bot");
        let mut gateway = StubGateway::new(false);

        let entry = tracker.act(Signal::EnterLong, &risk(), &account(), &mut gateway, 7).await.unwrap();
        assert!(matches!(entry, Decision::Filled { .. }));
        assert_eq!(tracker.position(), &Position::long(dec!(4), 7));

        let exit = tracker.act(Signal::ExitLong, &risk(), &account(), &mut gateway, 8).await.unwrap();
        assert!(matches!(exit, Decision::Filled { .. }));
        assert_eq!(tracker.position(), &Position::flat());

        assert_eq!(gateway.submitted.len(), 2);
        assert_eq!(gateway.submitted[1].direction, Direction::Sell);
        assert_eq!(gateway.submitted[1].volume_in_units, dec!(4));
        assert_eq!(gateway.submitted[1].label, "bot");
    }

    #[tokio::test]
    async fn ignores_signals_that_do_not_match_state() {
        let mut tracker = PositionTracker::new("bot");
        let mut gateway = StubGateway::new(false);

        let d = tracker.act(Signal::ExitLong, &risk(), &account(), &mut gateway, 1).await.unwrap();
        assert_eq!(d, Decision::Ignored);

        tracker.act(Signal::EnterLong, &risk(), &account(), &mut gateway, 2).await.unwrap();
        let d = tracker.act(Signal::EnterLong, &risk(), &account(), &mut gateway, 3).await.unwrap();
        assert_eq!(d, Decision::Ignored);
        let d = tracker.act(Signal::None, &risk(), &account(), &mut gateway, 4).await.unwrap();
        assert_eq!(d, Decision::Ignored);

        assert_eq!(gateway.submitted.len(), 1);
        assert_eq!(tracker.position().entry_time, Some(2));
    }

    #[tokio::test]
    async fn rejected_entry_keeps_tracker_flat() {
        let mut tracker = PositionTracker::new("bot");
        let mut gateway = StubGateway::new(true);

        let d = tracker.act(Signal::EnterLong, &risk(), &account(), &mut gateway, 1).await.unwrap();
        assert!(matches!(d, Decision::Rejected { .. }));
        assert_eq!(tracker.position(), &Position::flat());
    }

    #[tokio::test]
    async fn rejected_exit_keeps_tracker_long() {
        let mut tracker = PositionTracker::new("bot");
        tracker
            .act(Signal::EnterLong, &risk(), &account(), &mut StubGateway::new(false), 1)
            .await
            .unwrap();
        let before = tracker.position().clone();

        let d = tracker
            .act(Signal::ExitLong, &risk(), &account(), &mut StubGateway::new(true), 2)
            .await
            .unwrap();
        assert!(matches!(d, Decision::Rejected { .. }));
        assert_eq!(tracker.position(), &before);
    }

    #[tokio::test]
    async fn sizing_failure_is_an_error_and_submits_nothing() {
        let mut tracker = PositionTracker::new("bot");
        let mut gateway = StubGateway::new(false);
        let bad_account = AccountSnapshot { balance: dec!(1000), ask: Decimal::ZERO };

        let result = tracker.act(Signal::EnterLong, &risk(), &bad_account, &mut gateway, 1).await;
        assert!(matches!(result, Err(crate::Error::Sizing(_))));
        assert!(gateway.submitted.is_empty());
        assert_eq!(tracker.side(), Side::Flat);
    }

    #[tokio::test]
    async fn abandoned_submission_leaves_position_unchanged() {
        let mut tracker = PositionTracker::new("bot");
        let mut gateway = PendingGateway;

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            tracker.act(Signal::EnterLong, &risk(), &account(), &mut gateway, 1),
        )
        .await;
        assert!(timed_out.is_err());
        assert_eq!(tracker.side(), Side::Flat);
        assert_eq!(tracker.position(), &Position::flat());

        // A long position survives an abandoned exit the same way.
        tracker
            .act(Signal::EnterLong, &risk(), &account(), &mut StubGateway::new(false), 2)
            .await
            .unwrap();
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            tracker.act(Signal::ExitLong, &risk(), &account(), &mut gateway, 3),
        )
        .await;
        assert!(timed_out.is_err());
        assert_eq!(tracker.position(), &Position::long(dec!(4), 2));
    }
}
