// --- Strategy event stream ---

use chrono::{DateTime, Utc};
use core_types::{Execution, OrderRequest, Signal};
use serde::Serialize;

/// A non-`None` signal and the bar it came from, emitted whether or not the
/// position tracker acted on it. This is what a chart front-end would draw as an
/// up/down arrow.
#[derive(Debug, Clone, Serialize)]
pub struct SignalMarker {
    pub bot_id: String,
    pub index: u64,
    pub bar_time: Option<DateTime<Utc>>,
    pub signal: Signal,
    /// Synthetic close for entries, synthetic high for exits.
    pub price: f64,
}

/// An order the gateway refused. The position state was left unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionFailure {
    pub bot_id: String,
    pub index: u64,
    pub order: OrderRequest,
    pub reason: String,
}

/// The top-level event enum.
/// `tag` and `content` are used by serde for clean JSON representation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum StrategyEvent {
    Signal(SignalMarker),
    OrderExecuted(Execution),
    SubmissionFailed(SubmissionFailure),
    /// The bot stopped accepting bars after an out-of-sequence or invalid bar.
    /// For an invalid bar `got` equals `expected`; `reason` says which case it was.
    Halted {
        bot_id: String,
        expected: u64,
        got: u64,
        reason: String,
    },
}
