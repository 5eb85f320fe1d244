// In crates/strategies/src/lib.rs

use core_types::{IndicatorValues, Signal, SyntheticCandle};

pub mod error;
pub mod heikin_ashi;
pub mod heikin_bollinger_rsi;
pub mod indicators;
pub mod types;

pub use error::{Error, Result};
pub use heikin_ashi::CandleTransform;
pub use heikin_bollinger_rsi::HeikinBollingerRsi;
pub use indicators::TaIndicatorFeed;

/// The universal interface for a signal evaluator.
///
/// An evaluator is a pure function of the latest synthetic candle and the indicator
/// snapshot for the same bar. It holds no position state; gating signals against the
/// open position is the position tracker's job.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Evaluates one bar. `indicators` is `None` while the indicator engine is warming up,
    /// in which case the evaluator must answer `Signal::None`.
    fn evaluate(&self, candle: &SyntheticCandle, indicators: Option<&IndicatorValues>) -> Signal;
}
