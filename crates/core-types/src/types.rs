// In crates/core-types/src/types.rs

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A raw OHLC price bar as emitted by the market-data feed.
///
/// `index` is the ordinal position in the stream and starts at 0.
/// `open_time` is a unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub index: u64,
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl RawBar {
    /// Rejects bars whose prices cannot enter the candle recurrence.
    pub fn validate(&self) -> Result<()> {
        let fields = [self.open, self.high, self.low, self.close];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidBar {
                index: self.index,
                reason: "non-finite price".to_string(),
            });
        }
        if self.high < self.low {
            return Err(Error::InvalidBar {
                index: self.index,
                reason: format!("high {} is below low {}", self.high, self.low),
            });
        }
        Ok(())
    }

    pub fn open_time_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.open_time).single()
    }
}

/// A smoothed (Heikin-Ashi) candle derived from a raw bar and the previous synthetic candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticCandle {
    pub index: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl SyntheticCandle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Indicator values for one bar, supplied by an external indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    /// Upper volatility band.
    pub upper_band: f64,
    /// Volatility band mean (the moving average).
    pub mean_band: f64,
    /// Momentum oscillator, bounded to 0..=100.
    pub oscillator: f64,
}

impl IndicatorValues {
    /// Values that are NaN or infinite come from an indicator that has not warmed up.
    pub fn is_warm(&self) -> bool {
        self.upper_band.is_finite() && self.mean_band.is_finite() && self.oscillator.is_finite()
    }
}

/// The decision produced by a strategy for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    None,
    EnterLong,
    ExitLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Flat,
    Long,
}

/// The single position tracked by the strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub side: Side,
    /// Volume in units. Zero while flat.
    pub volume: Decimal,
    /// Open time (ms) of the bar that triggered the entry.
    pub entry_time: Option<i64>,
}

impl Position {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn long(volume: Decimal, entry_time: i64) -> Self {
        Self {
            side: Side::Long,
            volume,
            entry_time: Some(entry_time),
        }
    }

    pub fn is_long(&self) -> bool {
        self.side == Side::Long
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

/// A market order request handed to the order gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub direction: Direction,
    pub volume_in_units: Decimal,
    /// The strategy tag attached to the order.
    pub label: String,
    pub comment: String,
    pub originating_signal: Signal,
}

/// The result of a successfully submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub direction: Direction,
    pub price: Decimal,
    pub volume: Decimal,
    pub fee: Decimal,
    pub time: i64,
    pub source_request: OrderRequest,
}

/// Read-only account state needed for entry sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: Decimal,
    pub ask: Decimal,
}
