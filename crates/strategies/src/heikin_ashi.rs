// In crates/strategies/src/heikin_ashi.rs

use core_types::{Error, RawBar, Result, SyntheticCandle};

/// Maintains the append-only Heikin-Ashi series derived from the raw bar stream.
///
/// Each candle depends on the raw bar at the same index and on the previous synthetic
/// candle, so bars must be appended strictly in order starting from index 0. A stored
/// candle is never rewritten; the only way to rebuild the series is a full replay from
/// index 0 through [`CandleTransform::bootstrap`].
#[derive(Debug, Clone, Default)]
pub struct CandleTransform {
    history: Vec<SyntheticCandle>,
}

impl CandleTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays a full raw-bar history through [`extend`](Self::extend).
    ///
    /// The history must start at index 0. Historical and live bars go through the
    /// same recurrence.
    pub fn bootstrap(bars: &[RawBar]) -> Result<Self> {
        let mut transform = Self {
            history: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            transform.extend(bar)?;
        }
        tracing::debug!(candles = transform.history.len(), "Synthetic series bootstrapped.");
        Ok(transform)
    }

    /// Derives the synthetic candle for `bar` and appends it to the history.
    pub fn extend(&mut self, bar: &RawBar) -> Result<SyntheticCandle> {
        let expected = self.next_index();
        if bar.index != expected {
            return Err(Error::Sequence {
                expected,
                got: bar.index,
            });
        }
        bar.validate()?;

        let candle = match self.history.last() {
            None => seed_candle(bar),
            Some(prev) => next_candle(prev, bar),
        };
        self.history.push(candle);
        Ok(candle)
    }

    /// The index the next raw bar must carry.
    pub fn next_index(&self) -> u64 {
        self.history.len() as u64
    }

    pub fn get(&self, index: u64) -> Option<&SyntheticCandle> {
        usize::try_from(index).ok().and_then(|i| self.history.get(i))
    }

    pub fn last(&self) -> Option<&SyntheticCandle> {
        self.history.last()
    }

    pub fn history(&self) -> &[SyntheticCandle] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

fn raw_mean(bar: &RawBar) -> f64 {
    (bar.open + bar.close + bar.high + bar.low) / 4.0
}

// Index 0 has no previous candle; high and low are taken from the raw bar as-is.
fn seed_candle(bar: &RawBar) -> SyntheticCandle {
    SyntheticCandle {
        index: bar.index,
        open: (bar.open + bar.close) / 2.0,
        high: bar.high,
        low: bar.low,
        close: raw_mean(bar),
    }
}

fn next_candle(prev: &SyntheticCandle, bar: &RawBar) -> SyntheticCandle {
    let close = raw_mean(bar);
    let open = (prev.open + prev.close) / 2.0;
    SyntheticCandle {
        index: bar.index,
        open,
        high: bar.high.max(open.max(close)),
        low: bar.low.min(open.min(close)),
        close,
    }
}
