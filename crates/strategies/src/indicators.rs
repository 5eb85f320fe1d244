// In crates/strategies/src/indicators.rs

use crate::types::HeikinBollingerRsiSettings;
use crate::{Error, Result};
use core_types::{IndicatorValues, RawBar};
use ta::Next;
use ta::indicators::{BollingerBands, RelativeStrengthIndex as Rsi};

/// An indicator engine that feeds the strategy from the raw close-price stream.
///
/// This sits outside the decision core: it produces the per-bar `IndicatorValues`
/// the bot consumes, and answers `None` until both indicators have seen a full period
/// of closes.
#[derive(Debug, Clone)]
pub struct TaIndicatorFeed {
    bbands: BollingerBands,
    rsi: Rsi,
    warmup: usize,
    seen: usize,
}

impl TaIndicatorFeed {
    pub fn new(settings: &HeikinBollingerRsiSettings) -> Result<Self> {
        let bband_period = settings.volatility_period as usize;
        let rsi_period = settings.oscillator_period as usize;

        let bbands = BollingerBands::new(bband_period, settings.volatility_multiplier)
            .map_err(|e| Error::Indicator(format!("bollinger bands: {e:?}")))?;
        let rsi = Rsi::new(rsi_period).map_err(|e| Error::Indicator(format!("rsi: {e:?}")))?;

        Ok(Self {
            bbands,
            rsi,
            // RSI needs one extra close to produce its first price change.
            warmup: bband_period.max(rsi_period + 1),
            seen: 0,
        })
    }

    /// Feeds the close of `bar` and returns the snapshot for the same bar.
    pub fn next(&mut self, bar: &RawBar) -> Option<IndicatorValues> {
        let bands = self.bbands.next(bar.close);
        let oscillator = self.rsi.next(bar.close);
        self.seen += 1;

        if self.seen < self.warmup {
            return None;
        }
        Some(IndicatorValues {
            upper_band: bands.upper,
            mean_band: bands.average,
            oscillator,
        })
    }

    pub fn is_warm(&self) -> bool {
        self.seen >= self.warmup
    }
}
