// In crates/strategies/src/heikin_bollinger_rsi.rs

use crate::types::HeikinBollingerRsiSettings;
use crate::{Result, Strategy};
use core_types::{IndicatorValues, Signal, SyntheticCandle};

/// Heikin-Ashi breakout above the upper Bollinger band, confirmed by RSI.
///
/// Entry (all must hold):
/// 1. the synthetic candle is bullish (`close > open`),
/// 2. the body test: `open == close`, or `|close - open| <= doji_tolerance` when configured,
/// 3. `close > upper_band`,
/// 4. `oscillator > oscillator_threshold`.
///
/// Exit (both must hold): `low < mean_band` and `oscillator < oscillator_threshold`.
///
/// With exact equality (the default) conditions 1 and 2 contradict each other, so the
/// entry branch never fires. That behaviour is kept unless a tolerance is configured.
#[derive(Debug, Clone)]
pub struct HeikinBollingerRsi {
    settings: HeikinBollingerRsiSettings,
}

impl HeikinBollingerRsi {
    /// Creates a new `HeikinBollingerRsi` strategy instance from its settings.
    pub fn new(settings: HeikinBollingerRsiSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &HeikinBollingerRsiSettings {
        &self.settings
    }

    pub fn is_entry(&self, candle: &SyntheticCandle, indicators: &IndicatorValues) -> bool {
        let threshold = self.settings.oscillator_threshold;
        candle.close > candle.open
            && self.body_matches(candle)
            && candle.close > indicators.upper_band
            && indicators.oscillator > threshold
    }

    pub fn is_exit(&self, candle: &SyntheticCandle, indicators: &IndicatorValues) -> bool {
        candle.low < indicators.mean_band
            && indicators.oscillator < self.settings.oscillator_threshold
    }

    fn body_matches(&self, candle: &SyntheticCandle) -> bool {
        match self.settings.doji_tolerance {
            None => candle.open == candle.close,
            Some(tolerance) => (candle.close - candle.open).abs() <= tolerance,
        }
    }
}

impl Strategy for HeikinBollingerRsi {
    fn name(&self) -> &'static str {
        "HeikinAshiBollingerRsi"
    }

    fn evaluate(&self, candle: &SyntheticCandle, indicators: Option<&IndicatorValues>) -> Signal {
        let indicators = match indicators {
            Some(values) if values.is_warm() => values,
            _ => {
                tracing::debug!(index = candle.index, "Indicators not warmed up; no signal.");
                return Signal::None;
            }
        };

        // Entry needs the oscillator above the threshold and exit needs it below,
        // so at most one of the two can hold for a given bar.
        if self.is_entry(candle, indicators) {
            Signal::EnterLong
        } else if self.is_exit(candle, indicators) {
            Signal::ExitLong
        } else {
            Signal::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> SyntheticCandle {
        SyntheticCandle { index: 20, open, high, low, close }
    }

    fn indicators(upper_band: f64, mean_band: f64, oscillator: f64) -> IndicatorValues {
        IndicatorValues { upper_band, mean_band, oscillator }
    }

    fn literal() -> HeikinBollingerRsi {
        HeikinBollingerRsi::new(HeikinBollingerRsiSettings::default()).unwrap()
    }

    #[test]
    fn breakout_without_doji_body_yields_no_signal() {
        let strategy = literal();
        let c = candle(102.0, 106.0, 101.0, 105.0);
        let i = indicators(100.0, 95.0, 65.0);

        assert_eq!(strategy.evaluate(&c, Some(&i)), Signal::None);
    }

    #[test]
    fn literal_entry_rule_is_unreachable_for_equal_body() {
        // open == close satisfies the body test but fails the bullish test.
        let strategy = literal();
        let c = candle(105.0, 106.0, 104.0, 105.0);
        let i = indicators(100.0, 95.0, 65.0);

        assert!(!strategy.is_entry(&c, &i));
    }

    #[test]
    fn tolerance_band_enables_small_bullish_bodies() {
        let settings = HeikinBollingerRsiSettings {
            doji_tolerance: Some(0.5),
            ..Default::default()
        };
        let strategy = HeikinBollingerRsi::new(settings).unwrap();
        let i = indicators(100.0, 95.0, 65.0);

        assert_eq!(strategy.evaluate(&candle(104.75, 106.0, 104.0, 105.0), Some(&i)), Signal::EnterLong);
        assert_eq!(strategy.evaluate(&candle(102.0, 106.0, 101.0, 105.0), Some(&i)), Signal::None);
        // Oscillator exactly at the threshold does not pass the strict comparison.
        let at_threshold = indicators(100.0, 95.0, 60.0);
        assert_eq!(strategy.evaluate(&candle(104.75, 106.0, 104.0, 105.0), Some(&at_threshold)), Signal::None);
    }

    #[test]
    fn exit_when_low_breaks_mean_and_momentum_fades() {
        let strategy = literal();
        let c = candle(99.0, 100.0, 94.0, 97.0);

        assert_eq!(strategy.evaluate(&c, Some(&indicators(105.0, 95.0, 40.0))), Signal::ExitLong);
        assert_eq!(strategy.evaluate(&c, Some(&indicators(105.0, 95.0, 60.0))), Signal::None);
        assert_eq!(strategy.evaluate(&c, Some(&indicators(105.0, 93.0, 40.0))), Signal::None);
    }

    #[test]
    fn missing_or_cold_indicators_yield_no_signal() {
        let strategy = literal();
        let c = candle(99.0, 100.0, 94.0, 97.0);

        assert_eq!(strategy.evaluate(&c, None), Signal::None);
        assert_eq!(strategy.evaluate(&c, Some(&indicators(f64::NAN, 95.0, 40.0))), Signal::None);
    }

    #[test]
    fn custom_threshold_is_respected() {
        let settings = HeikinBollingerRsiSettings {
            oscillator_threshold: 30.0,
            ..Default::default()
        };
        let strategy = HeikinBollingerRsi::new(settings).unwrap();
        let c = candle(99.0, 100.0, 94.0, 97.0);

        assert_eq!(strategy.evaluate(&c, Some(&indicators(105.0, 95.0, 40.0))), Signal::None);
        assert_eq!(strategy.evaluate(&c, Some(&indicators(105.0, 95.0, 25.0))), Signal::ExitLong);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = HeikinBollingerRsiSettings {
            oscillator_period: 0,
            ..Default::default()
        };
        assert!(HeikinBollingerRsi::new(settings).is_err());
    }
}
