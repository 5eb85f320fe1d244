// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings for the Heikin-Ashi / Bollinger / RSI strategy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeikinBollingerRsiSettings {
    /// Bollinger Bands period.
    #[serde(default = "default_volatility_period")]
    pub volatility_period: u32,
    /// Standard-deviation multiplier for the upper band.
    #[serde(default = "default_volatility_multiplier")]
    pub volatility_multiplier: f64,
    /// RSI period.
    #[serde(default = "default_oscillator_period")]
    pub oscillator_period: u32,
    /// RSI level above which entries are allowed and below which exits fire.
    #[serde(default = "default_oscillator_threshold")]
    pub oscillator_threshold: f64,
    /// When set, the entry rule's `open == close` test becomes `|close - open| <= tolerance`.
    #[serde(default)]
    pub doji_tolerance: Option<f64>,
    /// Tag attached to every order this strategy submits.
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for HeikinBollingerRsiSettings {
    fn default() -> Self {
        Self {
            volatility_period: default_volatility_period(),
            volatility_multiplier: default_volatility_multiplier(),
            oscillator_period: default_oscillator_period(),
            oscillator_threshold: default_oscillator_threshold(),
            doji_tolerance: None,
            label: default_label(),
        }
    }
}

impl HeikinBollingerRsiSettings {
    pub fn validate(&self) -> Result<()> {
        if self.volatility_period < 1 || self.oscillator_period < 1 {
            return Err(Error::InvalidSettings(
                "indicator periods must be greater than 0".to_string(),
            ));
        }
        if !(self.volatility_multiplier > 0.0) {
            return Err(Error::InvalidSettings(format!(
                "volatility multiplier must be positive, got {}",
                self.volatility_multiplier
            )));
        }
        if !(0.0..=100.0).contains(&self.oscillator_threshold) {
            return Err(Error::InvalidSettings(format!(
                "oscillator threshold must lie in 0..=100, got {}",
                self.oscillator_threshold
            )));
        }
        if let Some(tolerance) = self.doji_tolerance {
            if !(tolerance >= 0.0) {
                return Err(Error::InvalidSettings(format!(
                    "doji tolerance must be non-negative, got {tolerance}"
                )));
            }
        }
        if self.label.is_empty() {
            return Err(Error::InvalidSettings("order label must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_volatility_period() -> u32 {
    14
}

fn default_volatility_multiplier() -> f64 {
    2.0
}

fn default_oscillator_period() -> u32 {
    11
}

fn default_oscillator_threshold() -> f64 {
    60.0
}

fn default_label() -> String {
    "HeikinAshiBollingerRsiBot".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = HeikinBollingerRsiSettings::default();
        assert_eq!(s.volatility_period, 14);
        assert_eq!(s.oscillator_period, 11);
        assert_eq!(s.volatility_multiplier, 2.0);
        assert_eq!(s.oscillator_threshold, 60.0);
        assert!(s.doji_tolerance.is_none());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_zero_period_and_bad_threshold() {
        let zero = HeikinBollingerRsiSettings { volatility_period: 0, ..Default::default() };
        assert!(zero.validate().is_err());

        let threshold = HeikinBollingerRsiSettings { oscillator_threshold: 120.0, ..Default::default() };
        assert!(threshold.validate().is_err());

        let tolerance = HeikinBollingerRsiSettings { doji_tolerance: Some(-0.1), ..Default::default() };
        assert!(tolerance.validate().is_err());
    }
}
