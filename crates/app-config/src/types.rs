// In crates/app-config/src/types.rs

use serde::Deserialize;

use execution::SimulationSettings;
use risk::RiskSettings;
use strategies::types::HeikinBollingerRsiSettings;

use crate::{Error, Result};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Indicator periods, thresholds and the order label.
    #[serde(default)]
    pub strategy: HeikinBollingerRsiSettings,
    /// Entry sizing.
    #[serde(default)]
    pub risk: RiskSettings,
    /// Paper account used by the replay command.
    #[serde(default)]
    pub simulation: SimulationSettings,
}

impl Settings {
    /// Checks every section; the first failure wins.
    pub fn validate(&self) -> Result<()> {
        self.strategy
            .validate()
            .map_err(|e| Error::Invalid(e.to_string()))?;
        let fraction = self.risk.sizing_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::Invalid(format!(
                "risk.sizing_fraction must lie in (0, 1], got {fraction}"
            )));
        }
        if !(self.simulation.initial_balance >= 0.0) {
            return Err(Error::Invalid(
                "simulation.initial_balance must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
