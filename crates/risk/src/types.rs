// In crates/risk/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RiskSettings {
    /// Fraction of the account balance committed to a new entry (e.g., 0.5 for 50%).
    #[serde(default = "default_sizing_fraction")]
    pub sizing_fraction: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            sizing_fraction: default_sizing_fraction(),
        }
    }
}

fn default_sizing_fraction() -> f64 {
    0.5
}
