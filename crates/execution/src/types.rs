// In crates/execution/src/types.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Starting cash balance of the simulated account.
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,

    /// The taker fee applied to every market order (e.g., 0.0004 for 0.04%).
    #[serde(default)]
    pub taker_fee: f64,

    /// The simulated slippage percentage for market orders (e.g., 0.0005 for 0.05%).
    #[serde(default)]
    pub slippage_percent: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            taker_fee: 0.0,
            slippage_percent: 0.0,
        }
    }
}

fn default_initial_balance() -> f64 {
    10_000.0
}

/// The state of the simulated account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    /// The cash balance (quote currency).
    pub cash: Decimal,

    /// Units of the traded instrument currently held.
    pub units: Decimal,

    pub initial_cash: Decimal,
}

impl Portfolio {
    /// Creates a new portfolio with an initial cash balance.
    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            cash: initial_cash,
            units: Decimal::ZERO,
            initial_cash,
        }
    }

    /// Cash plus held units valued at `price`.
    pub fn equity(&self, price: Decimal) -> Decimal {
        self.cash + self.units * price
    }
}
