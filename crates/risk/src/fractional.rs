// In crates/risk/src/fractional.rs

use crate::types::RiskSettings;
use crate::{Error, Result, RiskManager};
use core_types::AccountSnapshot;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sizes every entry as a fixed fraction of the account balance at the current ask:
/// `volume = balance * sizing_fraction / ask`.
#[derive(Debug, Clone)]
pub struct FractionalRiskManager {
    fraction: Decimal,
}

impl FractionalRiskManager {
    /// Creates a new `FractionalRiskManager`; the fraction must lie in (0, 1].
    pub fn new(settings: &RiskSettings) -> Result<Self> {
        let fraction = Decimal::from_f64(settings.sizing_fraction).ok_or_else(|| {
            Error::InvalidParameters(format!(
                "sizing fraction {} is not representable",
                settings.sizing_fraction
            ))
        })?;
        if fraction <= Decimal::ZERO || fraction > dec!(1) {
            return Err(Error::InvalidParameters(format!(
                "sizing fraction must lie in (0, 1], got {fraction}"
            )));
        }
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> Decimal {
        self.fraction
    }
}

impl RiskManager for FractionalRiskManager {
    fn name(&self) -> &'static str {
        "FractionalRiskManager"
    }

    fn entry_volume(&self, account: &AccountSnapshot) -> Result<Decimal> {
        if account.ask <= Decimal::ZERO {
            return Err(Error::InvalidParameters(format!(
                "ask price must be positive, got {}",
                account.ask
            )));
        }
        if account.balance < Decimal::ZERO {
            return Err(Error::InvalidParameters(format!(
                "account balance is negative: {}",
                account.balance
            )));
        }

        let volume = account
            .balance
            .checked_mul(self.fraction)
            .and_then(|budget| budget.checked_div(account.ask))
            .ok_or_else(|| {
                Error::InvalidParameters(format!(
                    "entry volume overflows for balance {} at ask {}",
                    account.balance, account.ask
                ))
            })?;
        if volume <= Decimal::ZERO {
            return Err(Error::InvalidParameters(
                "balance too small for a non-zero entry".to_string(),
            ));
        }
        tracing::debug!(%volume, balance = %account.balance, ask = %account.ask, "Sized entry.");
        Ok(volume)
    }
}
