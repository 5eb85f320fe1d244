// In crates/risk/src/lib.rs

use core_types::AccountSnapshot;
use rust_decimal::Decimal;

pub mod error;
pub mod fractional;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use fractional::FractionalRiskManager;
pub use types::RiskSettings;

/// The universal interface for entry sizing.
///
/// A `RiskManager` turns the current account state into the volume of a new entry
/// order. Exit orders always close the full recorded volume and never pass through here.
pub trait RiskManager {
    /// The name of the risk management strategy.
    fn name(&self) -> &'static str;

    /// Computes the entry volume, in units, for the given account state.
    ///
    /// # Returns
    ///
    /// * `Ok(volume)`: a strictly positive volume.
    /// * `Err(Error::InvalidParameters)`: if the account state cannot be sized
    ///   (non-positive ask, negative balance, or a volume that rounds to zero).
    fn entry_volume(&self, account: &AccountSnapshot) -> Result<Decimal>;
}
