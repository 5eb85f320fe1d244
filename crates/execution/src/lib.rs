// In crates/execution/src/lib.rs

use async_trait::async_trait;
use core_types::{Execution, OrderRequest};
use rust_decimal::Decimal;

pub mod error;
pub mod simulated;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use simulated::SimulatedGateway;
pub use types::{Portfolio, SimulationSettings};

/// The universal interface for an order gateway.
///
/// An `OrderGateway` takes an `OrderRequest` and submits it to a target, which could be
/// a live broker or a simulation. The call resolves only once the outcome is known;
/// callers rely on that to commit position state after, never before, a fill.
#[async_trait]
pub trait OrderGateway {
    /// The name of the gateway (e.g., "SimulatedGateway").
    fn name(&self) -> &'static str;

    /// Submits a market order.
    ///
    /// # Arguments
    ///
    /// * `order_request`: the order to execute.
    /// * `current_price`: the reference price for the fill.
    /// * `current_time`: the bar open time (ms) the order belongs to.
    ///
    /// # Returns
    ///
    /// The `Execution` on success, or `Error::ExecutionFailed` if the order was not filled.
    async fn submit(
        &mut self,
        order_request: &OrderRequest,
        current_price: Decimal,
        current_time: i64,
    ) -> Result<Execution>;
}
