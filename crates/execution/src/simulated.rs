// In crates/execution/src/simulated.rs

use crate::types::{Portfolio, SimulationSettings};
use crate::{Error, OrderGateway, Result};
use async_trait::async_trait;
use core_types::{Direction, Execution, OrderRequest};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A paper-trading gateway that fills market orders against a local cash account.
///
/// Buys spend cash (volume * price + fee) and add units; sells remove units and credit
/// the proceeds net of fees. Orders that the account cannot cover are rejected without
/// touching the portfolio.
#[derive(Debug)]
pub struct SimulatedGateway {
    slippage: Decimal,
    taker_fee: Decimal,
    portfolio: Portfolio,
}

impl SimulatedGateway {
    pub fn new(settings: &SimulationSettings) -> Result<Self> {
        let to_decimal = |value: f64, what: &str| {
            Decimal::from_f64(value).ok_or_else(|| Error::ExecutionFailed {
                reason: format!("invalid simulation {what}: {value}"),
            })
        };
        let initial = to_decimal(settings.initial_balance, "initial balance")?;
        Ok(Self {
            slippage: to_decimal(settings.slippage_percent, "slippage")?,
            taker_fee: to_decimal(settings.taker_fee, "taker fee")?,
            portfolio: Portfolio::new(initial),
        })
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Processes a buy: slippage makes the fill price higher.
    fn process_buy(
        &mut self,
        order: &OrderRequest,
        current_price: Decimal,
        current_time: i64,
    ) -> Result<Execution> {
        let price = checked(current_price.checked_mul(dec!(1) + self.slippage), order)?;
        let cost = checked(order.volume_in_units.checked_mul(price), order)?;
        let fee = checked(cost.checked_mul(self.taker_fee), order)?;
        let total = checked(cost.checked_add(fee), order)?;

        if self.portfolio.cash < total {
            return Err(Error::ExecutionFailed {
                reason: format!(
                    "insufficient cash: need {}, have {}",
                    total, self.portfolio.cash
                ),
            });
        }
        self.portfolio.cash -= total;
        self.portfolio.units += order.volume_in_units;

        Ok(Self::execution(order, price, fee, current_time))
    }

    /// Processes a sell: slippage makes the fill price lower.
    fn process_sell(
        &mut self,
        order: &OrderRequest,
        current_price: Decimal,
        current_time: i64,
    ) -> Result<Execution> {
        if self.portfolio.units < order.volume_in_units {
            return Err(Error::ExecutionFailed {
                reason: format!(
                    "cannot sell {} units, only {} held",
                    order.volume_in_units, self.portfolio.units
                ),
            });
        }
        let price = checked(current_price.checked_mul(dec!(1) - self.slippage), order)?;
        let proceeds = checked(order.volume_in_units.checked_mul(price), order)?;
        let fee = checked(proceeds.checked_mul(self.taker_fee), order)?;
        let net = checked(
            proceeds
                .checked_sub(fee)
                .and_then(|net| self.portfolio.cash.checked_add(net)),
            order,
        )?;

        self.portfolio.cash = net;
        self.portfolio.units -= order.volume_in_units;

        Ok(Self::execution(order, price, fee, current_time))
    }

    fn execution(order: &OrderRequest, price: Decimal, fee: Decimal, time: i64) -> Execution {
        Execution {
            direction: order.direction,
            price,
            volume: order.volume_in_units,
            fee,
            time,
            source_request: order.clone(),
        }
    }
}

fn checked(value: Option<Decimal>, order: &OrderRequest) -> Result<Decimal> {
    value.ok_or_else(|| Error::ExecutionFailed {
        reason: format!(
            "arithmetic overflow filling {:?} of {}",
            order.direction, order.volume_in_units
        ),
    })
}

#[async_trait]
impl OrderGateway for SimulatedGateway {
    fn name(&self) -> &'static str {
        "SimulatedGateway"
    }

    async fn submit(
        &mut self,
        order_request: &OrderRequest,
        current_price: Decimal,
        current_time: i64,
    ) -> Result<Execution> {
        if order_request.volume_in_units <= Decimal::ZERO {
            return Err(Error::ExecutionFailed {
                reason: format!("non-positive volume {}", order_request.volume_in_units),
            });
        }

        let result = match order_request.direction {
            Direction::Buy => self.process_buy(order_request, current_price, current_time),
            Direction::Sell => self.process_sell(order_request, current_price, current_time),
        };
        match &result {
            Ok(execution) => tracing::info!(?execution, "Simulated order filled."),
            Err(e) => tracing::warn!(error = %e, label = %order_request.label, "Simulated order rejected."),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Signal;

    fn order(direction: Direction, volume: Decimal) -> OrderRequest {
        OrderRequest {
            direction,
            volume_in_units: volume,
            label: "test".to_string(),
            comment: String::new(),
            originating_signal: Signal::None,
        }
    }

    fn gateway(taker_fee: f64, slippage_percent: f64) -> SimulatedGateway {
        SimulatedGateway::new(&SimulationSettings {
            initial_balance: 1000.0,
            taker_fee,
            slippage_percent,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn round_trip_without_costs_restores_cash() {
        let mut gw = gateway(0.0, 0.0);

        let buy = gw.submit(&order(Direction::Buy, dec!(5)), dec!(100), 1).await.unwrap();
        assert_eq!(buy.price, dec!(100));
        assert_eq!(gw.portfolio().cash, dec!(500));
        assert_eq!(gw.portfolio().units, dec!(5));

        gw.submit(&order(Direction::Sell, dec!(5)), dec!(100), 2).await.unwrap();
        assert_eq!(gw.portfolio().cash, dec!(1000));
        assert_eq!(gw.portfolio().units, Decimal::ZERO);
    }

    #[tokio::test]
    async fn fees_and_slippage_are_charged() {
        let mut gw = gateway(0.01, 0.01);

        let buy = gw.submit(&order(Direction::Buy, dec!(1)), dec!(100), 1).await.unwrap();
        assert_eq!(buy.price, dec!(101));
        assert_eq!(buy.fee, dec!(1.01));
        assert_eq!(gw.portfolio().cash, dec!(1000) - dec!(101) - dec!(1.01));
    }

    #[tokio::test]
    async fn rejects_orders_the_account_cannot_cover() {
        let mut gw = gateway(0.0, 0.0);

        let err = gw.submit(&order(Direction::Buy, dec!(20)), dec!(100), 1).await.unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert!(gw.submit(&order(Direction::Sell, dec!(1)), dec!(100), 1).await.is_err());
        assert!(gw.submit(&order(Direction::Buy, dec!(0)), dec!(100), 1).await.is_err());
        assert_eq!(gw.portfolio(), &Portfolio::new(dec!(1000)));
    }

    #[tokio::test]
    async fn overflowing_fill_is_rejected() {
        let mut gw = gateway(0.0, 0.0);

        let err = gw
            .submit(&order(Direction::Buy, Decimal::MAX), dec!(100), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ExecutionFailed { .. }));
        assert_eq!(gw.portfolio(), &Portfolio::new(dec!(1000)));
    }
}
