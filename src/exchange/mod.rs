//! Venue abstraction consumed by the spoofing cycle controller.
//!
//! Two implementations exist: the in-memory [`OrderBook`] and the
//! [`PaperExchange`] stub, which logs every call and never routes an order.
//! [`ExchangeMode`] selects between them.

mod error;
mod paper;
mod simulated;

pub use error::ExchangeError;
pub use paper::{PaperExchange, PaperSettings};

use crate::orderbook::{OrderBook, OrderId, Side, SubmitResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Order-entry capability with the contracts of the in-memory book.
///
/// Implementations must make each call atomic: an observer never sees a
/// partially applied submit or cancel.
pub trait Exchange: Send + Sync {
    /// Short name of the venue, used in logs
    fn venue(&self) -> &str;

    /// Prepare the venue for use
    fn connect(&self) -> Result<(), ExchangeError> {
        Ok(())
    }

    /// Best bid price, `None` when the bid side is empty
    fn best_bid(&self) -> Result<Option<Decimal>, ExchangeError>;

    /// Best ask price, `None` when the ask side is empty
    fn best_ask(&self) -> Result<Option<Decimal>, ExchangeError>;

    /// Submit a good-until-cancelled limit order
    fn submit(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<SubmitResult, ExchangeError>;

    /// Cancel one order; `Ok(false)` for unknown or terminal ids
    fn cancel(&self, order_id: OrderId) -> Result<bool, ExchangeError>;

    /// Cancel many orders; returns how many were actually cancelled
    fn cancel_all(&self, order_ids: &[OrderId]) -> Result<usize, ExchangeError>;
}

/// Which [`Exchange`] implementation to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeMode {
    /// In-memory matching engine
    #[default]
    #[serde(alias = "sim")]
    Simulation,
    /// Logging stub that never sends orders
    #[serde(alias = "live")]
    Paper,
}

impl fmt::Display for ExchangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeMode::Simulation => write!(f, "simulation"),
            ExchangeMode::Paper => write!(f, "paper"),
        }
    }
}

impl FromStr for ExchangeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "sim" | "simulation" => Ok(ExchangeMode::Simulation),
            "paper" | "live" => Ok(ExchangeMode::Paper),
            other => Err(format!("unknown exchange mode: {}", other)),
        }
    }
}

/// Build the exchange selected by `mode`.
///
/// The simulated venue starts as an empty book; seed it through
/// [`Exchange::submit`] before running cycles against it.
pub fn build_exchange(
    mode: ExchangeMode,
    symbol: &str,
    paper: PaperSettings,
) -> Arc<dyn Exchange> {
    match mode {
        ExchangeMode::Simulation => Arc::new(OrderBook::new(symbol)),
        ExchangeMode::Paper => Arc::new(PaperExchange::new(symbol, paper)),
    }
}
