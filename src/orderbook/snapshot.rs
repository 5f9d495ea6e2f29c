//! Order book snapshot for market data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Aggregated view of one price level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Level price
    pub price: Decimal,
    /// Sum of the remaining quantity of all orders at this price
    pub quantity: Decimal,
    /// Number of resting orders at this price
    pub order_count: usize,
}

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best (highest) first
    pub bids: Vec<LevelSnapshot>,

    /// Ask levels, best (lowest) first
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(Decimal, Decimal)> {
        let bid = self.bids.first().map(|level| (level.price, level.quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(Decimal, Decimal)> {
        let ask = self.asks.first().map(|level| (level.price, level.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(bid + (ask - bid) / Decimal::TWO),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => Some(ask - bid),
            _ => None,
        }
    }

    /// Total resting quantity on the bid side of the snapshot
    pub fn total_bid_quantity(&self) -> Decimal {
        self.bids
            .iter()
            .fold(Decimal::ZERO, |total, level| total.saturating_add(level.quantity))
    }

    /// Total resting quantity on the ask side of the snapshot
    pub fn total_ask_quantity(&self) -> Decimal {
        self.asks
            .iter()
            .fold(Decimal::ZERO, |total, level| total.saturating_add(level.quantity))
    }
}
