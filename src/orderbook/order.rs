//! Order, trade and side types shared by the book and its callers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Side of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Bid side
    Buy,
    /// Ask side
    Sell,
}

impl Side {
    /// The side an order of this side matches against
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Identifier of an order, issued by the book that accepted it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// The raw sequence number
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Resting in the book (possibly partially filled)
    Open,
    /// Fully matched
    Filled,
    /// Removed by a cancel request
    Cancelled,
}

impl OrderStatus {
    /// Whether the status is final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Open)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => write!(f, "open"),
            OrderStatus::Filled => write!(f, "filled"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A limit order as tracked by the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Book-issued identifier
    pub id: OrderId,
    /// Side of the order
    pub side: Side,
    /// Limit price
    pub price: Decimal,
    /// Quantity at submission
    pub quantity: Decimal,
    /// Quantity not yet matched
    pub remaining: Decimal,
    /// Current status
    pub status: OrderStatus,
    /// Creation time in milliseconds since epoch
    pub timestamp: u64,
}

impl Order {
    pub(crate) fn new(id: OrderId, side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            remaining: quantity,
            status: OrderStatus::Open,
            timestamp: crate::utils::current_time_millis(),
        }
    }

    /// Quantity matched so far
    pub fn filled_quantity(&self) -> Decimal {
        self.quantity - self.remaining
    }

    /// Whether the order is still resting
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// A single match between an incoming (taker) and a resting (maker) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique trade identifier
    pub trade_id: Uuid,
    /// Execution price, always the maker's price
    pub price: Decimal,
    /// Matched quantity
    pub quantity: Decimal,
    /// The buy order involved
    pub buy_order_id: OrderId,
    /// The sell order involved
    pub sell_order_id: OrderId,
    /// The resting order
    pub maker_order_id: OrderId,
    /// The incoming order
    pub taker_order_id: OrderId,
    /// Side of the incoming order
    pub taker_side: Side,
    /// Execution time in milliseconds since epoch
    pub timestamp: u64,
}

/// Outcome of a submit call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
    /// Id assigned to the submitted order, returned even when fully filled
    pub order_id: OrderId,
    /// Trades generated by the submission, in execution order
    pub trades: Vec<Trade>,
    /// Unmatched quantity left resting (zero if fully filled)
    pub remaining_quantity: Decimal,
}

impl SubmitResult {
    /// Total quantity matched by this submission
    pub fn filled_quantity(&self) -> Decimal {
        self.trades.iter().map(|trade| trade.quantity).sum()
    }

    /// Whether the order matched in full
    pub fn is_complete(&self) -> bool {
        self.remaining_quantity.is_zero()
    }
}
