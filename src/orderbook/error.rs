//! Order book error types

use super::order::Side;
use rust_decimal::Decimal;
use std::fmt;

/// Errors that can occur within the OrderBook
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBookError {
    /// Price was zero or negative
    InvalidPrice {
        /// Side of the rejected order
        side: Side,
        /// The rejected price
        price: Decimal,
    },

    /// Quantity was zero or negative
    InvalidQuantity {
        /// Side of the rejected order
        side: Side,
        /// The rejected quantity
        quantity: Decimal,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice { side, price } => {
                write!(f, "Invalid price for {} order: {} (must be positive)", side, price)
            }
            OrderBookError::InvalidQuantity { side, quantity } => {
                write!(
                    f,
                    "Invalid quantity for {} order: {} (must be positive)",
                    side, quantity
                )
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
