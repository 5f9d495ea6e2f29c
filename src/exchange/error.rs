//! Exchange error types

use crate::orderbook::OrderBookError;
use std::fmt;

/// Errors surfaced by an [`Exchange`](super::Exchange) implementation
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeError {
    /// The order was refused before reaching the book (bad price or size)
    Rejected(OrderBookError),

    /// Transient venue failure (timeout, transport error); safe to retry
    Venue {
        /// The operation that failed
        operation: &'static str,
        /// Description of the failure
        message: String,
    },

    /// The adapter was unlocked for live routing, which this crate never performs
    LiveRoutingUnavailable {
        /// The operation that was refused
        operation: &'static str,
    },
}

impl ExchangeError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExchangeError::Venue { .. })
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Rejected(err) => write!(f, "Order rejected: {}", err),
            ExchangeError::Venue { operation, message } => {
                write!(f, "Venue error during {}: {}", operation, message)
            }
            ExchangeError::LiveRoutingUnavailable { operation } => write!(
                f,
                "Live routing is not available ({}); enable paper mode",
                operation
            ),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OrderBookError> for ExchangeError {
    fn from(err: OrderBookError) -> Self {
        ExchangeError::Rejected(err)
    }
}
