//! OrderBook implementation for managing price levels and order matching.

pub mod book;
mod error;
mod matching;
mod operations;
mod order;
mod private;
mod sequence;
mod snapshot;

pub use book::{DEFAULT_HISTORY_LIMIT, OrderBook};
pub use error::OrderBookError;
pub use order::{Order, OrderId, OrderStatus, Side, SubmitResult, Trade};
pub use snapshot::{LevelSnapshot, OrderBookSnapshot};
