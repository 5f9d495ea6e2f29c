//! # Spoofing Order-Flow Generator
//!
//! A small limit order book engine together with a controller that produces labelled
//! spoofing traffic against it. The output is meant for research on market manipulation
//! and for exercising surveillance and detection pipelines; nothing in this crate sends
//! an order to a real venue.
//!
//! ## Key Features
//!
//! - **Price-Time Priority Matching**: Good-until-cancelled limit orders match against the
//!   opposite side best price first and FIFO within a price level. Trades always execute at
//!   the resting (maker) order's price.
//!
//! - **Exact Decimal Prices**: Prices and quantities are `rust_decimal::Decimal`, so spoof
//!   ladders such as `100 - 3 * 0.5` land exactly on the intended level.
//!
//! - **Thread-Safe Book**: Every public operation takes `&self` and is atomic with respect
//!   to the others, so a book can be shared through an `Arc` between a controller and
//!   observers.
//!
//! - **Spoof Cycle Controller**: Each cycle layers non-marketable orders on one side of the
//!   book, sends one genuine marketable order on the other side, then withdraws the layers.
//!   Crossing layers are clamped, transient venue failures are retried with backoff, and a
//!   stop request always leaves no spoof order behind.
//!
//! - **Pluggable Venues**: The controller drives any [`exchange::Exchange`]. The in-memory
//!   [`OrderBook`] and a logging [`exchange::PaperExchange`] are provided.
//!
//! - **Virtual Time**: All waits go through [`controller::Clock`], so cycles can be tested
//!   without sleeping.
//!
//! ## Cycle Overview
//!
//! | Step | Action |
//! |------|--------|
//! | 1 | Read the top of book on the spoof side; skip the cycle if it is empty |
//! | 2 | Place `layers` orders of `layer_size`, `offset` apart, away from the top |
//! | 3 | Wait `delay` |
//! | 4 | Submit `real_size` on the opposite side at the spoof-side top |
//! | 5 | Wait out the rest of `hold`, counted from the end of step 3 |
//! | 6 | Cancel every spoof order of the cycle |
//! | 7 | Wait `pause` before the next cycle |
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use spoofbook_rs::controller::{CycleOutcome, ManualClock, SpoofConfig, SpoofController};
//! use spoofbook_rs::{OrderBook, Side};
//! use std::sync::Arc;
//!
//! let book = Arc::new(OrderBook::new("BTC/USDT"));
//! book.submit(Side::Buy, Decimal::new(100, 0), Decimal::new(10, 0)).unwrap();
//! book.submit(Side::Sell, Decimal::new(101, 0), Decimal::new(10, 0)).unwrap();
//!
//! let mut controller = SpoofController::new(
//!     book.clone(),
//!     Arc::new(ManualClock::new()),
//!     SpoofConfig::default(),
//! )
//! .unwrap();
//!
//! match controller.run_cycle() {
//!     CycleOutcome::Completed(report) => assert_eq!(report.cancelled, 3),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! assert_eq!(book.resting_order_count(), 2);
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing`. Binaries call [`setup_logger`], which reads the
//! `LOG_LEVEL` environment variable (`DEBUG`, `INFO`, `WARN`, `ERROR`, `TRACE`).
//!
//! ## Status
//! Research tooling. Live order routing is deliberately not implemented.

pub mod controller;
pub mod exchange;
pub mod orderbook;

mod utils;

pub use controller::{ControllerStats, RunConfig, SpoofConfig, SpoofController};
pub use exchange::{Exchange, ExchangeError, ExchangeMode};
pub use orderbook::{OrderBook, OrderBookError, OrderBookSnapshot, OrderId, Side, Trade};
pub use utils::{current_time_millis, setup_logger};
