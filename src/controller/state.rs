//! Cycle state machine, stop signal and per-cycle reporting types

use crate::exchange::ExchangeError;
use crate::orderbook::{OrderId, Side, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Phase of the spoof cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Idle,
    QuotingSpoofs,
    WaitingDelay,
    PlacingReal,
    Holding,
    Cancelling,
    Pausing,
    /// Terminal: no spoof order is left outstanding
    Stopped,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleState::Idle => "idle",
            CycleState::QuotingSpoofs => "quoting_spoofs",
            CycleState::WaitingDelay => "waiting_delay",
            CycleState::PlacingReal => "placing_real",
            CycleState::Holding => "holding",
            CycleState::Cancelling => "cancelling",
            CycleState::Pausing => "pausing",
            CycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Cooperative stop flag shared between the controller and whoever stops it
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop; honoured at the next step boundary
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Why a cycle did not complete
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The side to spoof had no resting orders to anchor on
    EmptyBook { side: Side },
    /// A venue call failed after all retries, or was not retryable
    Exchange(ExchangeError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyBook { side } => write!(f, "{} side of the book is empty", side),
            SkipReason::Exchange(err) => write!(f, "{}", err),
        }
    }
}

/// Record of one completed cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Cycle number, starting at 1
    pub sequence: u64,
    /// Side the spoof layers were placed on
    pub spoof_side: Side,
    /// Top of book on the spoof side when the cycle started
    pub reference_price: Decimal,
    /// Ids of the spoof orders placed, nearest layer first
    pub spoof_order_ids: Vec<OrderId>,
    /// Prices of the spoof orders placed, nearest layer first
    pub spoof_prices: Vec<Decimal>,
    /// Layers whose price had to be pulled back from the opposite side
    pub clamped_layers: usize,
    /// Spoof orders that traded on entry
    pub crossing_spoofs: usize,
    /// Id of the genuine order
    pub real_order_id: OrderId,
    /// Trades generated by the genuine order
    pub real_trades: Vec<Trade>,
    /// Spoof orders actually cancelled at the end of the cycle
    pub cancelled: usize,
}

/// Result of [`SpoofController::run_cycle`](super::SpoofController::run_cycle)
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    Skipped { sequence: u64, reason: SkipReason },
    /// A stop was observed mid-cycle; outstanding spoofs were cancelled
    Stopped { sequence: u64 },
}

/// Running totals kept by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerStats {
    pub cycles_completed: u64,
    pub cycles_skipped: u64,
    pub spoof_orders_placed: u64,
    pub spoof_orders_cancelled: u64,
    pub clamped_layers: u64,
    pub skipped_layers: u64,
    pub crossing_spoofs: u64,
    pub real_orders_placed: u64,
    pub real_trades: u64,
    pub venue_retries: u64,
}
