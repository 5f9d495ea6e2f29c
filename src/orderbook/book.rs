//! Core OrderBook implementation for managing price levels and orders

use super::order::{Order, OrderId, OrderStatus, Side};
use super::sequence::{OrderIdSequence, TradeIdGenerator};
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use crate::utils::current_time_millis;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::trace;
use uuid::Uuid;

/// Default number of terminal orders kept for outcome lookups
pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// Orders resting at one price, in arrival order
pub(super) type PriceQueue = VecDeque<Order>;

/// Mutable state of a book. Every mutation happens while holding the book's
/// mutex, so a caller never observes a partially applied match.
pub(super) struct BookState {
    /// Bid levels keyed by price; the best bid is the last key
    pub(super) bids: BTreeMap<Decimal, PriceQueue>,

    /// Ask levels keyed by price; the best ask is the first key
    pub(super) asks: BTreeMap<Decimal, PriceQueue>,

    /// Resting order id to (side, price) for cancellation without a scan
    pub(super) locations: HashMap<OrderId, (Side, Decimal)>,

    /// Terminal orders kept so callers can confirm outcomes
    pub(super) history: HashMap<OrderId, Order>,

    /// Eviction order for `history`, oldest first
    pub(super) history_order: VecDeque<OrderId>,

    /// Maximum number of entries in `history`
    pub(super) history_limit: usize,

    pub(super) order_ids: OrderIdSequence,

    pub(super) trade_ids: TradeIdGenerator,

    /// The last price at which a trade occurred
    pub(super) last_trade_price: Option<Decimal>,
}

impl BookState {
    pub(super) fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    pub(super) fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    pub(super) fn side(&self, side: Side) -> &BTreeMap<Decimal, PriceQueue> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(super) fn side_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceQueue> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}

/// A single-instrument limit order book with price-time priority matching.
///
/// All operations take `&self`; the book can be shared behind an `Arc`
/// between the cycle controller and any observer.
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    pub(super) state: Mutex<BookState>,
}

impl OrderBook {
    /// Create a new order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self::with_history_limit(symbol, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new order book that remembers at most `history_limit`
    /// filled or cancelled orders
    pub fn with_history_limit(symbol: &str, history_limit: usize) -> Self {
        // Each book derives its trade ids from its own namespace
        let namespace = Uuid::new_v4();

        Self {
            symbol: symbol.to_string(),
            state: Mutex::new(BookState {
                bids: BTreeMap::new(),
                asks: BTreeMap::new(),
                locations: HashMap::new(),
                history: HashMap::new(),
                history_order: VecDeque::new(),
                history_limit,
                order_ids: OrderIdSequence::default(),
                trade_ids: TradeIdGenerator::new(namespace),
                last_trade_price: None,
            }),
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<Decimal> {
        self.state.lock().best_bid()
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<Decimal> {
        self.state.lock().best_ask()
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        let state = self.state.lock();
        match (state.best_bid(), state.best_ask()) {
            (Some(bid), Some(ask)) => Some(bid + (ask - bid) / Decimal::TWO),
            _ => None,
        }
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Decimal> {
        let state = self.state.lock();
        match (state.best_bid(), state.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Get the last trade price, if any
    pub fn last_trade_price(&self) -> Option<Decimal> {
        self.state.lock().last_trade_price
    }

    /// Whether an order at `price` on `side` would match immediately
    pub fn will_cross(&self, side: Side, price: Decimal) -> bool {
        let state = self.state.lock();
        match side {
            Side::Buy => state.best_ask().is_some_and(|best_ask| price >= best_ask),
            Side::Sell => state.best_bid().is_some_and(|best_bid| price <= best_bid),
        }
    }

    /// Number of orders currently resting on both sides
    pub fn resting_order_count(&self) -> usize {
        self.state.lock().locations.len()
    }

    /// Whether both sides are empty
    pub fn is_empty(&self) -> bool {
        self.resting_order_count() == 0
    }

    /// Get all resting orders at a specific price level, in priority order
    pub fn orders_at_price(&self, price: Decimal, side: Side) -> Vec<Order> {
        trace!(
            "Order book {}: Getting orders at price {} for side {}",
            self.symbol, price, side
        );
        let state = self.state.lock();
        state
            .side(side)
            .get(&price)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get all resting orders on one side, best price first
    pub fn resting_orders(&self, side: Side) -> Vec<Order> {
        let state = self.state.lock();
        let levels = state.side(side);
        match side {
            Side::Buy => levels.values().rev().flatten().cloned().collect(),
            Side::Sell => levels.values().flatten().cloned().collect(),
        }
    }

    /// Look up an order by id, whether resting or recently terminal
    pub fn order(&self, order_id: OrderId) -> Option<Order> {
        let state = self.state.lock();
        if let Some(&(side, price)) = state.locations.get(&order_id) {
            return state
                .side(side)
                .get(&price)
                .and_then(|queue| queue.iter().find(|order| order.id == order_id))
                .cloned();
        }
        state.history.get(&order_id).cloned()
    }

    /// Status of an order, if the book still knows about it
    pub fn order_status(&self, order_id: OrderId) -> Option<OrderStatus> {
        self.order(order_id).map(|order| order.status)
    }

    /// Create a snapshot of the top `depth` levels of each side
    pub fn create_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let state = self.state.lock();
        let level = |(price, queue): (&Decimal, &PriceQueue)| LevelSnapshot {
            price: *price,
            quantity: queue
                .iter()
                .fold(Decimal::ZERO, |total, order| total.saturating_add(order.remaining)),
            order_count: queue.len(),
        };

        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids: state.bids.iter().rev().take(depth).map(level).collect(),
            asks: state.asks.iter().take(depth).map(level).collect(),
        }
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OrderBook")
            .field("symbol", &self.symbol)
            .field("best_bid", &state.best_bid())
            .field("best_ask", &state.best_ask())
            .field("resting_orders", &state.locations.len())
            .finish()
    }
}
