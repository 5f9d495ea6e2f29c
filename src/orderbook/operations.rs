//! Order book operations: submitting and cancelling orders

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderStatus, Side, SubmitResult};
use rust_decimal::Decimal;
use tracing::trace;

impl OrderBook {
    /// Submit a good-until-cancelled limit order.
    ///
    /// The order first matches against the opposite side; any unmatched
    /// remainder rests on its own side. The returned id is valid even when
    /// the order filled completely.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidPrice`] or
    /// [`OrderBookError::InvalidQuantity`] when either is not strictly
    /// positive. Nothing is clamped.
    pub fn submit(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<SubmitResult, OrderBookError> {
        if price <= Decimal::ZERO {
            return Err(OrderBookError::InvalidPrice { side, price });
        }
        if quantity <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity { side, quantity });
        }

        let mut state = self.state.lock();
        let order_id = state.order_ids.next_id();
        let mut order = Order::new(order_id, side, price, quantity);
        trace!(
            "Order book {}: Submitting {} {} {}@{}",
            self.symbol, order_id, side, quantity, price
        );

        let trades = state.match_incoming(&mut order);
        let remaining_quantity = order.remaining;

        if remaining_quantity > Decimal::ZERO {
            state.rest(order);
        } else {
            order.status = OrderStatus::Filled;
            state.retire(order);
        }

        Ok(SubmitResult {
            order_id,
            trades,
            remaining_quantity,
        })
    }

    /// Cancel a resting order.
    ///
    /// Returns `true` only if the order was open and is now cancelled.
    /// Unknown, filled and already-cancelled ids are a no-op returning `false`.
    pub fn cancel(&self, order_id: OrderId) -> bool {
        let cancelled = self.state.lock().cancel(order_id);
        trace!(
            "Order book {}: Cancel {} -> {}",
            self.symbol, order_id, cancelled
        );
        cancelled
    }

    /// Cancel every id in `order_ids` under a single lock, tolerating unknown
    /// and terminal ids. Returns how many orders were actually cancelled.
    pub fn cancel_all(&self, order_ids: &[OrderId]) -> usize {
        let mut state = self.state.lock();
        let cancelled = order_ids
            .iter()
            .filter(|order_id| state.cancel(**order_id))
            .count();
        trace!(
            "Order book {}: Cancelled {} of {} orders",
            self.symbol,
            cancelled,
            order_ids.len()
        );
        cancelled
    }
}
