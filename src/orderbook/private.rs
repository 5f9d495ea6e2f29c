use super::book::BookState;
use super::order::{Order, OrderId, OrderStatus};
use tracing::trace;

impl BookState {
    /// Places an open order at the back of its price level and records its location.
    pub(super) fn rest(&mut self, order: Order) {
        let (id, side, price) = (order.id, order.side, order.price);
        self.side_mut(side).entry(price).or_default().push_back(order);
        self.locations.insert(id, (side, price));
    }

    /// Removes a resting order from its level. Empty levels are dropped.
    pub(super) fn unlink(&mut self, order_id: OrderId) -> Option<Order> {
        let (side, price) = self.locations.remove(&order_id)?;
        let levels = self.side_mut(side);
        let queue = levels.get_mut(&price)?;
        let position = queue.iter().position(|order| order.id == order_id)?;
        let order = queue.remove(position);
        if queue.is_empty() {
            levels.remove(&price);
        }
        order
    }

    /// Moves a terminal order into the bounded history.
    pub(super) fn retire(&mut self, order: Order) {
        debug_assert!(order.status.is_terminal());
        self.locations.remove(&order.id);
        if self.history_limit == 0 {
            return;
        }
        self.history_order.push_back(order.id);
        self.history.insert(order.id, order);
        while self.history_order.len() > self.history_limit {
            if let Some(evicted) = self.history_order.pop_front() {
                self.history.remove(&evicted);
            }
        }
    }

    /// Cancels a resting order. Returns false for unknown or terminal ids.
    pub(super) fn cancel(&mut self, order_id: OrderId) -> bool {
        match self.unlink(order_id) {
            Some(mut order) => {
                order.status = OrderStatus::Cancelled;
                trace!(
                    "Cancelled order {} {} {}@{}",
                    order.id, order.side, order.remaining, order.price
                );
                self.retire(order);
                true
            }
            None => false,
        }
    }
}
