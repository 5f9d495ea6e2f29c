use super::{Exchange, ExchangeError};
use crate::orderbook::{OrderBook, OrderId, Side, SubmitResult};
use rust_decimal::Decimal;

impl Exchange for OrderBook {
    fn venue(&self) -> &str {
        "simulation"
    }

    fn best_bid(&self) -> Result<Option<Decimal>, ExchangeError> {
        Ok(OrderBook::best_bid(self))
    }

    fn best_ask(&self) -> Result<Option<Decimal>, ExchangeError> {
        Ok(OrderBook::best_ask(self))
    }

    fn submit(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<SubmitResult, ExchangeError> {
        Ok(OrderBook::submit(self, side, price, quantity)?)
    }

    fn cancel(&self, order_id: OrderId) -> Result<bool, ExchangeError> {
        Ok(OrderBook::cancel(self, order_id))
    }

    fn cancel_all(&self, order_ids: &[OrderId]) -> Result<usize, ExchangeError> {
        Ok(OrderBook::cancel_all(self, order_ids))
    }
}
