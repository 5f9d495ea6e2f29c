//! Contains the core matching engine logic for the order book.

use super::book::BookState;
use super::order::{Order, OrderStatus, Side, Trade};
use crate::utils::current_time_millis;
use rust_decimal::Decimal;
use tracing::trace;

impl BookState {
    /// Matches `taker` against the opposite side in price-time priority.
    ///
    /// Consumes resting orders from the best opposite price while the taker's
    /// limit still crosses it. Each trade executes at the resting order's
    /// price. Fully consumed makers are marked filled and moved to history.
    /// The taker's `remaining` is reduced in place; resting it is left to the
    /// caller.
    pub(super) fn match_incoming(&mut self, taker: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();
        let mut filled_makers = Vec::new();
        let timestamp = current_time_millis();

        let BookState {
            bids,
            asks,
            trade_ids,
            ..
        } = &mut *self;
        let opposite = match taker.side {
            Side::Buy => asks,
            Side::Sell => bids,
        };

        while taker.remaining > Decimal::ZERO {
            // Best opposite price: lowest ask for a buy, highest bid for a sell
            let best = match taker.side {
                Side::Buy => opposite.keys().next().copied(),
                Side::Sell => opposite.keys().next_back().copied(),
            };
            let Some(level_price) = best else {
                break;
            };

            let crosses = match taker.side {
                Side::Buy => taker.price >= level_price,
                Side::Sell => taker.price <= level_price,
            };
            if !crosses {
                break;
            }

            let Some(queue) = opposite.get_mut(&level_price) else {
                break;
            };

            while taker.remaining > Decimal::ZERO {
                let Some(maker) = queue.front_mut() else {
                    break;
                };

                let quantity = taker.remaining.min(maker.remaining);
                let (buy_order_id, sell_order_id) = match taker.side {
                    Side::Buy => (taker.id, maker.id),
                    Side::Sell => (maker.id, taker.id),
                };

                trades.push(Trade {
                    trade_id: trade_ids.next_id(),
                    price: maker.price,
                    quantity,
                    buy_order_id,
                    sell_order_id,
                    maker_order_id: maker.id,
                    taker_order_id: taker.id,
                    taker_side: taker.side,
                    timestamp,
                });
                trace!(
                    "Matched {} {} against {} at {} for {}",
                    taker.side, taker.id, maker.id, maker.price, quantity
                );

                taker.remaining -= quantity;
                maker.remaining -= quantity;

                if maker.remaining.is_zero() {
                    if let Some(mut filled) = queue.pop_front() {
                        filled.status = OrderStatus::Filled;
                        filled_makers.push(filled);
                    }
                }
            }

            if queue.is_empty() {
                opposite.remove(&level_price);
            }
        }

        for maker in filled_makers {
            self.retire(maker);
        }

        if let Some(last) = trades.last() {
            self.last_trade_price = Some(last.price);
        }

        trades
    }
}
