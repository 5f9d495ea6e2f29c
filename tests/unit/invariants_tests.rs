//! Book invariants under a long seeded random order stream.

#[cfg(test)]
mod invariants_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use spoofbook_rs::orderbook::{OrderStatus, SubmitResult};
    use spoofbook_rs::{OrderBook, OrderId, Side};
    use std::collections::HashMap;

    fn assert_not_crossed(book: &OrderBook) {
        if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
            assert!(bid < ask, "crossed book: bid {} ask {}", bid, ask);
        }
    }

    fn assert_fifo_levels(book: &OrderBook) {
        for side in [Side::Buy, Side::Sell] {
            let orders = book.resting_orders(side);
            for pair in orders.windows(2) {
                if pair[0].price == pair[1].price {
                    assert!(pair[0].id < pair[1].id, "FIFO broken at {}", pair[0].price);
                }
            }
        }
    }

    #[test]
    fn test_random_stream_keeps_invariants() {
        let book = OrderBook::new("FUZZ");
        let mut rng = StdRng::seed_from_u64(42);
        let mut submitted: HashMap<OrderId, Decimal> = HashMap::new();
        let mut traded: HashMap<OrderId, Decimal> = HashMap::new();
        let mut live: Vec<OrderId> = Vec::new();

        for _ in 0..3_000 {
            if rng.gen_range(0..4) == 0 && !live.is_empty() {
                let index = rng.gen_range(0..live.len());
                let id = live.swap_remove(index);
                book.cancel(id);
            } else {
                let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
                // Prices 95.0 ..= 105.0 in half steps, quantities 1 ..= 5
                let price = dec!(95) + Decimal::from(rng.gen_range(0..=20u32)) * dec!(0.5);
                let quantity = Decimal::from(rng.gen_range(1..=5u32));

                let SubmitResult {
                    order_id,
                    trades,
                    remaining_quantity,
                } = book.submit(side, price, quantity).unwrap();
                submitted.insert(order_id, quantity);

                let filled: Decimal = trades.iter().map(|trade| trade.quantity).sum();
                assert_eq!(filled + remaining_quantity, quantity);
                for trade in &trades {
                    assert_eq!(trade.taker_order_id, order_id);
                    assert_eq!(trade.taker_side, side);
                    // Executes at the maker's price, never worse than the limit
                    match side {
                        Side::Buy => assert!(trade.price <= price),
                        Side::Sell => assert!(trade.price >= price),
                    }
                    *traded.entry(trade.maker_order_id).or_default() += trade.quantity;
                    *traded.entry(trade.taker_order_id).or_default() += trade.quantity;
                }
                if remaining_quantity > Decimal::ZERO {
                    live.push(order_id);
                }
            }

            assert_not_crossed(&book);
        }
        assert_fifo_levels(&book);

        // Conservation: every order's fills match the trades it took part in
        for (id, quantity) in &submitted {
            let order = book.order(*id).unwrap();
            let filled = traded.get(id).copied().unwrap_or_default();
            assert_eq!(order.filled_quantity(), filled, "order {}", id);
            assert_eq!(order.quantity, *quantity);
            assert_eq!(order.remaining + filled, *quantity);
            match order.status {
                OrderStatus::Open => assert!(order.remaining > Decimal::ZERO),
                OrderStatus::Filled => assert_eq!(order.remaining, Decimal::ZERO),
                OrderStatus::Cancelled => {}
            }
        }

        // Resting quantity in the snapshot equals the open orders' remainders
        let snapshot = book.create_snapshot(usize::MAX);
        let open_bids: Decimal = book
            .resting_orders(Side::Buy)
            .iter()
            .map(|order| order.remaining)
            .sum();
        assert_eq!(snapshot.total_bid_quantity(), open_bids);
    }
}
