// demos/src/bin/basic_orderbook.rs

use rust_decimal_macros::dec;
use spoofbook_rs::{OrderBook, OrderId, Side, setup_logger};
use tracing::info;

fn main() {
    // Set up logging
    setup_logger();
    info!("Basic OrderBook Example");

    let book = OrderBook::new("BTC/USD");

    // Resting liquidity on both sides
    let resting = demo_adding_orders(&book);
    display_orderbook_state(&book);

    // Marketable orders
    demo_matching(&book);

    // Order lookup
    demo_order_lookup(&book, &resting);

    // Cancellation
    demo_cancel_orders(&book, &resting);

    info!("Final OrderBook State:");
    display_orderbook_state(&book);
}

fn demo_adding_orders(book: &OrderBook) -> Vec<OrderId> {
    info!("Adding resting orders...");
    let mut ids = Vec::new();

    for (price, quantity) in [(dec!(99.5), dec!(2)), (dec!(99.0), dec!(5)), (dec!(98.5), dec!(1))] {
        match book.submit(Side::Buy, price, quantity) {
            Ok(result) => {
                info!("Buy {} @ {} -> {}", quantity, price, result.order_id);
                ids.push(result.order_id);
            }
            Err(err) => info!("Buy rejected: {}", err),
        }
    }
    for (price, quantity) in [(dec!(100.5), dec!(3)), (dec!(101.0), dec!(4)), (dec!(101.5), dec!(6))] {
        match book.submit(Side::Sell, price, quantity) {
            Ok(result) => {
                info!("Sell {} @ {} -> {}", quantity, price, result.order_id);
                ids.push(result.order_id);
            }
            Err(err) => info!("Sell rejected: {}", err),
        }
    }

    // Invalid input is rejected, never clamped
    if let Err(err) = book.submit(Side::Buy, dec!(0), dec!(1)) {
        info!("Rejected as expected: {}", err);
    }
    ids
}

fn demo_matching(book: &OrderBook) {
    info!("Submitting a buy that sweeps two ask levels...");
    match book.submit(Side::Buy, dec!(101.0), dec!(5)) {
        Ok(result) => {
            for trade in &result.trades {
                info!(
                    "Trade {}: {} @ {} (maker {}, taker {})",
                    trade.trade_id,
                    trade.quantity,
                    trade.price,
                    trade.maker_order_id,
                    trade.taker_order_id
                );
            }
            info!(
                "Filled {}, remaining {}",
                result.filled_quantity(),
                result.remaining_quantity
            );
        }
        Err(err) => info!("Submit failed: {}", err),
    }
    info!("Last trade price: {:?}", book.last_trade_price());
}

fn demo_order_lookup(book: &OrderBook, ids: &[OrderId]) {
    info!("Looking up orders...");
    for id in ids {
        if let Some(order) = book.order(*id) {
            info!(
                "{} {} {}@{} remaining {} status {}",
                order.id, order.side, order.quantity, order.price, order.remaining, order.status
            );
        }
    }
    let at_level = book.orders_at_price(dec!(99.0), Side::Buy);
    info!("Orders at 99.0 (bid): {}", at_level.len());
}

fn demo_cancel_orders(book: &OrderBook, ids: &[OrderId]) {
    info!("Cancelling every resting order placed earlier...");
    let cancelled = book.cancel_all(ids);
    info!("Cancelled {} of {} (filled ones are a no-op)", cancelled, ids.len());

    if let Some(first) = ids.first() {
        info!("Cancel {} again -> {}", first, book.cancel(*first));
    }
}

fn display_orderbook_state(book: &OrderBook) {
    let snapshot = book.create_snapshot(5);
    info!("OrderBook {}:", snapshot.symbol);
    for level in snapshot.asks.iter().rev() {
        info!("  ASK {:>8} | {:>6} ({} orders)", level.price, level.quantity, level.order_count);
    }
    info!("  ---- spread {:?} | mid {:?}", book.spread(), book.mid_price());
    for level in &snapshot.bids {
        info!("  BID {:>8} | {:>6} ({} orders)", level.price, level.quantity, level.order_count);
    }
}
