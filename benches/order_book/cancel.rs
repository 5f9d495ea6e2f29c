use criterion::{BatchSize, Criterion};
use rust_decimal::Decimal;
use spoofbook_rs::{OrderBook, OrderId, Side};
use std::hint::black_box;

fn populated_book() -> (OrderBook, Vec<OrderId>) {
    let order_book = OrderBook::new("TEST-SYMBOL");
    let ids = (0..100)
        .filter_map(|i| {
            order_book
                .submit(Side::Buy, Decimal::from(900 + i % 10), Decimal::ONE)
                .ok()
                .map(|result| result.order_id)
        })
        .collect();
    (order_book, ids)
}

/// Register benchmarks for cancelling orders one by one and in bulk
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Cancel");

    group.bench_function("cancel_one_by_one", |b| {
        b.iter_batched(
            populated_book,
            |(order_book, ids)| {
                for id in ids {
                    black_box(order_book.cancel(id));
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_all", |b| {
        b.iter_batched(
            populated_book,
            |(order_book, ids)| black_box(order_book.cancel_all(&ids)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}
