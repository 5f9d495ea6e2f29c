use criterion::{BenchmarkId, Criterion};
use rust_decimal::Decimal;
use spoofbook_rs::{OrderBook, Side};
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Register benchmarks where readers take snapshots while writers submit and cancel
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Contention Patterns");

    for read_ratio in [0, 25, 50, 75, 95].iter() {
        let thread_count = 8;

        group.bench_with_input(
            BenchmarkId::new("read_write_ratio", read_ratio),
            read_ratio,
            |b, &read_ratio| {
                b.iter_custom(|iters| {
                    measure_read_write_contention(thread_count, iters, read_ratio)
                });
            },
        );
    }

    group.finish();
}

/// Measures time for operations with different read/write ratios
/// read_ratio = percentage of read operations (0-100)
fn measure_read_write_contention(
    thread_count: usize,
    iterations: u64,
    read_ratio: u64,
) -> Duration {
    let order_book = Arc::new(OrderBook::new("TEST-SYMBOL"));
    let barrier = Arc::new(Barrier::new(thread_count + 1)); // +1 for main thread

    // Pre-populate with a two-sided book to read against
    for i in 0..250 {
        let _ = order_book.submit(Side::Buy, Decimal::from(1000 - i), Decimal::TEN);
        let _ = order_book.submit(Side::Sell, Decimal::from(1001 + i), Decimal::TEN);
    }

    let handles: Vec<_> = (0..thread_count)
        .map(|thread_id| {
            let order_book = Arc::clone(&order_book);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for i in 0..iterations {
                    if (i * 100 / iterations.max(1)) < read_ratio {
                        black_box(order_book.create_snapshot(5));
                    } else {
                        // Non-crossing order placed and pulled, like a spoof layer
                        let price = Decimal::from(900 + (thread_id as u64 + i) % 50);
                        if let Ok(result) = order_book.submit(Side::Buy, price, Decimal::ONE) {
                            black_box(order_book.cancel(result.order_id));
                        }
                    }
                }
            })
        })
        .collect();

    let start = Instant::now();
    barrier.wait();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}
