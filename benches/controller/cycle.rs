use criterion::{BenchmarkId, Criterion};
use rust_decimal::Decimal;
use spoofbook_rs::controller::SystemClock;
use spoofbook_rs::{Exchange, OrderBook, Side, SpoofConfig, SpoofController};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

/// Register benchmarks for full spoof cycles with all waits set to zero
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Controller - Cycle");

    for layers in [1u32, 3, 10, 50].iter() {
        group.bench_with_input(
            BenchmarkId::new("run_cycle", layers),
            layers,
            |b, &layers| {
                let book = Arc::new(OrderBook::new("TEST-SYMBOL"));
                let _ = book.submit(Side::Buy, Decimal::from(10_000), Decimal::from(1_000_000));
                let _ = book.submit(Side::Sell, Decimal::from(10_001), Decimal::from(1_000_000));

                let exchange: Arc<dyn Exchange> = book;
                let config = SpoofConfig {
                    layers,
                    hold: Duration::ZERO,
                    delay: Duration::ZERO,
                    pause: Duration::ZERO,
                    ..SpoofConfig::default()
                };
                let Ok(mut controller) =
                    SpoofController::new(exchange, Arc::new(SystemClock::new()), config)
                else {
                    return;
                };

                b.iter(|| black_box(controller.run_cycle()));
            },
        );
    }

    group.finish();
}
