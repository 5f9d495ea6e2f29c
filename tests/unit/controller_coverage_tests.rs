//! End-to-end runs of the spoof controller through the public API.

#[cfg(test)]
mod controller_coverage_tests {
    use rust_decimal_macros::dec;
    use spoofbook_rs::controller::{CycleState, ManualClock, SystemClock};
    use spoofbook_rs::exchange::build_exchange;
    use spoofbook_rs::{
        Exchange, ExchangeMode, OrderBook, RunConfig, Side, SpoofConfig, SpoofController,
    };
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn fast_config(max_cycles: u64) -> SpoofConfig {
        SpoofConfig {
            hold: Duration::ZERO,
            delay: Duration::ZERO,
            pause: Duration::ZERO,
            max_cycles: Some(max_cycles),
            ..SpoofConfig::default()
        }
    }

    #[test]
    fn test_observer_never_sees_a_crossed_book() {
        let book = Arc::new(OrderBook::new("BTC/USDT"));
        book.submit(Side::Buy, dec!(100), dec!(50)).unwrap();
        book.submit(Side::Sell, dec!(101), dec!(50)).unwrap();

        let observer = {
            let book = Arc::clone(&book);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let snapshot = book.create_snapshot(10);
                    if let (Some((bid, _)), Some((ask, _))) =
                        (snapshot.best_bid(), snapshot.best_ask())
                    {
                        assert!(bid < ask, "crossed book: {} >= {}", bid, ask);
                    }
                }
            })
        };

        let exchange: Arc<dyn Exchange> = book.clone();
        let mut controller =
            SpoofController::new(exchange, Arc::new(SystemClock::new()), fast_config(200))
                .unwrap();
        let stats = controller.run().unwrap();
        observer.join().unwrap();

        assert_eq!(stats.cycles_completed, 200);
        assert_eq!(stats.crossing_spoofs, 0);
        assert_eq!(stats.spoof_orders_placed, 600);
        assert_eq!(stats.spoof_orders_cancelled, 600);
        assert_eq!(book.resting_orders(Side::Buy).len(), 1);
        assert_eq!(book.orders_at_price(dec!(100), Side::Buy)[0].remaining, dec!(48));
    }

    #[test]
    fn test_stop_from_another_thread() {
        let book = Arc::new(OrderBook::new("BTC/USDT"));
        book.submit(Side::Buy, dec!(100), dec!(1_000_000)).unwrap();
        book.submit(Side::Sell, dec!(101), dec!(1_000_000)).unwrap();

        let exchange: Arc<dyn Exchange> = book.clone();
        let mut config = fast_config(1);
        config.max_cycles = None;
        config.pause = Duration::from_millis(1);
        let mut controller =
            SpoofController::new(exchange, Arc::new(SystemClock::new()), config).unwrap();
        let stop = controller.stop_signal();

        let runner = thread::spawn(move || {
            let stats = controller.run();
            (stats, controller.state(), controller.outstanding_spoofs().len())
        });
        thread::sleep(Duration::from_millis(50));
        stop.stop();
        let (stats, state, outstanding) = runner.join().unwrap();

        let stats = stats.unwrap();
        assert!(stats.cycles_completed >= 1);
        assert_eq!(state, CycleState::Stopped);
        assert_eq!(outstanding, 0);
        assert_eq!(stats.spoof_orders_cancelled, stats.spoof_orders_placed);
        assert_eq!(book.resting_orders(Side::Buy).len(), 1);
        assert_eq!(book.resting_orders(Side::Sell).len(), 1);
    }

    #[test]
    fn test_run_from_config_file_in_paper_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        std::fs::write(
            &path,
            "mode = \"paper\"\n\n[spoof]\nhold = 0\ndelay = 0\npause = 0\nmax_cycles = 4\n",
        )
        .unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.mode, ExchangeMode::Paper);

        let exchange = build_exchange(config.mode, &config.spoof.symbol, config.paper.clone());
        assert_eq!(exchange.venue(), "paper");
        let clock = Arc::new(ManualClock::new());
        let mut controller = SpoofController::new(exchange, clock.clone(), config.spoof).unwrap();
        let stats = controller.run().unwrap();

        assert_eq!(stats.cycles_completed, 4);
        assert_eq!(stats.real_orders_placed, 4);
        // Paper orders never trade
        assert_eq!(stats.real_trades, 0);
        assert_eq!(stats.spoof_orders_cancelled, 12);
    }

    #[test]
    fn test_empty_simulated_book_skips_every_cycle() {
        let exchange = build_exchange(
            ExchangeMode::Simulation,
            "BTC/USDT",
            Default::default(),
        );
        let mut controller =
            SpoofController::new(exchange, Arc::new(ManualClock::new()), fast_config(3)).unwrap();

        let stats = controller.run().unwrap();

        assert_eq!(stats.cycles_skipped, 3);
        assert_eq!(stats.cycles_completed, 0);
        assert_eq!(stats.spoof_orders_placed, 0);
        assert_eq!(controller.sequence(), 3);
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let book = Arc::new(OrderBook::new("BTC/USDT"));
        book.submit(Side::Buy, dec!(100), dec!(10)).unwrap();
        let exchange: Arc<dyn Exchange> = book;
        let mut controller =
            SpoofController::new(exchange, Arc::new(ManualClock::new()), fast_config(1)).unwrap();

        let stats = controller.run().unwrap();
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["cycles_completed"], 1);
        assert_eq!(json["spoof_orders_placed"], 3);
        assert_eq!(json["real_trades"], 1);
    }
}
