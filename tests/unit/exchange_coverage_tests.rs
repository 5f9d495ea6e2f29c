//! The `Exchange` contract, exercised identically against every implementation.

#[cfg(test)]
mod exchange_coverage_tests {
    use rust_decimal_macros::dec;
    use spoofbook_rs::exchange::{PaperSettings, build_exchange};
    use spoofbook_rs::{Exchange, ExchangeError, ExchangeMode, OrderBookError, Side};
    use std::sync::Arc;

    fn venues() -> Vec<Arc<dyn Exchange>> {
        vec![
            build_exchange(ExchangeMode::Simulation, "TEST", PaperSettings::default()),
            build_exchange(ExchangeMode::Paper, "TEST", PaperSettings::default()),
        ]
    }

    #[test]
    fn test_invalid_orders_are_rejected_everywhere() {
        for exchange in venues() {
            exchange.connect().unwrap();
            let err = exchange.submit(Side::Buy, dec!(-1), dec!(1)).unwrap_err();
            assert_eq!(
                err,
                ExchangeError::Rejected(OrderBookError::InvalidPrice {
                    side: Side::Buy,
                    price: dec!(-1),
                }),
                "venue {}",
                exchange.venue()
            );
            assert!(!err.is_retryable());

            let err = exchange.submit(Side::Sell, dec!(1), dec!(0)).unwrap_err();
            assert!(matches!(
                err,
                ExchangeError::Rejected(OrderBookError::InvalidQuantity { .. })
            ));
        }
    }

    #[test]
    fn test_cancel_is_idempotent_everywhere() {
        for exchange in venues() {
            let id = exchange.submit(Side::Buy, dec!(1), dec!(1)).unwrap().order_id;
            assert!(exchange.cancel(id).unwrap(), "venue {}", exchange.venue());
            assert!(!exchange.cancel(id).unwrap());
            assert_eq!(exchange.cancel_all(&[id, id]).unwrap(), 0);
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        for exchange in venues() {
            let ids: Vec<_> = (0..20)
                .map(|_| exchange.submit(Side::Buy, dec!(1), dec!(1)).unwrap().order_id)
                .collect();
            assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(exchange.cancel_all(&ids).unwrap(), 20);
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("sim".parse::<ExchangeMode>(), Ok(ExchangeMode::Simulation));
        assert_eq!("LIVE".parse::<ExchangeMode>(), Ok(ExchangeMode::Paper));
        assert!("mainnet".parse::<ExchangeMode>().is_err());
        assert_eq!(ExchangeMode::default().to_string(), "simulation");
    }

    #[test]
    fn test_paper_quote_comes_from_settings() {
        let exchange = build_exchange(
            ExchangeMode::Paper,
            "TEST",
            PaperSettings {
                reference_bid: dec!(10),
                reference_ask: dec!(11),
                paper: true,
            },
        );
        assert_eq!(exchange.best_bid().unwrap(), Some(dec!(10)));
        assert_eq!(exchange.best_ask().unwrap(), Some(dec!(11)));

        // Crossing prices never trade on paper
        let result = exchange.submit(Side::Buy, dec!(20), dec!(1)).unwrap();
        assert!(result.trades.is_empty());
        assert_eq!(result.remaining_quantity, dec!(1));
    }
}
