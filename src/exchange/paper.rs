//! Pass-through venue stub that logs order traffic instead of sending it

use super::{Exchange, ExchangeError};
use crate::orderbook::{OrderBookError, OrderId, Side, SubmitResult};
use crate::utils::current_time_millis;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Settings for [`PaperExchange`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    /// Bid reported as top of book
    pub reference_bid: Decimal,
    /// Ask reported as top of book
    pub reference_ask: Decimal,
    /// Safety flag. While `true` nothing leaves the process; when `false`
    /// every call is refused because live routing is not implemented.
    pub paper: bool,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            reference_bid: Decimal::new(499_995, 1),
            reference_ask: Decimal::new(500_005, 1),
            paper: true,
        }
    }
}

/// An order request as it would be sent to a venue
#[derive(Debug, Serialize)]
struct OrderRequest<'a> {
    symbol: &'a str,
    client_order_id: OrderId,
    side: Side,
    price: Decimal,
    quantity: Decimal,
    timestamp: u64,
}

/// Logging stand-in for a live venue.
///
/// Submissions are acknowledged with locally issued ids and never trade.
/// Issued ids are tracked so cancels keep the idempotent contract.
pub struct PaperExchange {
    symbol: String,
    settings: PaperSettings,
    next_id: AtomicU64,
    working: DashMap<OrderId, Side>,
}

impl PaperExchange {
    /// Create a stub for `symbol`
    pub fn new(symbol: &str, settings: PaperSettings) -> Self {
        Self {
            symbol: symbol.to_string(),
            settings,
            next_id: AtomicU64::new(0),
            working: DashMap::new(),
        }
    }

    /// Number of acknowledged orders not yet cancelled
    pub fn working_order_count(&self) -> usize {
        self.working.len()
    }

    fn ensure_paper(&self, operation: &'static str) -> Result<(), ExchangeError> {
        if self.settings.paper {
            Ok(())
        } else {
            Err(ExchangeError::LiveRoutingUnavailable { operation })
        }
    }
}

impl Exchange for PaperExchange {
    fn venue(&self) -> &str {
        "paper"
    }

    fn connect(&self) -> Result<(), ExchangeError> {
        self.ensure_paper("connect")?;
        info!(
            "PaperExchange {} running in DRY-RUN mode - no real orders sent",
            self.symbol
        );
        Ok(())
    }

    fn best_bid(&self) -> Result<Option<Decimal>, ExchangeError> {
        self.ensure_paper("best_bid")?;
        Ok(Some(self.settings.reference_bid))
    }

    fn best_ask(&self) -> Result<Option<Decimal>, ExchangeError> {
        self.ensure_paper("best_ask")?;
        Ok(Some(self.settings.reference_ask))
    }

    fn submit(
        &self,
        side: Side,
        price: Decimal,
        quantity: Decimal,
    ) -> Result<SubmitResult, ExchangeError> {
        self.ensure_paper("submit")?;
        if price <= Decimal::ZERO {
            return Err(OrderBookError::InvalidPrice { side, price }.into());
        }
        if quantity <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity { side, quantity }.into());
        }

        let order_id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let request = OrderRequest {
            symbol: &self.symbol,
            client_order_id: order_id,
            side,
            price,
            quantity,
            timestamp: current_time_millis(),
        };
        match serde_json::to_string(&request) {
            Ok(payload) => debug!("[DRY-RUN] place {}", payload),
            Err(err) => warn!("[DRY-RUN] place {} (unserializable: {})", order_id, err),
        }
        self.working.insert(order_id, side);

        Ok(SubmitResult {
            order_id,
            trades: Vec::new(),
            remaining_quantity: quantity,
        })
    }

    fn cancel(&self, order_id: OrderId) -> Result<bool, ExchangeError> {
        self.ensure_paper("cancel")?;
        let cancelled = self.working.remove(&order_id).is_some();
        debug!("[DRY-RUN] cancel {} -> {}", order_id, cancelled);
        Ok(cancelled)
    }

    fn cancel_all(&self, order_ids: &[OrderId]) -> Result<usize, ExchangeError> {
        self.ensure_paper("cancel_all")?;
        let cancelled = order_ids
            .iter()
            .filter(|order_id| self.working.remove(*order_id).is_some())
            .count();
        debug!(
            "[DRY-RUN] cancel_all {} of {} orders",
            cancelled,
            order_ids.len()
        );
        Ok(cancelled)
    }
}
