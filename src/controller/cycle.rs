//! The spoof/real order cycle

use super::clock::Clock;
use super::config::SpoofConfig;
use super::error::ControllerError;
use super::state::{
    ControllerStats, CycleOutcome, CycleReport, CycleState, SkipReason, StopSignal,
};
use crate::exchange::{Exchange, ExchangeError};
use crate::orderbook::{OrderId, Side};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Drives repeated spoof cycles against an [`Exchange`].
///
/// One cycle: read the top of book, stack `layers` non-marketable orders on
/// the spoof side, wait `delay`, send one marketable order on the other
/// side, wait `hold` (counted from the end of `delay`), cancel the stack,
/// wait `pause`.
pub struct SpoofController {
    exchange: Arc<dyn Exchange>,
    clock: Arc<dyn Clock>,
    config: SpoofConfig,
    stop: StopSignal,
    state: CycleState,
    sequence: u64,
    /// Spoof orders placed and not yet confirmed cancelled
    outstanding: Vec<OrderId>,
    stats: ControllerStats,
}

impl SpoofController {
    /// Create a controller
    ///
    /// # Errors
    /// [`ControllerError::Config`] if `config` does not validate.
    pub fn new(
        exchange: Arc<dyn Exchange>,
        clock: Arc<dyn Clock>,
        config: SpoofConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        Ok(Self {
            exchange,
            clock,
            config,
            stop: StopSignal::new(),
            state: CycleState::Idle,
            sequence: 0,
            outstanding: Vec::new(),
            stats: ControllerStats::default(),
        })
    }

    /// Use an externally owned stop signal
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Handle that stops this controller at the next step boundary
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn stats(&self) -> &ControllerStats {
        &self.stats
    }

    pub fn config(&self) -> &SpoofConfig {
        &self.config
    }

    /// Number of the last cycle started
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Spoof orders placed and not yet cancelled
    pub fn outstanding_spoofs(&self) -> &[OrderId] {
        &self.outstanding
    }

    /// Run cycles until stopped or until `max_cycles` is reached, then cancel
    /// any outstanding spoof orders.
    ///
    /// # Errors
    /// Only a failure to connect to the exchange is returned; failures
    /// inside a cycle skip that cycle.
    pub fn run(&mut self) -> Result<ControllerStats, ControllerError> {
        self.exchange.connect()?;
        info!(
            "Spoof controller starting on {} ({}): layers={} layer_size={} offset={} policy={:?}",
            self.config.symbol,
            self.exchange.venue(),
            self.config.layers,
            self.config.layer_size,
            self.config.offset,
            self.config.side_policy
        );

        while !self.stop.is_stopped() && !self.reached_max_cycles() {
            match self.run_cycle() {
                CycleOutcome::Completed(report) => info!(
                    cycle = report.sequence,
                    "Cycle complete: {} spoofs on {} side, {} real trades, {} cancelled",
                    report.spoof_order_ids.len(),
                    report.spoof_side,
                    report.real_trades.len(),
                    report.cancelled
                ),
                CycleOutcome::Skipped { .. } => {}
                CycleOutcome::Stopped { .. } => break,
            }

            if self.stop.is_stopped() || self.reached_max_cycles() {
                break;
            }
            self.transition(CycleState::Pausing);
            self.clock.sleep(self.config.pause);
        }

        self.shutdown();
        info!(
            "Spoof controller stopped after {} cycles ({} completed, {} skipped)",
            self.sequence, self.stats.cycles_completed, self.stats.cycles_skipped
        );
        Ok(self.stats.clone())
    }

    /// Cancel any outstanding spoof orders and enter the terminal state
    pub fn shutdown(&mut self) {
        if !self.outstanding.is_empty() {
            let sequence = self.sequence;
            self.transition(CycleState::Cancelling);
            if let Err(err) = self.cancel_outstanding(sequence) {
                error!(
                    cycle = sequence,
                    "Failed to cancel {} spoof orders on shutdown: {}",
                    self.outstanding.len(),
                    err
                );
            }
        }
        self.transition(CycleState::Stopped);
    }

    /// Execute a single cycle, honouring a stop request between steps
    pub fn run_cycle(&mut self) -> CycleOutcome {
        self.sequence += 1;
        let sequence = self.sequence;
        let spoof_side = self.config.side_policy.side_for(sequence);
        let real_side = spoof_side.opposite();

        self.transition(CycleState::QuotingSpoofs);

        // Step 1: top of book
        let (best_bid, best_ask) = match self.top_of_book(sequence) {
            Ok(top) => top,
            Err(err) => return self.abort(sequence, err),
        };
        let (reference, opposite_top) = match spoof_side {
            Side::Buy => (best_bid, best_ask),
            Side::Sell => (best_ask, best_bid),
        };
        let Some(reference_price) = reference else {
            return self.skip(sequence, SkipReason::EmptyBook { side: spoof_side });
        };
        debug!(
            cycle = sequence,
            "Top of book: bid {:?} | ask {:?}", best_bid, best_ask
        );

        // Step 2: spoof layers
        let first_spoof = self.outstanding.len();
        let mut spoof_prices = Vec::with_capacity(self.config.layers as usize);
        let mut clamped_layers = 0;
        let mut crossing_spoofs = 0;

        for layer in 1..=self.config.layers {
            let Some((price, clamped)) =
                self.layer_price(sequence, spoof_side, reference_price, opposite_top, layer)
            else {
                continue;
            };
            if clamped {
                clamped_layers += 1;
            }

            let quantity = self.config.layer_size;
            let result = match self.with_retry(sequence, "submit", |exchange| {
                exchange.submit(spoof_side, price, quantity)
            }) {
                Ok(result) => result,
                Err(err) => return self.abort(sequence, err),
            };

            self.outstanding.push(result.order_id);
            self.stats.spoof_orders_placed += 1;
            spoof_prices.push(price);
            trace!(
                cycle = sequence,
                "Spoof layer {} placed: {} {} {}@{}",
                layer,
                result.order_id,
                spoof_side,
                quantity,
                price
            );

            if !result.trades.is_empty() {
                crossing_spoofs += 1;
                self.stats.crossing_spoofs += 1;
                error!(
                    cycle = sequence,
                    "Crossing spoof: {} {}@{} traded {} on entry",
                    result.order_id,
                    spoof_side,
                    price,
                    result.filled_quantity()
                );
            }
        }
        let spoof_order_ids = self.outstanding[first_spoof..].to_vec();

        if self.stop.is_stopped() {
            return self.stop_mid_cycle(sequence);
        }

        // Step 3: delay
        self.transition(CycleState::WaitingDelay);
        self.clock.sleep(self.config.delay);
        let hold_started = self.clock.elapsed();
        if self.stop.is_stopped() {
            return self.stop_mid_cycle(sequence);
        }

        // Step 4: genuine order, priced at the spoof-side top so it trades
        self.transition(CycleState::PlacingReal);
        let real_size = self.config.real_size;
        let real = match self.with_retry(sequence, "submit", |exchange| {
            exchange.submit(real_side, reference_price, real_size)
        }) {
            Ok(result) => result,
            Err(err) => return self.abort(sequence, err),
        };
        self.stats.real_orders_placed += 1;
        self.stats.real_trades += real.trades.len() as u64;
        if real.trades.is_empty() {
            debug!(
                cycle = sequence,
                "Genuine order {} {}@{} did not trade", real.order_id, real_side, reference_price
            );
        } else {
            debug!(
                cycle = sequence,
                "Genuine order {} {} filled {} of {}",
                real.order_id,
                real_side,
                real.filled_quantity(),
                real_size
            );
        }
        if self.stop.is_stopped() {
            return self.stop_mid_cycle(sequence);
        }

        // Step 5: hold, measured from the end of the delay; time spent
        // placing the genuine order counts against it
        self.transition(CycleState::Holding);
        let spent = self.clock.elapsed().saturating_sub(hold_started);
        let remaining = self.config.hold.saturating_sub(spent);
        if !remaining.is_zero() {
            self.clock.sleep(remaining);
        } else if !self.config.hold.is_zero() {
            debug!(
                cycle = sequence,
                "Hold of {:?} already spent placing the genuine order", self.config.hold
            );
        }

        // Step 6: cancel the stack; a stop requested while holding ends here too
        self.transition(CycleState::Cancelling);
        let cancelled = match self.cancel_outstanding(sequence) {
            Ok(cancelled) => cancelled,
            Err(err) => return self.abort(sequence, err),
        };

        if self.stop.is_stopped() {
            self.transition(CycleState::Stopped);
        }
        self.stats.cycles_completed += 1;

        CycleOutcome::Completed(CycleReport {
            sequence,
            spoof_side,
            reference_price,
            spoof_order_ids,
            spoof_prices,
            clamped_layers,
            crossing_spoofs,
            real_order_id: real.order_id,
            real_trades: real.trades,
            cancelled,
        })
    }

    fn reached_max_cycles(&self) -> bool {
        self.config
            .max_cycles
            .is_some_and(|max_cycles| self.sequence >= max_cycles)
    }

    fn transition(&mut self, next: CycleState) {
        if self.state != next {
            trace!(cycle = self.sequence, "State {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn top_of_book(
        &mut self,
        sequence: u64,
    ) -> Result<(Option<Decimal>, Option<Decimal>), ExchangeError> {
        let best_bid = self.with_retry(sequence, "best_bid", |exchange| exchange.best_bid())?;
        let best_ask = self.with_retry(sequence, "best_ask", |exchange| exchange.best_ask())?;
        Ok((best_bid, best_ask))
    }

    /// Price of spoof layer `layer` (1-based) and whether it was clamped.
    /// `None` when the level would not be a positive, representable price.
    fn layer_price(
        &mut self,
        sequence: u64,
        side: Side,
        reference: Decimal,
        opposite_top: Option<Decimal>,
        layer: u32,
    ) -> Option<(Decimal, bool)> {
        let tick = self.config.tick_size;
        let raw = self
            .config
            .offset
            .checked_mul(Decimal::from(layer))
            .and_then(|distance| match side {
                Side::Buy => reference.checked_sub(distance),
                Side::Sell => reference.checked_add(distance),
            });
        let Some(raw) = raw else {
            warn!(
                cycle = sequence,
                "Spoof layer {} skipped: {} x {} away from {} overflows",
                layer,
                self.config.offset,
                layer,
                reference
            );
            self.stats.skipped_layers += 1;
            return None;
        };

        // A spoof must rest: keep it one tick inside the opposite top
        let limit = match (side, opposite_top) {
            (Side::Buy, Some(best_ask)) if raw >= best_ask => Some(best_ask.checked_sub(tick)),
            (Side::Sell, Some(best_bid)) if raw <= best_bid => Some(best_bid.checked_add(tick)),
            _ => None,
        };
        let (price, clamped) = match limit {
            Some(Some(limit)) => {
                warn!(
                    cycle = sequence,
                    "Spoof layer {} at {} would cross {:?}; clamped to {}",
                    layer,
                    raw,
                    opposite_top,
                    limit
                );
                self.stats.clamped_layers += 1;
                (limit, true)
            }
            Some(None) => {
                warn!(
                    cycle = sequence,
                    "Spoof layer {} skipped: no price one tick inside {:?}", layer, opposite_top
                );
                self.stats.skipped_layers += 1;
                return None;
            }
            None => (raw, false),
        };

        if price <= Decimal::ZERO {
            warn!(
                cycle = sequence,
                "Spoof layer {} skipped: non-positive price {}", layer, price
            );
            self.stats.skipped_layers += 1;
            return None;
        }
        Some((price, clamped))
    }

    /// Call the exchange, retrying retryable failures with exponential backoff
    fn with_retry<T>(
        &mut self,
        sequence: u64,
        operation: &'static str,
        mut call: impl FnMut(&dyn Exchange) -> Result<T, ExchangeError>,
    ) -> Result<T, ExchangeError> {
        let mut backoff = self.config.retry_backoff;
        let mut attempt = 1;
        loop {
            match call(self.exchange.as_ref()) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.config.max_venue_attempts => {
                    warn!(
                        cycle = sequence,
                        "{} attempt {}/{} failed: {}; retrying in {:?}",
                        operation,
                        attempt,
                        self.config.max_venue_attempts,
                        err,
                        backoff
                    );
                    self.stats.venue_retries += 1;
                    self.clock.sleep(backoff);
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Cancel every outstanding spoof. On failure the ids stay outstanding
    /// so a later cycle or shutdown tries again.
    fn cancel_outstanding(&mut self, sequence: u64) -> Result<usize, ExchangeError> {
        if self.outstanding.is_empty() {
            return Ok(0);
        }
        let ids = self.outstanding.clone();
        let cancelled = self.with_retry(sequence, "cancel_all", |exchange| {
            exchange.cancel_all(&ids)
        })?;
        if cancelled < ids.len() {
            debug!(
                cycle = sequence,
                "{} of {} spoof orders were no longer open",
                ids.len() - cancelled,
                ids.len()
            );
        }
        self.outstanding.clear();
        self.stats.spoof_orders_cancelled += cancelled as u64;
        Ok(cancelled)
    }

    fn skip(&mut self, sequence: u64, reason: SkipReason) -> CycleOutcome {
        warn!(cycle = sequence, "Skipping cycle: {}", reason);
        self.stats.cycles_skipped += 1;
        CycleOutcome::Skipped { sequence, reason }
    }

    /// Skip after an exchange failure, withdrawing spoofs already placed
    fn abort(&mut self, sequence: u64, err: ExchangeError) -> CycleOutcome {
        if !self.outstanding.is_empty() {
            self.transition(CycleState::Cancelling);
            if let Err(cancel_err) = self.cancel_outstanding(sequence) {
                error!(
                    cycle = sequence,
                    "Could not withdraw {} spoof orders: {}",
                    self.outstanding.len(),
                    cancel_err
                );
            }
        }
        self.skip(sequence, SkipReason::Exchange(err))
    }

    fn stop_mid_cycle(&mut self, sequence: u64) -> CycleOutcome {
        info!(cycle = sequence, "Stop requested during {}", self.state);
        self.shutdown();
        CycleOutcome::Stopped { sequence }
    }
}
