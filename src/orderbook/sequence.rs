//! Identifier generators owned by each book instance

use super::order::OrderId;
use uuid::Uuid;

/// Monotonic order id counter. Ids start at 1 and are never reused by the
/// same book.
#[derive(Debug, Default)]
pub(crate) struct OrderIdSequence {
    last: u64,
}

impl OrderIdSequence {
    pub(crate) fn next_id(&mut self) -> OrderId {
        self.last += 1;
        OrderId(self.last)
    }
}

/// Derives trade ids as UUID v5 values from a per-book namespace and a
/// running trade counter, so ids are unique across books and reproducible
/// within one.
#[derive(Debug)]
pub(crate) struct TradeIdGenerator {
    namespace: Uuid,
    counter: u64,
}

impl TradeIdGenerator {
    pub(crate) fn new(namespace: Uuid) -> Self {
        Self {
            namespace,
            counter: 0,
        }
    }

    pub(crate) fn next_id(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::new_v5(&self.namespace, &self.counter.to_be_bytes())
    }
}
