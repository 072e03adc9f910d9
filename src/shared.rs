//! Single-writer/multi-reader guard around a whole [`OrderBook`].
//!
//! The book's own concurrency model is single-threaded cooperative: all
//! mutations (`submit`/`modify`/`cancel`) are serialized, and reads may run
//! concurrently with each other but never overlap a mutation. `OrderBook`
//! itself makes no concurrency claim at all — callers that need parallel
//! readers wrap it in `SharedOrderBook`.
//!
//! This is additive ambient plumbing; `OrderBook` on its own remains fully
//! usable by single-threaded callers and tests.

use crate::book::{OrderBook, Summary, SubmitResult};
use crate::error::OrderBookError;
use crate::order::OrderView;
use crate::trade::TradeRecord;
use crate::types::{OrderId, OrderKind, Side};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one `OrderBook`.
///
/// Every mutation (`submit`/`modify`/`cancel`) takes the write lock for its
/// whole call, so each is atomic from every caller's perspective — no other
/// mutation or read can observe a partially-applied match.
#[derive(Clone)]
pub struct SharedOrderBook {
    inner: Arc<RwLock<OrderBook>>,
}

impl SharedOrderBook {
    pub fn new(book: OrderBook) -> Self {
        Self {
            inner: Arc::new(RwLock::new(book)),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &self,
        side: Side,
        kind: OrderKind,
        quantity: &str,
        price: Option<&str>,
        trade_id: Option<String>,
        wage: Option<Value>,
    ) -> Result<SubmitResult, OrderBookError> {
        self.inner
            .write()
            .submit(side, kind, quantity, price, trade_id, wage)
    }

    pub fn modify(
        &self,
        side: Side,
        order_id: OrderId,
        new_quantity: Option<&str>,
        new_price: Option<&str>,
    ) -> Result<OrderView, OrderBookError> {
        self.inner.write().modify(side, order_id, new_quantity, new_price)
    }

    pub fn cancel(&self, side: Side, order_id: OrderId) -> Result<(), OrderBookError> {
        self.inner.write().cancel(side, order_id)
    }

    pub fn list(&self, side: Side) -> Vec<OrderView> {
        self.inner.read().list(side)
    }

    pub fn get(&self, side: Side, order_id: OrderId) -> Result<OrderView, OrderBookError> {
        self.inner.read().get(side, order_id)
    }

    pub fn summary(&self) -> Summary {
        self.inner.read().summary()
    }

    pub fn trade_log_tail(&self, n: usize) -> Vec<TradeRecord> {
        self.inner.read().trade_log_tail(n)
    }
}
