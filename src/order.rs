//! A single resting order and its read-only view.

use crate::decimal::{Price, Quantity};
use crate::types::{OrderId, Side};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single order record; the node of a per-price queue.
///
/// `(side, order_id)` uniquely identifies an `Order` within the book for its
/// entire resting lifetime. The id never changes; `quantity`, `price`,
/// `timestamp` and the arena linkage fields are the only mutable parts, and
/// only the containing [`crate::order_list::OrderList`]/
/// [`crate::order_tree::OrderTree`] are allowed to touch them.
#[derive(Debug, Clone)]
pub struct Order {
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub order_id: OrderId,
    pub timestamp: u64,
    pub trade_id: Option<String>,
    pub wage: Option<Value>,
}

impl Order {
    pub fn new(
        side: Side,
        price: Price,
        quantity: Quantity,
        order_id: OrderId,
        timestamp: u64,
        trade_id: Option<String>,
        wage: Option<Value>,
    ) -> Self {
        Self {
            side,
            price,
            quantity,
            order_id,
            timestamp,
            trade_id,
            wage,
        }
    }

    pub fn view(&self) -> OrderView {
        OrderView {
            order_id: self.order_id,
            side: self.side,
            quantity: self.quantity,
            price: self.price,
            timestamp: self.timestamp,
            trade_id: self.trade_id.clone(),
            wage: self.wage.clone(),
        }
    }
}

/// Read-only snapshot of an `Order`, returned from `modify`, `get`, and
/// `list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
    pub timestamp: u64,
    pub trade_id: Option<String>,
    pub wage: Option<Value>,
}
