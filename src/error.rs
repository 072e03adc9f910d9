//! Order book error types.

use crate::types::{OrderId, Side};
use std::fmt;

/// Errors that can occur within the `OrderBook`.
///
/// Every variant here is surfaced before any data structure is mutated and
/// before the logical clock is advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Quantity is missing, non-positive, or otherwise invalid.
    QuantityError(String),

    /// `side`/`type` is outside its enumerated set, a limit order lacks a
    /// price, or a market order carries one.
    OrderTypeError(String),

    /// A `modify`/`cancel`/`get` named an `(side, order_id)` pair that is
    /// not currently resting.
    OrderNotFoundError {
        /// The side that was searched.
        side: Side,
        /// The order id that was not found.
        order_id: OrderId,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::QuantityError(msg) => write!(f, "quantity error: {msg}"),
            OrderBookError::OrderTypeError(msg) => write!(f, "order type error: {msg}"),
            OrderBookError::OrderNotFoundError { side, order_id } => {
                write!(f, "order not found: {side} order {order_id}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
