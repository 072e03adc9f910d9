//! Small shared enums used throughout the book.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The order-id type allocated by [`crate::OrderBook`]. Strictly monotonic
/// across the book's lifetime, never reused, never shared between sides.
pub type OrderId = u64;

/// Buy-side or sell-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The opposite side, used to pick the matching OrderTree.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// Limit orders carry a price and may rest; market orders never rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Limit,
    Market,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Limit => write!(f, "limit"),
            OrderKind::Market => write!(f, "market"),
        }
    }
}
