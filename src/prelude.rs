//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types, traits, and functions from this crate. Instead of importing each
//! type individually, you can use:
//!
//! ```rust
//! use orderbook_core::prelude::*;
//! ```

// Core order book types
pub use crate::book::{OrderBook, Summary, SubmitResult};
pub use crate::error::OrderBookError;
pub use crate::shared::SharedOrderBook;

// Decimal newtypes
pub use crate::decimal::{Price, Quantity};

// Order types
pub use crate::order::{Order, OrderView};

// Trade-related types
pub use crate::trade::{InMemoryTradeLog, PartyView, TradeRecord, TradeSink};

// Shared enums
pub use crate::types::{OrderId, OrderKind, Side};
