//! # Order Book Core
//!
//! A decimal-precision, price-time-priority limit order book matching
//! engine for a single instrument.
//!
//! The engine is organized the way a matching engine's hot path usually
//! is: an arena-backed intrusive FIFO list per price level
//! ([`order_list`]), a sorted map of price levels per side
//! ([`order_tree`]), and an orchestrator ([`book`]) that owns both sides,
//! the logical clock, and the order-id allocator. Prices and quantities
//! are [`rust_decimal::Decimal`]-backed newtypes ([`decimal`]) so every
//! comparison and arithmetic operation is exact decimal, never binary
//! float.
//!
//! `OrderBook` itself makes no concurrency claim — it is a plain,
//! single-writer struct meant to be driven from one thread (or guarded
//! externally by the caller). Callers that want a cloneable, thread-safe
//! handle with serialized writes and concurrent reads should use
//! [`shared::SharedOrderBook`].
//!
//! ```
//! use orderbook_core::prelude::*;
//!
//! let mut book = OrderBook::new_with_log();
//! book.submit(Side::Bid, OrderKind::Limit, "10", Some("100.50"), None, None)
//!     .unwrap();
//! let summary = book.summary();
//! assert_eq!(summary.best_bid, Some(Price::from_str("100.50").unwrap()));
//! ```

pub mod book;
pub mod decimal;
pub mod error;
pub mod order;
pub mod order_list;
pub mod order_tree;
pub mod prelude;
pub mod shared;
pub mod trade;
pub mod types;

pub use book::{OrderBook, Summary, SubmitResult};
pub use error::OrderBookError;
pub use shared::SharedOrderBook;
