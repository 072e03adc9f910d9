//! Trade records and the sink they are published to.

use crate::decimal::{Price, Quantity};
use crate::types::{OrderId, Side};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One side's view of a match: the maker (`party1`) or the taker
/// (`party2`). `new_book_quantity` is the maker's residual resting
/// quantity, or `None` if the maker was fully consumed; it is always
/// `None` for the taker, which never rests as a result of its own match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyView {
    pub trade_id: Option<String>,
    pub side: Side,
    pub order_id: OrderId,
    pub new_book_quantity: Option<Quantity>,
    pub wage: Option<Value>,
}

/// Emitted per match. `timestamp` and `time` are the same field emitted
/// under both names for wire compatibility with consumers that expect
/// either name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeRecord {
    pub timestamp: u64,
    pub price: Price,
    pub quantity: Quantity,
    pub party1: PartyView,
    pub party2: PartyView,
}

/// Hand-written to emit both `timestamp` and `time` as duplicate fields
/// without a second copy living on the struct itself.
impl Serialize for TradeRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TradeRecord", 6)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("time", &self.timestamp)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("party1", &self.party1)?;
        state.serialize_field("party2", &self.party2)?;
        state.end()
    }
}

/// An append-only, write-only interface the book uses to publish executed
/// trades. Append order is emission order: the order of matches within a
/// single `submit` and the order of submits across time. Implementations
/// must never reorder, drop, or coalesce.
pub trait TradeSink: Send {
    fn append(&mut self, trade: TradeRecord);
    /// The last `n` trades in emission order (fewer if the log holds less).
    fn tail(&self, n: usize) -> Vec<TradeRecord>;
}

/// Default [`TradeSink`]: an append-only in-memory log. Starts empty; no
/// synthetic seed record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeLog {
    trades: Vec<TradeRecord>,
}

impl InMemoryTradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl TradeSink for InMemoryTradeLog {
    fn append(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    fn tail(&self, n: usize) -> Vec<TradeRecord> {
        let start = self.trades.len().saturating_sub(n);
        self.trades[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Price, Quantity};

    fn sample(ts: u64) -> TradeRecord {
        TradeRecord {
            timestamp: ts,
            price: Price::from_str("100").unwrap(),
            quantity: Quantity::from_str("1").unwrap(),
            party1: PartyView {
                trade_id: None,
                side: Side::Bid,
                order_id: 1,
                new_book_quantity: None,
                wage: None,
            },
            party2: PartyView {
                trade_id: None,
                side: Side::Ask,
                order_id: 2,
                new_book_quantity: None,
                wage: None,
            },
        }
    }

    #[test]
    fn log_starts_empty() {
        let log = InMemoryTradeLog::new();
        assert!(log.is_empty());
        assert_eq!(log.tail(10), Vec::new());
    }

    #[test]
    fn append_preserves_emission_order() {
        let mut log = InMemoryTradeLog::new();
        log.append(sample(1));
        log.append(sample(2));
        log.append(sample(3));
        let tail = log.tail(2);
        assert_eq!(tail.iter().map(|t| t.timestamp).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn tail_larger_than_log_returns_everything() {
        let mut log = InMemoryTradeLog::new();
        log.append(sample(1));
        assert_eq!(log.tail(50).len(), 1);
    }

    #[test]
    fn wire_shape_duplicates_timestamp_as_time() {
        let trade = sample(42);
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["time"], 42);
    }
}
