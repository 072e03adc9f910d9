//! The `OrderBook` orchestrator: owns both sides of the book, the logical
//! clock, the order-id allocator, and the `TradeSink` trades are published
//! to.

use crate::decimal::{Price, Quantity};
use crate::error::OrderBookError;
use crate::order::{Order, OrderView};
use crate::order_tree::OrderTree;
use crate::trade::{InMemoryTradeLog, PartyView, TradeRecord, TradeSink};
use crate::types::{OrderId, OrderKind, Side};
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// Best bid/ask, per-side aggregates, and the current clock. A read of the
/// maintained aggregates — no scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    pub bid_volume: Quantity,
    pub ask_volume: Quantity,
    pub num_bids: usize,
    pub num_asks: usize,
    pub time: u64,
}

/// Result of `submit`: every trade produced, plus the residual order that
/// was inserted into the book, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitResult {
    pub trades: Vec<TradeRecord>,
    pub order: Option<OrderView>,
}

/// Orchestrator owning a bid `OrderTree`, an ask `OrderTree`, a
/// monotonically increasing logical clock, an order-id allocator, and an
/// emission sink for trades.
///
/// This type carries no process-wide state: every caller holds an explicit
/// handle rather than reaching for a shared global instance. Single-threaded
/// cooperative use is the default; wrap in
/// [`crate::shared::SharedOrderBook`] for a single-writer/multi-reader
/// model.
pub struct OrderBook {
    bids: OrderTree,
    asks: OrderTree,
    time: u64,
    next_order_id: OrderId,
    sink: Box<dyn TradeSink>,
}

impl OrderBook {
    /// Construct a book with a caller-supplied `TradeSink`.
    pub fn new(sink: Box<dyn TradeSink>) -> Self {
        Self {
            bids: OrderTree::new(Side::Bid),
            asks: OrderTree::new(Side::Ask),
            time: 0,
            next_order_id: 1,
            sink,
        }
    }

    /// Construct a book with the default `InMemoryTradeLog` sink.
    pub fn new_with_log() -> Self {
        Self::new(Box::new(InMemoryTradeLog::new()))
    }

    /// Read-back over the trades this book has emitted so far.
    pub fn trade_log_tail(&self, n: usize) -> Vec<TradeRecord> {
        self.sink.tail(n)
    }

    fn tree(&self, side: Side) -> &OrderTree {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn tree_mut(&mut self, side: Side) -> &mut OrderTree {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Submit a limit or market order.
    ///
    /// Validation runs before the clock advances, so a rejected submit has
    /// no side effect at all.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        &mut self,
        side: Side,
        kind: OrderKind,
        quantity: &str,
        price: Option<&str>,
        trade_id: Option<String>,
        wage: Option<Value>,
    ) -> Result<SubmitResult, OrderBookError> {
        let quantity = Quantity::from_str(quantity)
            .map_err(|e| OrderBookError::QuantityError(e.to_string()))?;

        let price = match (kind, price) {
            (OrderKind::Limit, Some(p)) => Some(
                Price::from_str(p).map_err(|e| OrderBookError::OrderTypeError(e.to_string()))?,
            ),
            (OrderKind::Limit, None) => {
                return Err(OrderBookError::OrderTypeError(
                    "limit order requires a price".to_string(),
                ));
            }
            (OrderKind::Market, None) => None,
            (OrderKind::Market, Some(_)) => {
                return Err(OrderBookError::OrderTypeError(
                    "market order must not carry a price".to_string(),
                ));
            }
        };

        self.time += 1;
        let timestamp = self.time;
        let order_id = self.next_order_id;
        self.next_order_id += 1;

        trace!(%side, %kind, %quantity, order_id, timestamp, "submit");

        let (trades, residual_quantity) =
            self.run_matching_loop(side, quantity, price, order_id, &trade_id, &wage, timestamp);

        let order = match kind {
            OrderKind::Market => None,
            OrderKind::Limit => {
                if residual_quantity > Quantity::zero() {
                    let price = price.expect("limit order always carries a price");
                    let resting = Order::new(
                        side,
                        price,
                        residual_quantity,
                        order_id,
                        timestamp,
                        trade_id,
                        wage,
                    );
                    let view = resting.view();
                    self.tree_mut(side).insert(resting);
                    Some(view)
                } else {
                    None
                }
            }
        };

        Ok(SubmitResult { trades, order })
    }

    /// The matching loop shared by limit and market submits. Returns the
    /// trades emitted and the aggressor's residual quantity (zero for a
    /// fully-filled order).
    fn run_matching_loop(
        &mut self,
        side: Side,
        mut quantity: Quantity,
        price: Option<Price>,
        taker_order_id: OrderId,
        taker_trade_id: &Option<String>,
        taker_wage: &Option<Value>,
        timestamp: u64,
    ) -> (Vec<TradeRecord>, Quantity) {
        let opposite_side = side.opposite();
        let mut trades = Vec::new();

        loop {
            if quantity <= Quantity::zero() {
                break;
            }
            let Some(best) = self.tree(opposite_side).best_price() else {
                break;
            };
            let crosses = match price {
                None => true,
                Some(limit) => match side {
                    Side::Bid => limit >= best,
                    Side::Ask => limit <= best,
                },
            };
            if !crosses {
                break;
            }

            let opposite = self.tree_mut(opposite_side);
            let head = opposite
                .list_at(best)
                .and_then(|list| list.iter().next())
                .expect("best_price implies a non-empty level");
            let maker_order_id = head.order_id;
            let maker_quantity = head.quantity;
            let maker_trade_id = head.trade_id.clone();
            let maker_wage = head.wage.clone();

            let matched = quantity.min(maker_quantity);
            let maker_remaining = maker_quantity.saturating_sub(matched);

            trades.push(TradeRecord {
                timestamp,
                price: best,
                quantity: matched,
                party1: PartyView {
                    trade_id: maker_trade_id,
                    side: opposite_side,
                    order_id: maker_order_id,
                    new_book_quantity: if maker_remaining > Quantity::zero() {
                        Some(maker_remaining)
                    } else {
                        None
                    },
                    wage: maker_wage,
                },
                party2: PartyView {
                    trade_id: taker_trade_id.clone(),
                    side,
                    order_id: taker_order_id,
                    new_book_quantity: None,
                    wage: taker_wage.clone(),
                },
            });

            if maker_remaining > Quantity::zero() {
                opposite.decrease_quantity_in_place(maker_order_id, maker_remaining);
            } else {
                opposite
                    .pop_head_at(best)
                    .expect("maker order must still be the resting head at its price");
            }

            quantity = quantity.saturating_sub(matched);
        }

        for trade in &trades {
            self.sink.append(trade.clone());
        }

        (trades, quantity)
    }

    /// Modify a resting order's quantity and/or price. Never crosses the
    /// book — cancel-then-submit to change aggression.
    pub fn modify(
        &mut self,
        side: Side,
        order_id: OrderId,
        new_quantity: Option<&str>,
        new_price: Option<&str>,
    ) -> Result<OrderView, OrderBookError> {
        if self.tree(side).get_by_id(order_id).is_none() {
            return Err(OrderBookError::OrderNotFoundError { side, order_id });
        }

        let new_quantity = new_quantity
            .map(|q| {
                Quantity::from_str(q).map_err(|e| OrderBookError::QuantityError(e.to_string()))
            })
            .transpose()?;
        let new_price = new_price
            .map(|p| Price::from_str(p).map_err(|e| OrderBookError::OrderTypeError(e.to_string())))
            .transpose()?;

        self.time += 1;
        let timestamp = self.time;

        let current = self.tree(side).get_by_id(order_id).expect("checked above");
        let effective_quantity = new_quantity.unwrap_or(current.quantity);
        let effective_price = new_price.unwrap_or(current.price);

        let view = if new_price.is_some() && new_price != Some(current.price) {
            let old = self
                .tree_mut(side)
                .remove_by_id(order_id)
                .expect("checked above");
            let repriced = Order::new(
                side,
                effective_price,
                effective_quantity,
                order_id,
                timestamp,
                old.trade_id,
                old.wage,
            );
            let view = repriced.view();
            self.tree_mut(side).insert(repriced);
            view
        } else if effective_quantity > current.quantity {
            self.tree_mut(side)
                .increase_quantity_and_requeue(order_id, effective_quantity, timestamp);
            self.tree(side)
                .get_by_id(order_id)
                .expect("just inserted")
                .view()
        } else if effective_quantity < current.quantity {
            self.tree_mut(side).decrease_quantity_in_place(order_id, effective_quantity);
            self.tree(side)
                .get_by_id(order_id)
                .expect("still resting")
                .view()
        } else {
            current.view()
        };

        trace!(%side, order_id, timestamp, "modify");
        Ok(view)
    }

    /// Remove a resting order. No trade emission.
    pub fn cancel(&mut self, side: Side, order_id: OrderId) -> Result<(), OrderBookError> {
        if self.tree(side).get_by_id(order_id).is_none() {
            return Err(OrderBookError::OrderNotFoundError { side, order_id });
        }
        self.time += 1;
        self.tree_mut(side)
            .remove_by_id(order_id)
            .expect("checked above");
        trace!(%side, order_id, time = self.time, "cancel");
        Ok(())
    }

    /// Iterate resting orders on `side` in priority order.
    pub fn list(&self, side: Side) -> Vec<OrderView> {
        self.tree(side).iter_by_priority().map(Order::view).collect()
    }

    /// Single-order lookup.
    pub fn get(&self, side: Side, order_id: OrderId) -> Result<OrderView, OrderBookError> {
        self.tree(side)
            .get_by_id(order_id)
            .map(Order::view)
            .ok_or(OrderBookError::OrderNotFoundError { side, order_id })
    }

    /// Best bid/ask, per-side aggregates, and the current clock.
    pub fn summary(&self) -> Summary {
        Summary {
            best_bid: self.bids.best_price(),
            best_ask: self.asks.best_price(),
            bid_volume: self.bids.volume(),
            ask_volume: self.asks.volume(),
            num_bids: self.bids.num_orders(),
            num_asks: self.asks.num_orders(),
            time: self.time,
        }
    }
}
