//! One side of the book: a sorted price → `OrderList` map plus an O(1) id
//! index, with the side-wide aggregates the matching loop and `summary()`
//! read without scanning.

use crate::decimal::{Price, Quantity};
use crate::order::Order;
use crate::order_list::{Handle, OrderList};
use crate::types::{OrderId, Side};
use std::collections::{BTreeMap, HashMap};

/// One side of the book.
///
/// Price → `OrderList` is a [`BTreeMap`] — a balanced search tree gives the
/// O(log n) insert/remove/best-price the matching loop needs; a flat sorted
/// vector would degrade to linear-time insertion under churn. This book is
/// single-writer, so a plain `BTreeMap` is the right tool here without any
/// lock-free machinery that single-writer access doesn't need.
///
/// Invariant: for every price key `p`, the `OrderList` at `p` is non-empty,
/// its `volume` equals the sum of member quantities, and `volume`/
/// `num_orders` here equal the sums across every level.
pub struct OrderTree {
    side: Side,
    levels: BTreeMap<Price, OrderList>,
    index: HashMap<OrderId, (Price, Handle)>,
    volume: Quantity,
    num_orders: usize,
}

impl OrderTree {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            index: HashMap::new(),
            volume: Quantity::from_decimal(rust_decimal::Decimal::ZERO).unwrap_or_else(|_| {
                unreachable!("zero is a valid intermediate volume")
            }),
            num_orders: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn volume(&self) -> Quantity {
        self.volume
    }

    pub fn num_orders(&self) -> usize {
        self.num_orders
    }

    /// For asks, the smallest resting price; for bids, the largest. `None`
    /// when this side is empty.
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::Ask => self.levels.keys().next().copied(),
            Side::Bid => self.levels.keys().next_back().copied(),
        }
    }

    pub fn list_at(&self, price: Price) -> Option<&OrderList> {
        self.levels.get(&price)
    }

    /// Locate or create the `OrderList` at `order.price`, append, and index
    /// the order by id.
    pub fn insert(&mut self, order: Order) {
        let order_id = order.order_id;
        let price = order.price;
        self.volume = self.volume.saturating_add(order.quantity);
        self.num_orders += 1;
        let list = self.levels.entry(price).or_default();
        let handle = list.append(order);
        self.index.insert(order_id, (price, handle));
    }

    /// O(1) lookup by id.
    pub fn get_by_id(&self, order_id: OrderId) -> Option<&Order> {
        let (price, handle) = self.index.get(&order_id)?;
        self.levels.get(price).map(|list| list.get(*handle))
    }

    /// Remove an order by id; drops the price level if it becomes empty.
    pub fn remove_by_id(&mut self, order_id: OrderId) -> Option<Order> {
        let (price, handle) = self.index.remove(&order_id)?;
        let list = self.levels.get_mut(&price).expect("id index out of sync");
        let order = list.remove(handle);
        self.volume = self.volume.saturating_sub(order.quantity);
        self.num_orders -= 1;
        if list.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    /// Remove and return the head of the `OrderList` at `price`; cleans up
    /// the price level if it becomes empty. Used by the matching loop when a
    /// resting order is fully consumed.
    pub fn pop_head_at(&mut self, price: Price) -> Option<Order> {
        let handle = self.levels.get(&price)?.head_handle()?;
        let order_id = self.levels.get(&price)?.get(handle).order_id;
        self.remove_by_id(order_id)
    }

    /// Decrease a resting order's quantity in place. Timestamp and FIFO
    /// position are unchanged — priority is preserved.
    pub fn decrease_quantity_in_place(&mut self, order_id: OrderId, new_quantity: Quantity) {
        let (price, handle) = *self.index.get(&order_id).expect("order_id must exist");
        let list = self.levels.get_mut(&price).expect("id index out of sync");
        let old = list.get(handle).quantity;
        list.adjust_quantity_in_place(handle, new_quantity);
        self.volume = self.volume.saturating_sub(old.saturating_sub(new_quantity));
    }

    /// Increase a resting order's quantity and push it to the tail of its
    /// price level, refreshing its timestamp — priority is lost.
    pub fn increase_quantity_and_requeue(
        &mut self,
        order_id: OrderId,
        new_quantity: Quantity,
        new_timestamp: u64,
    ) {
        let (price, handle) = *self.index.get(&order_id).expect("order_id must exist");
        let list = self.levels.get_mut(&price).expect("id index out of sync");
        let old = list.get(handle).quantity;
        list.adjust_quantity_in_place(handle, new_quantity);
        list.get_mut(handle).timestamp = new_timestamp;
        let new_handle = list.move_to_tail(handle);
        self.index.insert(order_id, (price, new_handle));
        self.volume = self.volume.saturating_add(new_quantity.saturating_sub(old));
    }

    /// Iterate resting orders in priority order: asks ascending by price
    /// then FIFO within price, bids descending by price then FIFO within
    /// price.
    pub fn iter_by_priority(&self) -> Box<dyn Iterator<Item = &Order> + '_> {
        match self.side {
            Side::Ask => Box::new(self.levels.values().flat_map(|list| list.iter())),
            Side::Bid => Box::new(self.levels.values().rev().flat_map(|list| list.iter())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Price, Quantity};

    fn order(id: u64, price: &str, qty: &str, ts: u64) -> Order {
        Order::new(
            Side::Bid,
            Price::from_str(price).unwrap(),
            Quantity::from_str(qty).unwrap(),
            id,
            ts,
            None,
            None,
        )
    }

    #[test]
    fn best_price_direction_depends_on_side() {
        let mut bids = OrderTree::new(Side::Bid);
        bids.insert(order(1, "100", "1", 1));
        bids.insert(order(2, "101", "1", 2));
        assert_eq!(bids.best_price(), Some(Price::from_str("101").unwrap()));

        let mut asks = OrderTree::new(Side::Ask);
        asks.insert(order(3, "100", "1", 1));
        asks.insert(order(4, "99", "1", 2));
        assert_eq!(asks.best_price(), Some(Price::from_str("99").unwrap()));
    }

    #[test]
    fn remove_by_id_evicts_empty_level() {
        let mut tree = OrderTree::new(Side::Bid);
        tree.insert(order(1, "100", "5", 1));
        assert!(tree.remove_by_id(1).is_some());
        assert!(tree.is_empty());
        assert_eq!(tree.num_orders(), 0);
        assert!(tree.list_at(Price::from_str("100").unwrap()).is_none());
    }

    #[test]
    fn iter_by_priority_fifo_within_price() {
        let mut bids = OrderTree::new(Side::Bid);
        bids.insert(order(1, "50", "1", 1));
        bids.insert(order(2, "50", "1", 2));
        bids.insert(order(3, "51", "1", 3));
        let ids: Vec<u64> = bids.iter_by_priority().map(|o| o.order_id).collect();
        // 51 first (best bid), then 50's two members in admission order
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn increase_quantity_requeues_to_tail() {
        let mut bids = OrderTree::new(Side::Bid);
        bids.insert(order(1, "50", "1", 1));
        bids.insert(order(2, "50", "1", 2));
        bids.increase_quantity_and_requeue(1, Quantity::from_str("5").unwrap(), 10);
        let ids: Vec<u64> = bids.iter_by_priority().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(bids.volume(), Quantity::from_str("6").unwrap());
    }

    #[test]
    fn decrease_quantity_keeps_position() {
        let mut bids = OrderTree::new(Side::Bid);
        bids.insert(order(1, "50", "5", 1));
        bids.insert(order(2, "50", "1", 2));
        bids.decrease_quantity_in_place(1, Quantity::from_str("2").unwrap());
        let ids: Vec<u64> = bids.iter_by_priority().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(bids.volume(), Quantity::from_str("3").unwrap());
    }

    #[test]
    fn pop_head_at_returns_head_and_evicts_emptied_level() {
        let mut bids = OrderTree::new(Side::Bid);
        bids.insert(order(1, "50", "1", 1));
        bids.insert(order(2, "50", "1", 2));

        let price = Price::from_str("50").unwrap();
        let popped = bids.pop_head_at(price).unwrap();
        assert_eq!(popped.order_id, 1);
        assert_eq!(bids.num_orders(), 1);
        assert_eq!(bids.volume(), Quantity::from_str("1").unwrap());
        assert!(bids.list_at(price).is_some());

        let popped = bids.pop_head_at(price).unwrap();
        assert_eq!(popped.order_id, 2);
        assert!(bids.list_at(price).is_none());
        assert!(bids.is_empty());
        assert_eq!(bids.num_orders(), 0);
    }

    #[test]
    fn pop_head_at_empty_price_returns_none() {
        let bids = OrderTree::new(Side::Bid);
        assert!(bids.pop_head_at(Price::from_str("50").unwrap()).is_none());
    }
}
