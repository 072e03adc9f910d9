use orderbook_core::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Submit {
        side: Side,
        kind_is_limit: bool,
        quantity: u32,
        price: u32,
    },
    Modify {
        side: Side,
        order_id: u32,
        new_quantity: Option<u32>,
        new_price: Option<u32>,
    },
    Cancel {
        side: Side,
        order_id: u32,
    },
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (side_strategy(), any::<bool>(), 1u32..20, 1u32..20).prop_map(
            |(side, kind_is_limit, quantity, price)| Action::Submit {
                side,
                kind_is_limit,
                quantity,
                price,
            }
        ),
        (side_strategy(), 1u32..30, prop::option::of(1u32..20), prop::option::of(1u32..20)).prop_map(
            |(side, order_id, new_quantity, new_price)| Action::Modify {
                side,
                order_id,
                new_quantity,
                new_price,
            }
        ),
        (side_strategy(), 1u32..30).prop_map(|(side, order_id)| Action::Cancel { side, order_id }),
    ]
}

/// Check invariants 1-4 (price-level ordering/non-emptiness, per-order-list
/// FIFO aggregate consistency, side-wide volume/count aggregate consistency,
/// id-index agreement) hold after every action in a random sequence.
fn check_invariants(book: &OrderBook) {
    let summary = book.summary();

    let bids = book.list(Side::Bid);
    let asks = book.list(Side::Ask);

    assert_eq!(summary.num_bids, bids.len());
    assert_eq!(summary.num_asks, asks.len());

    let bid_sum = bids
        .iter()
        .fold(Quantity::zero(), |acc, o| acc.saturating_add(o.quantity));
    let ask_sum = asks
        .iter()
        .fold(Quantity::zero(), |acc, o| acc.saturating_add(o.quantity));
    assert_eq!(summary.bid_volume, bid_sum);
    assert_eq!(summary.ask_volume, ask_sum);

    // bids must be in non-increasing price order, asks non-decreasing
    for pair in bids.windows(2) {
        assert!(pair[0].price >= pair[1].price);
    }
    for pair in asks.windows(2) {
        assert!(pair[0].price <= pair[1].price);
    }

    // the book never crosses: best bid must be strictly below best ask
    if let (Some(bb), Some(ba)) = (summary.best_bid, summary.best_ask) {
        assert!(bb < ba, "book crossed: best_bid {bb} >= best_ask {ba}");
    }

    for order in bids.iter().chain(asks.iter()) {
        let fetched = book.get(order.side, order.order_id).unwrap();
        assert_eq!(fetched.order_id, order.order_id);
        assert_eq!(fetched.quantity, order.quantity);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn invariants_hold_after_random_operations(actions in prop::collection::vec(action_strategy(), 1..60)) {
        let mut book = OrderBook::new_with_log();

        for action in actions {
            match action {
                Action::Submit { side, kind_is_limit, quantity, price } => {
                    let quantity = quantity.to_string();
                    if kind_is_limit {
                        let price = price.to_string();
                        let _ = book.submit(side, OrderKind::Limit, &quantity, Some(&price), None, None);
                    } else {
                        let _ = book.submit(side, OrderKind::Market, &quantity, None, None, None);
                    }
                }
                Action::Modify { side, order_id, new_quantity, new_price } => {
                    let qty_str = new_quantity.map(|q| q.to_string());
                    let price_str = new_price.map(|p| p.to_string());
                    let _ = book.modify(
                        side,
                        order_id as u64,
                        qty_str.as_deref(),
                        price_str.as_deref(),
                    );
                }
                Action::Cancel { side, order_id } => {
                    let _ = book.cancel(side, order_id as u64);
                }
            }
            check_invariants(&book);
        }
    }
}
