//! Property-based tests for cart state and derived views
//!
//! Random sequences of user actions are replayed against a store and the cart
//! invariants are checked after every step: no line ever sits at quantity
//! zero, totals are always a fresh function of the lines, and the frame handed
//! to the renderer always matches the cart.

use proptest::prelude::*;
use product_cart::{
    CartStore,
    cart::CartLine,
    catalog::{Catalog, Product},
    price::Price,
    view::{ControlState, FrameLog},
};
use rust_decimal::Decimal;

const PRODUCTS: [(&str, &str, &str); 4] = [
    ("A", "Widget", "9.99"),
    ("B", "Gizmo", "3.50"),
    ("C", "Sprocket", "0.10"),
    ("D", "Gadget", "1234.565"),
];

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Increment(usize),
    Decrement(usize),
    Remove(usize),
    Clear,
    Confirm,
    StartNewOrder,
}

/// Strategy to generate a single user action against one of the products
fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0..PRODUCTS.len();
    prop_oneof![
        3 => idx.clone().prop_map(Op::Add),
        2 => idx.clone().prop_map(Op::Increment),
        2 => idx.clone().prop_map(Op::Decrement),
        1 => idx.prop_map(Op::Remove),
        1 => Just(Op::Clear),
        1 => Just(Op::Confirm),
        1 => Just(Op::StartNewOrder),
    ]
}

/// Strategy to generate a session of 0 to 40 actions
fn session_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..=40)
}

fn new_store() -> CartStore<FrameLog> {
    let catalog: Catalog = PRODUCTS
        .iter()
        .map(|(id, name, price)| Product::new(id, name, price).unwrap())
        .collect();
    CartStore::new(catalog, FrameLog::new())
}

// absent-line errors are expected here and leave the store untouched
fn apply(store: &mut CartStore<FrameLog>, op: &Op) {
    match op {
        Op::Add(i) => {
            let (id, name, price) = PRODUCTS[*i];
            store.add_or_increment(id, name, price).unwrap();
        }
        Op::Increment(i) => {
            let _ = store.increment(PRODUCTS[*i].0);
        }
        Op::Decrement(i) => {
            let _ = store.decrement(PRODUCTS[*i].0);
        }
        Op::Remove(i) => {
            store.remove(PRODUCTS[*i].0);
        }
        Op::Clear => store.clear(),
        // fails on an empty cart, like the disabled confirm button
        Op::Confirm => {
            let _ = store.request_confirmation();
        }
        Op::StartNewOrder => store.start_new_order(),
    }
}

fn lines_of(store: &CartStore<FrameLog>) -> Vec<CartLine> {
    store.cart().lines().cloned().collect()
}

// PROPERTY TESTS
proptest! {
    /// Property: no line ever holds a quantity below one
    #[test]
    fn prop_no_line_below_one(session in session_strategy()) {
        let mut store = new_store();

        for op in &session {
            apply(&mut store, op);
            prop_assert!(
                store.cart().lines().all(|line| line.quantity >= 1),
                "Found a line with quantity zero after {:?}", op
            );
        }
    }

    /// Property: totals always equal the sum of quantity times unit price
    #[test]
    fn prop_totals_are_recomputed(session in session_strategy()) {
        let mut store = new_store();

        for op in &session {
            apply(&mut store, op);

            let expected: Decimal = store
                .cart()
                .lines()
                .map(|line| line.unit_price.as_decimal() * Decimal::from(line.quantity))
                .sum();
            let items: u64 = store.cart().lines().map(|line| u64::from(line.quantity)).sum();

            let frame = store.frame();
            prop_assert_eq!(frame.total_price.as_decimal(), expected);
            prop_assert_eq!(frame.total_items, items);
        }
    }

    /// Property: the last rendered frame always matches the cart
    ///
    /// Controls are Active with the exact quantity for products in the cart,
    /// Idle for everything else, and the empty flags follow the line count.
    #[test]
    fn prop_rendered_frame_matches_cart(session in session_strategy()) {
        let mut store = new_store();

        for op in &session {
            apply(&mut store, op);

            let frame = store.renderer().last().cloned().unwrap();
            prop_assert_eq!(&frame, &store.frame());
            prop_assert_eq!(frame.show_empty_indicator, store.cart().is_empty());
            prop_assert_eq!(frame.confirm_enabled, !store.cart().is_empty());

            for (id, control) in &frame.controls {
                let expected = match store.cart().quantity_of(id.as_str()) {
                    Some(quantity) => ControlState::Active(quantity),
                    None => ControlState::Idle,
                };
                prop_assert_eq!(*control, expected);
            }
        }
    }

    /// Property: add then decrement returns the cart to where it started
    #[test]
    fn prop_add_then_decrement_round_trips(
        session in session_strategy(),
        product in 0..PRODUCTS.len(),
    ) {
        let mut store = new_store();
        for op in &session {
            apply(&mut store, op);
        }
        let before = lines_of(&store);

        let (id, name, price) = PRODUCTS[product];
        store.add_or_increment(id, name, price).unwrap();
        store.decrement(id).unwrap();

        prop_assert_eq!(lines_of(&store), before);
    }

    /// Property: clear always leaves an empty cart with idle controls
    #[test]
    fn prop_clear_empties(session in session_strategy()) {
        let mut store = new_store();
        for op in &session {
            apply(&mut store, op);
        }

        store.clear();

        prop_assert!(store.cart().is_empty());
        prop_assert_eq!(store.cart().total_price(), Price::ZERO);
        prop_assert!(store.frame().controls.iter().all(|(_, c)| *c == ControlState::Idle));
    }

    /// Property: operations on absent lines never fabricate a line
    #[test]
    fn prop_absent_lines_stay_absent(product in 0..PRODUCTS.len(), times in 1usize..5) {
        let mut store = new_store();
        let id = PRODUCTS[product].0;

        for _ in 0..times {
            prop_assert!(store.increment(id).is_err());
            prop_assert!(store.decrement(id).is_err());
        }

        prop_assert!(store.cart().get(id).is_none());
        prop_assert_eq!(store.renderer().len(), 1);
    }

    /// Property: the confirmation snapshot reflects the cart at call time
    #[test]
    fn prop_snapshot_is_never_stale(session in session_strategy()) {
        let mut store = new_store();

        for op in &session {
            apply(&mut store, op);

            let snapshot = store.snapshot_for_confirmation();
            prop_assert_eq!(snapshot.lines.len(), store.cart().len());
            prop_assert_eq!(snapshot.total_price, store.cart().total_price());
            for (shown, line) in snapshot.lines.iter().zip(store.cart().lines()) {
                prop_assert_eq!(&shown.name, &line.name);
                prop_assert_eq!(shown.quantity, line.quantity);
                prop_assert_eq!(shown.line_total, line.line_total());
            }
        }
    }

    /// Property: the confirmation view opens only on a non-empty cart and
    /// closes whenever the cart is reset
    ///
    /// A reference model tracks the flag alongside the store; start-new-order
    /// must always leave an empty cart with idle controls.
    #[test]
    fn prop_confirmation_flag_follows_session(session in session_strategy()) {
        let mut store = new_store();
        let mut open = false;

        for op in &session {
            let was_empty = store.cart().is_empty();
            apply(&mut store, op);

            match op {
                Op::Confirm => open = open || !was_empty,
                Op::Clear | Op::StartNewOrder => open = false,
                _ => {}
            }
            prop_assert_eq!(store.is_confirmation_open(), open, "after {:?}", op);

            if let Op::StartNewOrder = op {
                prop_assert!(store.cart().is_empty());
                prop_assert!(store.frame().controls.iter().all(|(_, c)| *c == ControlState::Idle));
            }
        }
    }
}
