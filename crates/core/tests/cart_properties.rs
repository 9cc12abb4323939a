//! Property-based tests for cart invariants.
//!
//! Random sequences of cart operations must never leave an empty line behind,
//! and derived totals must always agree with the remaining lines.

use proptest::prelude::*;
use rusty_money::{Money, iso::NGN};

use crumb::{
    cart::Cart,
    products::{Product, ProductId},
};

#[derive(Debug, Clone)]
enum Op {
    Add(u64),
    Remove(u64),
    Update(u64, i64),
    Clear,
}

fn product(id: u64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Item {id}"),
        // Prices vary per product so swapped lines would change the total
        price: Money::from_minor(i64::try_from(id).unwrap_or(0) * 137 + 99, NGN),
        image: String::new(),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..6).prop_map(Op::Add),
        1 => (0u64..6).prop_map(Op::Remove),
        2 => ((0u64..6), -3i64..8).prop_map(|(id, quantity)| Op::Update(id, quantity)),
        1 => Just(Op::Clear),
    ]
}

fn apply(cart: &mut Cart, op: &Op) {
    match op {
        Op::Add(id) => {
            let _quantity = cart.add_item(&product(*id));
        }
        Op::Remove(id) => {
            cart.remove_item(ProductId::new(*id));
        }
        Op::Update(id, quantity) => {
            let _result = cart.update_quantity(ProductId::new(*id), *quantity);
        }
        Op::Clear => cart.clear(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn totals_always_match_remaining_lines(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut cart = Cart::new(NGN);

        for op in &ops {
            apply(&mut cart, op);
        }

        let expected_minor: i64 = cart
            .lines()
            .iter()
            .map(|line| line.unit_price().to_minor_units() * i64::from(line.quantity().get()))
            .sum();

        let expected_items: u64 = cart
            .lines()
            .iter()
            .map(|line| u64::from(line.quantity().get()))
            .sum();

        prop_assert_eq!(cart.total_price().map(|total| total.to_minor_units()), Ok(expected_minor));
        prop_assert_eq!(cart.total_items(), expected_items);
    }

    #[test]
    fn product_ids_are_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut cart = Cart::new(NGN);

        for op in &ops {
            apply(&mut cart, op);
        }

        let mut ids: Vec<_> = cart.lines().iter().map(|line| line.product_id()).collect();
        let before = ids.len();

        ids.sort();
        ids.dedup();

        prop_assert_eq!(ids.len(), before);
    }

    #[test]
    fn update_to_zero_or_below_equals_remove(
        ops in prop::collection::vec(op_strategy(), 0..20),
        id in 0u64..6,
        quantity in -5i64..=0,
    ) {
        let mut updated = Cart::new(NGN);

        for op in &ops {
            apply(&mut updated, op);
        }

        let mut removed = updated.clone();

        prop_assert!(updated.update_quantity(ProductId::new(id), quantity).is_ok());
        removed.remove_item(ProductId::new(id));

        prop_assert_eq!(updated, removed);
    }

    #[test]
    fn snapshot_restores_identical_cart(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut cart = Cart::new(NGN);

        for op in &ops {
            apply(&mut cart, op);
        }

        prop_assert_eq!(Cart::from_snapshot(cart.snapshot()), Ok(cart));
    }
}

#[test]
fn adding_twice_yields_one_line_of_two() {
    let mut cart = Cart::new(NGN);

    let first = cart.add_item(&product(1));
    let second = cart.add_item(&product(1));

    assert!(first.is_ok());
    assert_eq!(second.map(std::num::NonZeroU32::get), Ok(2));
    assert_eq!(cart.len(), 1);
}
