//! Property tests for discount evaluation: wrong targets, gates, inclusion
//! precedence and referential transparency hold for every rule.

use discount_core::{
    CartSummary, DiscountKind, DiscountOptions, DiscountRule, LineItemSnapshot, Money, Target,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG=discount_core=trace`
/// shows every gate decision.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn money() -> impl Strategy<Value = Money> {
    (-1_000_000_i64..1_000_000).prop_map(Money::from_minor)
}

fn positive_money() -> impl Strategy<Value = Money> {
    (0_i64..1_000_000).prop_map(Money::from_minor)
}

fn raw_amount() -> impl Strategy<Value = Decimal> {
    (0_i64..10_000).prop_map(|points| Decimal::new(points, 2))
}

fn kind() -> impl Strategy<Value = DiscountKind> {
    prop_oneof![
        Just(DiscountKind::FixedProduct),
        Just(DiscountKind::FixedCart),
        Just(DiscountKind::Percent),
    ]
}

fn product_id() -> impl Strategy<Value = String> {
    "[A-Z]{1,3}"
}

proptest! {
    /// Fixed-cart rules never apply to a line item.
    #[test]
    fn prop_fixed_cart_on_item_is_zero(
        amount in raw_amount(),
        price in positive_money(),
        id in product_id(),
        priority in any::<i32>(),
    ) {
        init_tracing();
        let rule = DiscountRule::new(DiscountKind::FixedCart, amount, "cart").with_priority(priority);
        let item = LineItemSnapshot::new(id, price, 1);

        prop_assert_eq!(rule.calculate_amount_for(Target::item(&item)), Money::zero());
    }

    /// Fixed-product rules never apply to the cart.
    #[test]
    fn prop_fixed_product_on_cart_is_zero(amount in raw_amount(), total in money()) {
        let rule = DiscountRule::new(DiscountKind::FixedProduct, amount, "item");
        let cart = CartSummary::new(total);

        prop_assert_eq!(rule.calculate_amount_for(Target::cart(&cart)), Money::zero());
    }

    /// A missed minimum zeroes every kind, on either target.
    #[test]
    fn prop_minimum_gate_zeroes_every_kind(
        kind in kind(),
        amount in raw_amount(),
        total in positive_money(),
        shortfall in 1_i64..100_000,
        deducted in positive_money(),
    ) {
        let minimum = total + Money::from_minor(shortfall);
        let rule = DiscountRule::new(kind, amount, "gated")
            .with_priority(1)
            .with_options(DiscountOptions::new().minimum_amount(minimum));
        let cart = CartSummary::new(total);
        let item = LineItemSnapshot::new("A", total, 1);

        prop_assert_eq!(rule.calculate_amount(Target::cart(&cart), deducted), Money::zero());
        prop_assert_eq!(rule.calculate_amount(Target::item(&item), deducted), Money::zero());
    }

    /// An exceeded maximum zeroes every kind, on either target.
    #[test]
    fn prop_maximum_gate_zeroes_every_kind(
        kind in kind(),
        amount in raw_amount(),
        total in positive_money(),
        excess in 1_i64..100_000,
    ) {
        let maximum = total - Money::from_minor(excess);
        let rule = DiscountRule::new(kind, amount, "gated")
            .with_options(DiscountOptions::new().maximum_amount(maximum));
        let cart = CartSummary::new(total);
        let item = LineItemSnapshot::new("A", total, 1);

        prop_assert_eq!(rule.calculate_amount_for(Target::cart(&cart)), Money::zero());
        prop_assert_eq!(rule.calculate_amount_for(Target::item(&item)), Money::zero());
    }

    /// The deny-list always wins for an id on both lists.
    #[test]
    fn prop_exclusion_overrides_inclusion(id in product_id(), kind in kind(), amount in raw_amount()) {
        let rule = DiscountRule::new(kind, amount, "filtered").with_options(
            DiscountOptions::new()
                .product_ids([id.as_str()])
                .exclude_product_ids([id.as_str()]),
        );
        let item = LineItemSnapshot::new(id.as_str(), Money::from_major(10), 1);

        prop_assert!(!rule.includes_item(&item));
        prop_assert_eq!(rule.calculate_amount_for(Target::item(&item)), Money::zero());
    }

    /// Percent at priority 0 is always a share of the gross price.
    #[test]
    fn prop_percent_priority_zero_is_gross(
        amount in raw_amount(),
        price in positive_money(),
        deducted in positive_money(),
    ) {
        let rule = DiscountRule::new(DiscountKind::Percent, amount, "pct");
        let item = LineItemSnapshot::new("A", price, 1);

        prop_assert_eq!(
            rule.calculate_amount(Target::item(&item), deducted),
            Money::new(price.amount() * amount / Decimal::ONE_HUNDRED)
        );
    }

    /// Percent at non-zero priority is a share of what is left.
    #[test]
    fn prop_percent_priority_nonzero_is_net(
        amount in raw_amount(),
        price in positive_money(),
        deducted in positive_money(),
        priority in prop_oneof![i32::MIN..0, 1..i32::MAX],
    ) {
        let rule = DiscountRule::new(DiscountKind::Percent, amount, "pct").with_priority(priority);
        let item = LineItemSnapshot::new("A", price, 1);

        prop_assert_eq!(
            rule.calculate_amount(Target::item(&item), deducted),
            (price - deducted).percent_of(amount).unwrap()
        );
    }

    /// Same inputs, same output, and the rule is left untouched.
    #[test]
    fn prop_evaluation_is_idempotent(
        kind in kind(),
        amount in raw_amount(),
        price in positive_money(),
        deducted in positive_money(),
        priority in any::<i32>(),
    ) {
        let rule = DiscountRule::new(kind, amount, "same").with_priority(priority);
        let before = rule.clone();
        let item = LineItemSnapshot::new("A", price, 2);
        let cart = CartSummary::new(price);

        let first = rule.calculate_amount(Target::item(&item), deducted);
        let second = rule.calculate_amount(Target::item(&item), deducted);
        prop_assert_eq!(first, second);

        let first = rule.calculate_amount(Target::cart(&cart), deducted);
        let second = rule.calculate_amount(Target::cart(&cart), deducted);
        prop_assert_eq!(first, second);

        prop_assert_eq!(rule, before);
    }
}

#[test]
fn scenario_fixed_product_on_item_42() {
    init_tracing();
    let rule = DiscountRule::new(DiscountKind::FixedProduct, Decimal::from(5), "Five off");
    let item = LineItemSnapshot::new(42_u64, Money::from_major(30), 1);
    assert_eq!(rule.calculate_amount_for(Target::item(&item)), Money::from_major(5));

    let restricted = rule.with_options(DiscountOptions::new().product_ids([7_u64]));
    assert_eq!(restricted.calculate_amount_for(Target::item(&item)), Money::zero());
}

#[test]
fn scenario_fixed_cart_minimum() {
    init_tracing();
    let cart = CartSummary::new(Money::from_major(150));

    let met = DiscountRule::new(DiscountKind::FixedCart, Decimal::from(20), "Twenty off")
        .with_options(DiscountOptions::new().minimum_amount(Decimal::from(100)));
    assert_eq!(met.calculate_amount_for(Target::cart(&cart)), Money::from_major(20));

    let missed = met.with_options(DiscountOptions::new().minimum_amount(Decimal::from(200)));
    assert_eq!(missed.calculate_amount_for(Target::cart(&cart)), Money::zero());
}

#[test]
fn scenario_percent_of_remainder() {
    let rule = DiscountRule::new(DiscountKind::Percent, Decimal::from(10), "Ten percent")
        .with_priority(1);
    let item = LineItemSnapshot::new("A", Money::from_major(100), 1);

    assert_eq!(
        rule.calculate_amount(Target::item(&item), Money::from_major(5)),
        Money::new(Decimal::new(95, 1))
    );
}
