//! # Discount Targets
//!
//! What a discount rule is evaluated against: the whole cart or one line item.
//!
//! ## Target Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Target::Cart ───────► CartTotal        { total }                       │
//! │                                                                         │
//! │  Target::Item ───────► LineItemTotals   { id, total, price_total }      │
//! │                                                                         │
//! │  total        → used by the minimum / maximum gates                     │
//! │  price_total  → pre-discount extended price, the percent base           │
//! │  id           → used by the inclusion filter                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host cart system implements the two traits on its own types. The
//! snapshot structs below are ready-made implementations for hosts that
//! don't have a cart model of their own (and for tests).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// The aggregate cart as seen by cart-level discounts.
pub trait CartTotal {
    /// Running cart total.
    fn total(&self) -> Money;
}

/// A single line item as seen by per-item discounts.
pub trait LineItemTotals {
    /// Product identifier used by the inclusion filter.
    fn id(&self) -> &ProductId;

    /// This line's contribution to the cart total (gate input).
    fn total(&self) -> Money;

    /// Pre-discount extended price (unit price × quantity).
    fn price_total(&self) -> Money;
}

// =============================================================================
// Target
// =============================================================================

/// The thing a discount is evaluated against.
///
/// Exactly two variants; `calculate_amount` matches exhaustively so a third
/// kind of target is a compile-time decision.
#[derive(Clone, Copy)]
pub enum Target<'a> {
    /// The whole cart.
    Cart(&'a dyn CartTotal),
    /// One line item.
    Item(&'a dyn LineItemTotals),
}

impl<'a> Target<'a> {
    /// Wraps a cart.
    pub fn cart(cart: &'a dyn CartTotal) -> Self {
        Target::Cart(cart)
    }

    /// Wraps a line item.
    pub fn item(item: &'a dyn LineItemTotals) -> Self {
        Target::Item(item)
    }

    /// The total the minimum / maximum gates compare against.
    pub fn total(&self) -> Money {
        match self {
            Target::Cart(cart) => cart.total(),
            Target::Item(item) => item.total(),
        }
    }

    /// Short label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Target::Cart(_) => "cart",
            Target::Item(_) => "item",
        }
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Cart(cart) => f.debug_struct("Cart").field("total", &cart.total()).finish(),
            Target::Item(item) => f
                .debug_struct("Item")
                .field("id", item.id())
                .field("total", &item.total())
                .field("price_total", &item.price_total())
                .finish(),
        }
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// A frozen cart total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSummary {
    pub total: Money,
}

impl CartSummary {
    /// Creates a summary with the given total.
    pub fn new(total: impl Into<Money>) -> Self {
        CartSummary {
            total: total.into(),
        }
    }

    /// Sums the line totals of `items`.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::{CartSummary, LineItemSnapshot, Money};
    ///
    /// let items = [
    ///     LineItemSnapshot::new("1", Money::from_minor(999), 2),
    ///     LineItemSnapshot::new("2", Money::from_major(5), 1),
    /// ];
    /// let cart = CartSummary::from_items(&items);
    /// assert_eq!(cart.total, Money::from_minor(2498));
    /// ```
    pub fn from_items<T: LineItemTotals>(items: &[T]) -> Self {
        CartSummary {
            total: items.iter().map(LineItemTotals::total).sum(),
        }
    }
}

impl CartTotal for CartSummary {
    fn total(&self) -> Money {
        self.total
    }
}

/// A frozen line item.
///
/// ## Design Notes
/// - `price_total`: unit price × quantity, before any discount
/// - `total`: what this line contributes to the cart total; equals
///   `price_total` unless the host overrides it (e.g. tax-inclusive totals)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemSnapshot {
    pub id: ProductId,
    pub quantity: i64,
    pub price_total: Money,
    pub total: Money,
}

impl LineItemSnapshot {
    /// Creates a line from a unit price and quantity.
    pub fn new(id: impl Into<ProductId>, unit_price: Money, quantity: i64) -> Self {
        let price_total = unit_price * quantity;
        LineItemSnapshot {
            id: id.into(),
            quantity,
            price_total,
            total: price_total,
        }
    }

    /// Overrides the line's contribution to the cart total.
    pub fn with_total(mut self, total: Money) -> Self {
        self.total = total;
        self
    }
}

impl LineItemTotals for LineItemSnapshot {
    fn id(&self) -> &ProductId {
        &self.id
    }

    fn total(&self) -> Money {
        self.total
    }

    fn price_total(&self) -> Money {
        self.price_total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
