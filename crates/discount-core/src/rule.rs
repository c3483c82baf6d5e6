//! # Discount Rule
//!
//! One discount definition and its evaluation.
//!
//! ## Evaluation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 calculate_amount(target, already_deducted)              │
//! │                                                                         │
//! │  1. amount = raw amount                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. minimum gate: minimum_amount > target.total ?  ──► amount = 0       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. maximum gate: maximum_amount < target.total ?  ──► amount = 0       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. kind dispatch                                                       │
//! │     ├── FixedProduct: item & included  ? amount : 0                     │
//! │     ├── FixedCart:    cart             ? amount : 0                     │
//! │     └── Percent:      item & included  ? base × amount / 100 : 0        │
//! │                       base = price_total (priority == 0)                │
//! │                            = price_total − already_deducted (else)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. return amount                                                       │
//! │                                                                         │
//! │  Later steps only ever zero an amount, they never raise it again.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::{DiscountKind, DiscountRule, LineItemSnapshot, Money, Target};
//! use rust_decimal::Decimal;
//!
//! let rule = DiscountRule::new(DiscountKind::Percent, Decimal::from(10), "Spring sale")
//!     .with_priority(1);
//! let item = LineItemSnapshot::new("42", Money::from_major(100), 1);
//!
//! // A higher-priority rule already took 5.00 off this line.
//! let off = rule.calculate_amount(Target::item(&item), Money::from_major(5));
//! assert_eq!(off, Money::from_minor(950));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use ts_rs::TS;

use crate::error::{DiscountError, DiscountResult};
use crate::money::Money;
use crate::options::DiscountOptions;
use crate::target::{LineItemTotals, Target};
use crate::types::DiscountKind;
use crate::validation::parse_kind;

// =============================================================================
// Discount Rule
// =============================================================================

/// An immutable discount rule.
///
/// ## Fields
/// - `kind`: which branch of the evaluation is live
/// - `amount`: raw amount, currency units for fixed kinds, percentage points
///   for `Percent`; never modified by evaluation
/// - `name`: display label, ignored by calculation
/// - `priority`: only `0` vs non-`0` matters, and only for `Percent`
/// - `options`: gates and inclusion filter
///
/// A rule holds no evaluation state, so it is `Send + Sync` and can be
/// evaluated from many threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    kind: DiscountKind,
    amount: Decimal,
    name: String,
    priority: i32,
    options: DiscountOptions,
}

impl DiscountRule {
    /// Creates a rule with priority 0 and no options.
    pub fn new(kind: DiscountKind, amount: Decimal, name: impl Into<String>) -> Self {
        let rule = DiscountRule {
            kind,
            amount,
            name: name.into(),
            priority: 0,
            options: DiscountOptions::default(),
        };
        debug!(rule = %rule.name, kind = %rule.kind, amount = %rule.amount, "discount rule created");
        rule
    }

    /// Creates a rule from a free-text kind.
    ///
    /// ## Errors
    /// `DiscountError::InvalidDiscountKind` if `kind` is not a recognized
    /// kind. Unknown kinds are never accepted and evaluated later.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::DiscountRule;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(DiscountRule::try_new("fixed_cart", Decimal::from(20), "Welcome").is_ok());
    /// assert!(DiscountRule::try_new("bogo", Decimal::from(20), "Welcome").is_err());
    /// ```
    pub fn try_new(kind: &str, amount: Decimal, name: impl Into<String>) -> DiscountResult<Self> {
        Ok(DiscountRule::new(parse_kind(kind)?, amount, name))
    }

    /// Builds a rule from a full definition record.
    ///
    /// ## Errors
    /// - `InvalidDiscountKind` for an unknown `type`
    /// - `Validation` for a malformed option bag
    pub fn from_definition(definition: &DiscountDefinition) -> DiscountResult<Self> {
        let options = DiscountOptions::from_bag(&definition.options)?;

        Ok(DiscountRule::try_new(&definition.kind, definition.amount, definition.name.clone())?
            .with_priority(definition.priority)
            .with_options(options))
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the options.
    pub fn with_options(mut self, options: DiscountOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    /// Raw amount as configured.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn options(&self) -> &DiscountOptions {
        &self.options
    }

    /// Whether the inclusion filter lets `item` through.
    ///
    /// See [`DiscountOptions::includes`] for the allow/deny precedence.
    pub fn includes_item<I: LineItemTotals + ?Sized>(&self, item: &I) -> bool {
        self.options.includes(item.id())
    }

    /// Computes how much this rule takes off `target`.
    ///
    /// `already_deducted` is the sum of discounts that higher-priority rules
    /// already took off this item; it only matters for `Percent` rules with a
    /// non-zero priority. Pass [`Money::zero`] otherwise.
    ///
    /// Never fails: a wrong target, a fired gate, an excluded item or a
    /// percent result outside the `Decimal` range yields zero. Same inputs
    /// always give the same result.
    pub fn calculate_amount(&self, target: Target<'_>, already_deducted: Money) -> Money {
        let mut amount = Money::new(self.amount);
        let total = target.total();

        if self.options.below_minimum(total) {
            trace!(rule = %self.name, %total, "below minimum amount");
            amount = Money::zero();
        }

        if self.options.above_maximum(total) {
            trace!(rule = %self.name, %total, "above maximum amount");
            amount = Money::zero();
        }

        let amount = match (self.kind, target) {
            (DiscountKind::FixedProduct, Target::Item(item)) => {
                if self.includes_item(item) {
                    amount
                } else {
                    trace!(rule = %self.name, id = %item.id(), "item not included");
                    Money::zero()
                }
            }
            (DiscountKind::FixedCart, Target::Cart(_)) => amount,
            (DiscountKind::Percent, Target::Item(item)) => {
                if self.includes_item(item) {
                    let base = if self.priority != 0 {
                        item.price_total().checked_sub(already_deducted)
                    } else {
                        Some(item.price_total())
                    };
                    match base.and_then(|base| base.percent_of(amount.amount())) {
                        Some(discount) => discount,
                        None => {
                            warn!(rule = %self.name, id = %item.id(), "percent discount overflowed");
                            Money::zero()
                        }
                    }
                } else {
                    trace!(rule = %self.name, id = %item.id(), "item not included");
                    Money::zero()
                }
            }
            (DiscountKind::FixedProduct | DiscountKind::Percent, Target::Cart(_))
            | (DiscountKind::FixedCart, Target::Item(_)) => {
                trace!(rule = %self.name, kind = %self.kind, applied_to = target.label(), "kind does not apply to target");
                Money::zero()
            }
        };

        debug!(rule = %self.name, kind = %self.kind, applied_to = target.label(), %amount, "discount calculated");
        amount
    }

    /// [`calculate_amount`](Self::calculate_amount) with nothing deducted yet.
    pub fn calculate_amount_for(&self, target: Target<'_>) -> Money {
        self.calculate_amount(target, Money::zero())
    }

    /// Serializable view of the rule.
    ///
    /// The view carries `type`, `amount`, `name` and `options`; `priority` is
    /// not part of it.
    pub fn to_view(&self) -> DiscountView {
        DiscountView {
            kind: self.kind,
            amount: self.amount,
            name: self.name.clone(),
            options: self.options.clone(),
        }
    }

    /// JSON encoding of [`to_view`](Self::to_view).
    pub fn to_json(&self) -> DiscountResult<String> {
        Ok(serde_json::to_string(&self.to_view())?)
    }
}

impl TryFrom<&DiscountDefinition> for DiscountRule {
    type Error = DiscountError;

    fn try_from(definition: &DiscountDefinition) -> Result<Self, Self::Error> {
        DiscountRule::from_definition(definition)
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Serialized view of a rule: `{ type, amount, name, options }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountView {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[ts(as = "String")]
    pub amount: Decimal,
    pub name: String,
    pub options: DiscountOptions,
}

/// Everything needed to build a rule, as it arrives from config or an admin
/// form.
///
/// `type` stays free text and `options` stays a loose bag until
/// [`DiscountRule::from_definition`] checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub options: Map<String, Value>,
}

// =============================================================================
// Unit Tests
// =============================================================================
