//! # Discount Options
//!
//! The optional constraints attached to a discount rule.
//!
//! ## Option Set
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key                  │ type              │ effect                      │
//! │  ─────────────────────┼───────────────────┼──────────────────────────── │
//! │  minimum_amount       │ decimal           │ total < floor   → 0         │
//! │  maximum_amount       │ decimal           │ total > ceiling → 0         │
//! │  product_ids          │ set of ids        │ allow-list for line items   │
//! │  exclude_product_ids  │ set of ids        │ deny-list, wins over allow  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any other key in an incoming bag is ignored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;
use ts_rs::TS;

use crate::money::Money;
use crate::types::ProductId;
use crate::validation::{parse_decimal, parse_id_set, ValidationResult};

/// Wire key for the minimum total gate.
pub const MINIMUM_AMOUNT: &str = "minimum_amount";
/// Wire key for the maximum total gate.
pub const MAXIMUM_AMOUNT: &str = "maximum_amount";
/// Wire key for the product allow-list.
pub const PRODUCT_IDS: &str = "product_ids";
/// Wire key for the product deny-list.
pub const EXCLUDE_PRODUCT_IDS: &str = "exclude_product_ids";

/// Typed option set of a discount rule.
///
/// Every field is optional; an empty option set never gates and includes
/// every item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountOptions {
    /// The target total must be at least this much.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub minimum_amount: Option<Money>,

    /// The target total must be at most this much.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub maximum_amount: Option<Money>,

    /// Only these products are discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub product_ids: Option<BTreeSet<ProductId>>,

    /// These products are never discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub exclude_product_ids: Option<BTreeSet<ProductId>>,
}

impl DiscountOptions {
    /// Creates an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum total.
    pub fn minimum_amount(mut self, amount: impl Into<Money>) -> Self {
        self.minimum_amount = Some(amount.into());
        self
    }

    /// Sets the maximum total.
    pub fn maximum_amount(mut self, amount: impl Into<Money>) -> Self {
        self.maximum_amount = Some(amount.into());
        self
    }

    /// Sets the product allow-list.
    pub fn product_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProductId>,
    {
        self.product_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the product deny-list.
    pub fn exclude_product_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProductId>,
    {
        self.exclude_product_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Builds options from a loosely typed, string-keyed bag.
    ///
    /// ## Rules
    /// - Recognized keys are coerced (see [`crate::validation`])
    /// - A recognized key holding `null` counts as absent
    /// - Unrecognized keys are ignored
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::DiscountOptions;
    /// use serde_json::json;
    ///
    /// let bag = json!({ "minimum_amount": "50", "product_ids": [1, 2], "color": "red" });
    /// let options = DiscountOptions::from_bag(bag.as_object().unwrap()).unwrap();
    /// assert!(options.minimum_amount.is_some());
    /// assert_eq!(options.product_ids.unwrap().len(), 2);
    /// ```
    pub fn from_bag(bag: &Map<String, Value>) -> ValidationResult<Self> {
        let mut options = DiscountOptions::default();

        for (key, value) in bag {
            if value.is_null() {
                continue;
            }

            match key.as_str() {
                MINIMUM_AMOUNT => {
                    options.minimum_amount = Some(Money::new(parse_decimal(key, value)?));
                }
                MAXIMUM_AMOUNT => {
                    options.maximum_amount = Some(Money::new(parse_decimal(key, value)?));
                }
                PRODUCT_IDS => options.product_ids = Some(parse_id_set(key, value)?),
                EXCLUDE_PRODUCT_IDS => {
                    options.exclude_product_ids = Some(parse_id_set(key, value)?);
                }
                other => trace!(key = other, "ignoring unrecognized discount option"),
            }
        }

        Ok(options)
    }

    /// Returns true when no option is set.
    pub fn is_empty(&self) -> bool {
        self.minimum_amount.is_none()
            && self.maximum_amount.is_none()
            && self.product_ids.is_none()
            && self.exclude_product_ids.is_none()
    }

    /// Whether the minimum gate zeroes a discount for a target with `total`.
    ///
    /// The total must meet or exceed the floor; equality passes.
    pub fn below_minimum(&self, total: Money) -> bool {
        self.minimum_amount.is_some_and(|minimum| minimum > total)
    }

    /// Whether the maximum gate zeroes a discount for a target with `total`.
    ///
    /// The total must not exceed the ceiling; equality passes.
    pub fn above_maximum(&self, total: Money) -> bool {
        self.maximum_amount.is_some_and(|maximum| maximum < total)
    }

    /// Inclusion filter for line items.
    ///
    /// ## Rules
    /// ```text
    /// include = true
    /// product_ids present         → include = id ∈ product_ids
    /// exclude_product_ids present → include = id ∉ exclude_product_ids
    /// ```
    /// The deny-list is evaluated last and overwrites the allow-list result,
    /// so an id on both lists is excluded, and an id on neither list is
    /// included whenever a deny-list is present.
    pub fn includes(&self, id: &ProductId) -> bool {
        let mut include = true;

        if let Some(product_ids) = &self.product_ids {
            include = product_ids.contains(id);
        }

        if let Some(excluded) = &self.exclude_product_ids {
            include = !excluded.contains(id);
        }

        include
    }
}

impl TryFrom<&Map<String, Value>> for DiscountOptions {
    type Error = crate::error::ValidationError;

    fn try_from(bag: &Map<String, Value>) -> Result<Self, Self::Error> {
        DiscountOptions::from_bag(bag)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test bag must be an object"),
        }
    }

    #[test]
    fn test_empty_options_gate_nothing_and_include_everything() {
        let options = DiscountOptions::new();
        assert!(options.is_empty());
        assert!(!options.below_minimum(Money::zero()));
        assert!(!options.above_maximum(Money::from_major(1_000_000)));
        assert!(options.includes(&ProductId::from("anything")));
    }

    #[test]
    fn test_minimum_gate_is_inclusive() {
        let options = DiscountOptions::new().minimum_amount(dec!(100));
        assert!(options.below_minimum(Money::from_major(99)));
        assert!(!options.below_minimum(Money::from_major(100)));
        assert!(!options.below_minimum(Money::from_major(150)));
    }

    #[test]
    fn test_maximum_gate_is_inclusive() {
        let options = DiscountOptions::new().maximum_amount(dec!(100));
        assert!(!options.above_maximum(Money::from_major(99)));
        assert!(!options.above_maximum(Money::from_major(100)));
        assert!(options.above_maximum(Money::new(dec!(100.01))));
    }

    #[test]
    fn test_allow_list() {
        let options = DiscountOptions::new().product_ids(["7"]);
        assert!(options.includes(&ProductId::from("7")));
        assert!(!options.includes(&ProductId::from("42")));
    }

    #[test]
    fn test_deny_list() {
        let options = DiscountOptions::new().exclude_product_ids([42_u64]);
        assert!(!options.includes(&ProductId::from("42")));
        assert!(options.includes(&ProductId::from("7")));
    }

    #[test]
    fn test_deny_list_overrides_allow_list() {
        let options = DiscountOptions::new()
            .product_ids(["A"])
            .exclude_product_ids(["A"]);
        assert!(!options.includes(&ProductId::from("A")));
    }

    #[test]
    fn test_deny_list_overwrites_allow_list_miss() {
        // Not on the allow-list, not on the deny-list: the deny-list result wins.
        let options = DiscountOptions::new()
            .product_ids(["A"])
            .exclude_product_ids(["B"]);
        assert!(options.includes(&ProductId::from("C")));
    }

    #[test]
    fn test_from_bag_coerces_recognized_keys() {
        let options = DiscountOptions::from_bag(&bag(json!({
            "minimum_amount": "50",
            "maximum_amount": 500,
            "product_ids": [1, "2"],
            "exclude_product_ids": [3],
            "label": "ignored"
        })))
        .unwrap();

        assert_eq!(options.minimum_amount, Some(Money::from_major(50)));
        assert_eq!(options.maximum_amount, Some(Money::from_major(500)));
        assert_eq!(options.product_ids.as_ref().map(BTreeSet::len), Some(2));
        assert!(!options.includes(&ProductId::from(3_u64)));
    }

    #[test]
    fn test_from_bag_treats_null_as_absent() {
        let options = DiscountOptions::try_from(&bag(json!({ "minimum_amount": null }))).unwrap();
        assert!(options.is_empty());
    }

    #[test]
    fn test_from_bag_rejects_malformed_values() {
        assert!(DiscountOptions::from_bag(&bag(json!({ "minimum_amount": "cheap" }))).is_err());
        assert!(DiscountOptions::from_bag(&bag(json!({ "product_ids": [{}] }))).is_err());
    }

    #[test]
    fn test_serde_skips_absent_and_ignores_unknown() {
        let options: DiscountOptions =
            serde_json::from_str(r#"{"minimum_amount": 10, "unknown": true}"#).unwrap();
        assert_eq!(options.minimum_amount, Some(Money::from_major(10)));

        let json = serde_json::to_string(&DiscountOptions::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_serde_accepts_numeric_product_ids() {
        let raw = json!({ "product_ids": [7], "exclude_product_ids": ["7", 8] });

        let options: DiscountOptions = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(options, DiscountOptions::from_bag(&bag(raw)).unwrap());
        assert!(!options.includes(&ProductId::from(7_u64)));
    }
}
