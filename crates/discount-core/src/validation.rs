//! # Validation Module
//!
//! Converts loosely typed discount input into strongly typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Discount Input Comes From                    │
//! │                                                                         │
//! │  Admin UI / config file / import job                                    │
//! │  └── JSON option bag: { "minimum_amount": "50", "product_ids": [1,2] }  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: value coercion                                            │
//! │  ├── decimals from numbers or numeric strings                           │
//! │  ├── id sets from arrays of strings or integers                         │
//! │  └── kinds from free text (unknown → error, never silent)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  DiscountOptions / DiscountKind (typed, checked once at construction)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::validation::{parse_decimal, parse_kind};
//! use serde_json::json;
//!
//! assert!(parse_decimal("minimum_amount", &json!("49.99")).is_ok());
//! assert!(parse_decimal("minimum_amount", &json!("lots")).is_err());
//! assert!(parse_kind("percent").is_ok());
//! ```

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{DiscountError, DiscountResult, ValidationError};
use crate::types::{DiscountKind, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Kind Validators
// =============================================================================

/// Parses a free-text discount kind.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty → `ValidationError::Required`
/// - Anything but `fixed_product`, `fixed_cart`, `percent` →
///   `DiscountError::InvalidDiscountKind`
///
/// ## Example
/// ```rust
/// use discount_core::validation::parse_kind;
/// use discount_core::DiscountKind;
///
/// assert_eq!(parse_kind(" fixed_cart ").unwrap(), DiscountKind::FixedCart);
/// assert!(parse_kind("").is_err());
/// assert!(parse_kind("bogo").is_err());
/// ```
pub fn parse_kind(kind: &str) -> DiscountResult<DiscountKind> {
    let kind = kind.trim();

    if kind.is_empty() {
        return Err(DiscountError::Validation(ValidationError::Required {
            field: "type".to_string(),
        }));
    }

    DiscountKind::from_str(kind)
}

// =============================================================================
// Value Validators
// =============================================================================

/// Coerces a JSON value into an exact decimal.
///
/// ## Rules
/// - JSON numbers are accepted as written
/// - Strings are accepted if they parse as a decimal (`"49.99"`)
/// - Anything else (bool, array, object, null) is rejected
pub fn parse_decimal(field: &str, value: &Value) -> ValidationResult<Decimal> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    match value {
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .map_err(|_| invalid("number is out of decimal range")),
        Value::String(text) => {
            Decimal::from_str(text.trim()).map_err(|_| invalid("expected a decimal number"))
        }
        _ => Err(invalid("expected a decimal number")),
    }
}

/// Coerces a JSON value into a set of product ids.
///
/// ## Rules
/// - Must be an array (a lone scalar is accepted as a one-element set)
/// - Elements may be strings or integers; `42` and `"42"` are the same id
/// - Empty strings and non-scalar elements are rejected
///
/// ## Example
/// ```rust
/// use discount_core::validation::parse_id_set;
/// use discount_core::ProductId;
/// use serde_json::json;
///
/// let ids = parse_id_set("product_ids", &json!([7, "42"])).unwrap();
/// assert!(ids.contains(&ProductId::from("7")));
/// assert!(ids.contains(&ProductId::from(42_u64)));
/// ```
pub fn parse_id_set(field: &str, value: &Value) -> ValidationResult<BTreeSet<ProductId>> {
    match value {
        Value::Array(elements) => elements.iter().map(|el| parse_id(field, el)).collect(),
        scalar => parse_id(field, scalar).map(|id| BTreeSet::from([id])),
    }
}

fn parse_id(field: &str, value: &Value) -> ValidationResult<ProductId> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Ok(ProductId::from(text.trim())),
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            Ok(ProductId::new(number.to_string()))
        }
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "ids must be non-empty strings or integers".to_string(),
        }),
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

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("fixed_product").unwrap(), DiscountKind::FixedProduct);
        assert_eq!(parse_kind("  percent\n").unwrap(), DiscountKind::Percent);

        assert!(matches!(
            parse_kind("   "),
            Err(DiscountError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            parse_kind("Percent"),
            Err(DiscountError::InvalidDiscountKind { .. })
        ));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("x", &json!(100)).unwrap(), dec!(100));
        assert_eq!(parse_decimal("x", &json!(12.5)).unwrap(), dec!(12.5));
        assert_eq!(parse_decimal("x", &json!(" 49.99 ")).unwrap(), dec!(49.99));
        assert_eq!(parse_decimal("x", &json!(-3)).unwrap(), dec!(-3));

        assert!(parse_decimal("x", &json!("abc")).is_err());
        assert!(parse_decimal("x", &json!(true)).is_err());
        assert!(parse_decimal("x", &json!(null)).is_err());
        assert!(parse_decimal("x", &json!([1])).is_err());
    }

    #[test]
    fn test_parse_decimal_error_names_field() {
        let err = parse_decimal("maximum_amount", &json!("n/a")).unwrap_err();
        assert!(err.to_string().starts_with("maximum_amount"));
    }

    #[test]
    fn test_parse_id_set() {
        let ids = parse_id_set("product_ids", &json!([1, "2", 2])).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&ProductId::from("1")));
        assert!(ids.contains(&ProductId::from("2")));

        let single = parse_id_set("product_ids", &json!(7)).unwrap();
        assert_eq!(single, BTreeSet::from([ProductId::from("7")]));

        assert!(parse_id_set("product_ids", &json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_id_set_rejects_bad_elements() {
        assert!(parse_id_set("product_ids", &json!([""])).is_err());
        assert!(parse_id_set("product_ids", &json!([1.5])).is_err());
        assert!(parse_id_set("product_ids", &json!([{"id": 1}])).is_err());
        assert!(parse_id_set("product_ids", &json!(null)).is_err());
    }
}
