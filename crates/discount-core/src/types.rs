//! # Domain Types
//!
//! Small value types shared by every discount rule.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐               │
//! │  │    DiscountKind      │        │      ProductId       │               │
//! │  │  ──────────────────  │        │  ──────────────────  │               │
//! │  │  FixedProduct        │        │  opaque identifier   │               │
//! │  │  FixedCart           │        │  "42", "SKU-7", ...  │               │
//! │  │  Percent             │        │                      │               │
//! │  └──────────────────────┘        └──────────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::DiscountError;

// =============================================================================
// Discount Kind
// =============================================================================

/// What a discount rule does with its raw amount.
///
/// ## Kinds
/// | Kind           | Target     | Raw amount means          |
/// |----------------|------------|---------------------------|
/// | `FixedProduct` | line item  | flat currency off the line|
/// | `FixedCart`    | cart       | flat currency off the cart|
/// | `Percent`      | line item  | percentage points         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Flat amount off each included line item.
    FixedProduct,
    /// Flat amount off the cart total.
    FixedCart,
    /// Percentage of each included line item's price.
    Percent,
}

impl DiscountKind {
    /// All recognized kinds, in declaration order.
    pub const ALL: [DiscountKind; 3] = [
        DiscountKind::FixedProduct,
        DiscountKind::FixedCart,
        DiscountKind::Percent,
    ];

    /// Returns the wire name (`fixed_product`, `fixed_cart`, `percent`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::FixedProduct => "fixed_product",
            DiscountKind::FixedCart => "fixed_cart",
            DiscountKind::Percent => "percent",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a free-text kind.
///
/// ## Example
/// ```rust
/// use discount_core::types::DiscountKind;
///
/// assert_eq!("percent".parse::<DiscountKind>().unwrap(), DiscountKind::Percent);
/// assert!("bogo".parse::<DiscountKind>().is_err());
/// ```
impl FromStr for DiscountKind {
    type Err = DiscountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiscountKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DiscountError::InvalidDiscountKind {
                kind: s.to_string(),
            })
    }
}

// =============================================================================
// Product Identifier
// =============================================================================

/// Identifier of a product as seen by the inclusion filter.
///
/// Hosts key products by numbers or by strings; both are normalized to text
/// so `42` and `"42"` name the same product. Deserialization accepts either
/// form and rejects empty text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawProductId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        match RawProductId::deserialize(deserializer)? {
            RawProductId::Unsigned(id) => Ok(ProductId::from(id)),
            RawProductId::Signed(id) => Ok(ProductId::from(id)),
            RawProductId::Text(id) if id.trim().is_empty() => {
                Err(de::Error::custom("product id must not be empty"))
            }
            RawProductId::Text(id) => Ok(ProductId::from(id.trim())),
        }
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
