//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents fix addition but not percent-of-remainder:               │
//! │    (99.99 - 5.00) × 12.5% = 11.87375  → cents lose the tail             │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    Every discount amount is exact. Rounding is an explicit,             │
//! │    separate step the host chooses to take (see `round_dp`).             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//! let total = price + Money::from_major(5);      // 15.99
//! assert_eq!(total.amount(), Decimal::new(1599, 2));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Denominator for percentage points (10 = 10%).
pub const PERCENT_BASE: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal in major currency units.
///
/// ## Design Decisions
/// - **Signed**: discounts may be configured negative (surcharges)
/// - **Single field tuple struct**: zero-cost wrapper around `Decimal`
/// - **Serde**: transparent, so `5`, `"5"` and `5.00` all deserialize
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.price_total ──► Percent base ──► discount amount              │
/// │                                                                         │
/// │  Cart.total / LineItem.total ──► minimum / maximum gates                │
/// │                                                                         │
/// │  DiscountRule.amount ──► flat deduction for fixed kinds                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Creates a Money value from an exact decimal.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from a whole number of major units.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::from_major(20).amount(), Decimal::from(20));
    /// ```
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Creates a Money value from minor units (cents for two-decimal currencies).
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::from_minor(950).amount(), Decimal::new(95, 1));
    /// ```
    #[inline]
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, 2))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Takes `percent` percentage points of this amount.
    ///
    /// `percent` is expressed in points, so `10` means 10%. Returns `None`
    /// when the product does not fit in a `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let base = Money::from_major(95);
    /// let off = base.percent_of(Decimal::from(10)).unwrap();
    /// assert_eq!(off.amount(), Decimal::new(95, 1)); // 9.5
    ///
    /// assert!(Money::new(Decimal::MAX).percent_of(Decimal::from(200)).is_none());
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Line price total: 100.00
    /// Already deducted:   5.00 (higher-priority rule)
    ///      │
    ///      ▼
    /// percent_of(10) on 95.00 ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Discount: 9.50
    /// ```
    pub fn percent_of(&self, percent: Decimal) -> Option<Money> {
        self.0
            .checked_mul(percent)
            .and_then(|points| points.checked_div(PERCENT_BASE))
            .map(Money)
    }

    /// Rounds to `dp` decimal places, midpoint away from zero.
    ///
    /// Calculation never rounds on its own; this is for hosts that present or
    /// persist amounts at currency precision.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let exact = Money::new(Decimal::new(11_87375, 5)); // 11.87375
    /// assert_eq!(exact.round_dp(2).amount(), Decimal::new(1187, 2));
    /// ```
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal (no currency symbol).
///
/// ## Note
/// This is for logs and debugging. Currency formatting belongs to the host.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(20).amount(), dec!(20));
        assert_eq!(Money::from_minor(1099).amount(), dec!(10.99));
        assert_eq!(Money::new(dec!(9.5)).amount(), dec!(9.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_minor(500)), "5");
        assert_eq!(format!("{}", Money::new(dec!(-5.50))), "-5.5");
        assert_eq!(format!("{}", Money::zero()), "0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!((a + b).amount(), dec!(15));
        assert_eq!((a - b).amount(), dec!(5));
        assert_eq!((a * 3).amount(), dec!(30));

        let mut c = a;
        c += b;
        c -= Money::from_major(1);
        assert_eq!(c.amount(), dec!(14));
    }

    #[test]
    fn test_percent_of_remainder() {
        // (100 - 5) × 10% = 9.5
        let base = Money::from_major(100) - Money::from_major(5);
        assert_eq!(base.percent_of(dec!(10)).unwrap().amount(), dec!(9.5));
    }

    #[test]
    fn test_percent_of_keeps_fractional_cents() {
        let base = Money::new(dec!(94.99));
        assert_eq!(base.percent_of(dec!(12.5)).unwrap().amount(), dec!(11.87375));
    }

    #[test]
    fn test_round_dp_midpoint_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).round_dp(2).amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(-0.125)).round_dp(2).amount(), dec!(-0.13));
        assert_eq!(Money::new(dec!(0.124)).round_dp(2).amount(), dec!(0.12));
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_minor(1).is_zero());
    }

    #[test]
    fn test_overflow_is_none() {
        let huge = Money::new(Decimal::MAX / dec!(2));
        assert_eq!(huge.percent_of(dec!(200)), None);
        assert_eq!(huge.percent_of(dec!(1)), Some(Money::new(huge.amount() / dec!(100))));

        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_sub(Money::new(-Decimal::MAX)), None);
        assert_eq!(max.checked_sub(max), Some(Money::zero()));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_major(1), Money::from_minor(250)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), dec!(3.50));
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("12.5").unwrap();
        let from_string: Money = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.amount(), dec!(12.5));
    }
}
