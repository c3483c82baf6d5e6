//! # discount-core: Pure Discount Calculation
//!
//! This crate answers one question: *how much does this discount rule take
//! off this line item, or off this cart?* It is a pure calculation unit with
//! no database, network or global state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host cart system (external)                     │   │
//! │  │   items, quantities, totals, which rules apply, stacking order  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Target::Cart / Target::Item            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ discount-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   rule    │  │  options  │  │  target   │  │   money   │  │   │
//! │  │   │ Discount  │  │  gates    │  │   Cart    │  │  Decimal  │  │   │
//! │  │   │   Rule    │  │ inclusion │  │   Item    │  │  amounts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • NO GLOBALS • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rule`] - `DiscountRule` and `calculate_amount`
//! - [`options`] - minimum/maximum gates and the inclusion filter
//! - [`target`] - cart / line item collaborator traits and snapshots
//! - [`money`] - exact decimal `Money`
//! - [`types`] - `DiscountKind`, `ProductId`
//! - [`validation`] - coercion of loosely typed input
//! - [`session`] - explicit "current cart" holder
//! - [`config`] - loading definitions at startup
//! - [`error`] - domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same rule + same target = same amount
//! 2. **No Implicit Cart**: the target is always passed in
//! 3. **Exact Money**: decimals end to end, rounding only on request
//! 4. **Fail Early**: unknown kinds are rejected when a rule is built
//!
//! ## Example Usage
//!
//! ```rust
//! use discount_core::{CartSummary, DiscountKind, DiscountOptions, DiscountRule, Money, Target};
//! use rust_decimal::Decimal;
//!
//! let rule = DiscountRule::new(DiscountKind::FixedCart, Decimal::from(20), "Welcome")
//!     .with_options(DiscountOptions::new().minimum_amount(Decimal::from(100)));
//!
//! let cart = CartSummary::new(Money::from_major(150));
//! assert_eq!(rule.calculate_amount_for(Target::cart(&cart)), Money::from_major(20));
//!
//! let small = CartSummary::new(Money::from_major(50));
//! assert!(rule.calculate_amount_for(Target::cart(&small)).is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod money;
pub mod options;
pub mod rule;
pub mod session;
pub mod target;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use discount_core::Money` instead of
// `use discount_core::money::Money`

pub use config::{ConfigError, DiscountConfig};
pub use error::{DiscountError, DiscountResult, ValidationError};
pub use money::Money;
pub use options::DiscountOptions;
pub use rule::{DiscountDefinition, DiscountRule, DiscountView};
pub use session::CartSession;
pub use target::{CartSummary, CartTotal, LineItemSnapshot, LineItemTotals, Target};
pub use types::{DiscountKind, ProductId};
