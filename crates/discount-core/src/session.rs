//! # Cart Session
//!
//! Holds the caller's "current cart" explicitly.
//!
//! ## Why a Session?
//! Evaluating a cart-level discount needs a cart. Instead of reaching for a
//! process-wide "current cart", the host creates one `CartSession` per
//! checkout (request, terminal, user) and hands it to whoever evaluates
//! discounts.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Clones of the session share the same cart
//! 2. Only one caller should modify the cart at a time
//! 3. Discount evaluation only needs a short read lock
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Host Action              Session Method            Cart Access         │
//! │  ───────────              ──────────────            ───────────         │
//! │                                                                         │
//! │  Add / remove items ─────► with_cart_mut() ───────► exclusive           │
//! │                                                                         │
//! │  Show totals ────────────► with_cart() ───────────► read, released      │
//! │                                                                         │
//! │  Cart-level discount ────► calculate_cart_discount()► read, released    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::money::Money;
use crate::rule::DiscountRule;
use crate::target::{CartTotal, Target};

/// Shared handle to one active cart.
#[derive(Debug)]
pub struct CartSession<C> {
    cart: Arc<Mutex<C>>,
}

impl<C: CartTotal> CartSession<C> {
    /// Starts a session around `cart`.
    pub fn new(cart: C) -> Self {
        CartSession {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use discount_core::{CartSession, CartSummary, Money};
    ///
    /// let session = CartSession::new(CartSummary::new(Money::from_major(40)));
    /// let total = session.with_cart(|cart| cart.total);
    /// assert_eq!(total, Money::from_major(40));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&C) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut C) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Evaluates `rule` against the session's cart.
    ///
    /// This is the explicit replacement for "evaluate against whatever the
    /// current cart is".
    pub fn calculate_cart_discount(&self, rule: &DiscountRule) -> Money {
        self.with_cart(|cart| rule.calculate_amount_for(Target::cart(cart)))
    }

    /// Sum of every rule's cart-level amount, in the order given.
    ///
    /// Per-item kinds contribute zero here.
    pub fn total_cart_discount<'r, I>(&self, rules: I) -> Money
    where
        I: IntoIterator<Item = &'r DiscountRule>,
    {
        self.with_cart(|cart| {
            rules
                .into_iter()
                .map(|rule| rule.calculate_amount_for(Target::cart(cart)))
                .sum()
        })
    }

    /// Acquires the cart, recovering the guard from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, C> {
        self.cart.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("cart session mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl<C> Clone for CartSession<C> {
    fn clone(&self) -> Self {
        CartSession {
            cart: Arc::clone(&self.cart),
        }
    }
}

impl<C: CartTotal + Default> Default for CartSession<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}
