//! # Error Types
//!
//! Domain-specific error types for discount-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  discount-core errors (this file)                                       │
//! │  ├── DiscountError    - Rule construction failures                      │
//! │  └── ValidationError  - Option bag / input validation failures          │
//! │                                                                         │
//! │  config errors (config.rs)                                              │
//! │  └── ConfigError      - Startup configuration failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → DiscountError → ConfigError → Host             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! `DiscountRule::calculate_amount` cannot fail. Every anomaly at evaluation
//! time (wrong target, gate fired, item excluded) degrades to a zero amount.
//! Errors only happen while *building* rules.

use thiserror::Error;

// =============================================================================
// Discount Error
// =============================================================================

/// Errors raised while constructing a discount rule.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// The discount kind is not one of the recognized kinds.
    ///
    /// ## When This Occurs
    /// - A definition says `"type": "bogo"` or any other unknown tag
    /// - A typo such as `"fixed-cart"` instead of `"fixed_cart"`
    ///
    /// Unknown kinds are rejected up front so they can never slip through
    /// evaluation and return an unconverted raw amount.
    #[error("Invalid discount kind: {kind}")]
    InvalidDiscountKind { kind: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a loosely typed option bag or definition does not
/// meet the expected shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., non-numeric minimum amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DiscountError.
pub type DiscountResult<T> = Result<T, DiscountError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DiscountError::InvalidDiscountKind {
            kind: "bogo".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid discount kind: bogo");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "type".to_string(),
        };
        assert_eq!(err.to_string(), "type is required");

        let err = ValidationError::InvalidFormat {
            field: "minimum_amount".to_string(),
            reason: "expected a decimal number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "minimum_amount has invalid format: expected a decimal number"
        );
    }

    #[test]
    fn test_validation_converts_to_discount_error() {
        let validation_err = ValidationError::Required {
            field: "type".to_string(),
        };
        let err: DiscountError = validation_err.into();
        assert!(matches!(err, DiscountError::Validation(_)));
    }
}
