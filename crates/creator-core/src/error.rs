//! # Error Types
//!
//! Domain-specific error types for creator-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  creator-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── PayoutRejection  - Typed payout eligibility outcomes              │
//! │                                                                         │
//! │  creator-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → API layer → Frontend   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, IDs, field names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! ## PayoutRejection Is Not An Error
//! A rejected payout request is an *expected outcome* of the eligibility
//! rules, not a failure of the engine. It still lives here because it is
//! a typed, pattern-matchable result surface that callers translate into
//! user-facing messages, exactly like `ValidationError`.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Seller cannot be found.
    ///
    /// ## When This Occurs
    /// - Seller ID doesn't exist in database
    /// - Studio was deactivated (soft delete)
    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    /// Payout cannot be found.
    #[error("Payout not found: {0}")]
    PayoutNotFound(String),

    /// A payout status transition was requested that the lifecycle
    /// does not allow (e.g. completing a payout that already failed).
    #[error("Payout {payout_id} is {current_status}, cannot transition to {requested_status}")]
    InvalidPayoutTransition {
        payout_id: String,
        current_status: String,
        requested_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet the documented
/// preconditions. Used for early validation before any math runs, so the
/// calculators never produce numerically consistent but meaningless
/// output from nonsense input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Monetary value must not be negative.
    #[error("{field} must not be negative, got {cents} cents")]
    NegativeAmount { field: String, cents: i64 },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Payout Rejection
// =============================================================================

/// Typed outcome for a payout request that cannot be fulfilled.
///
/// ## The Two Rejection Kinds
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Request payout                                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  Any pending line items? ──── no ──► NoPendingItems                    │
/// │       │ yes                                                             │
/// │       ▼                                                                 │
/// │  net ≥ minimum threshold? ─── no ──► BelowMinimum { shortfall }        │
/// │       │ yes                                                             │
/// │       ▼                                                                 │
/// │  PayoutDraft (gross/fees/net snapshot + contributing orders)           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The `BelowMinimum` message carries the computed amounts so the
/// dashboard can show e.g. "Minimum payout is $500.00; current is
/// $320.14" without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayoutRejection {
    /// The seller has zero line items in `pending` status.
    #[error("No pending items eligible for payout")]
    NoPendingItems,

    /// Net pending earnings are below the configured minimum.
    #[error("Minimum payout is {minimum}; current is {net} (short by {shortfall})")]
    BelowMinimum {
        /// Configured minimum payout amount.
        minimum: Money,
        /// Net pending earnings (gross minus platform and processing fees).
        net: Money,
        /// How much more the seller needs to earn: `minimum - net`.
        shortfall: Money,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPayoutTransition {
            payout_id: "p-1".to_string(),
            current_status: "completed".to_string(),
            requested_status: "processing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Payout p-1 is completed, cannot transition to processing"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::NegativeAmount {
            field: "base_price".to_string(),
            cents: -100,
        };
        assert_eq!(
            err.to_string(),
            "base_price must not be negative, got -100 cents"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "seller_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_below_minimum_carries_shortfall() {
        let rejection = PayoutRejection::BelowMinimum {
            minimum: Money::from_cents(50000),
            net: Money::from_cents(32014),
            shortfall: Money::from_cents(17986),
        };
        assert_eq!(
            rejection.to_string(),
            "Minimum payout is $500.00; current is $320.14 (short by $179.86)"
        );
    }
}
