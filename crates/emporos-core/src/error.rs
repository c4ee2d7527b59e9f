//! # Error Types
//!
//! Domain-specific error types for emporos-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every variant is a recoverable, caller-visible condition; the core
//!    never swallows a failure and substitutes a default monetary or stock
//!    value
//!
//! Flow: `ValidationError` → `CoreError` → `StoreError` (emporos-store) →
//! whatever presentation layer sits on top.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations. They are reported synchronously
/// at the point of the offending call and are never retried internally.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced catalog item does not exist.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Requested quantity exceeds current stock.
    ///
    /// Always reported to the caller, never silently truncated. The ledger
    /// guarantees neither stock nor the sold counter moved.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Finalize attempted on a bill with zero lines.
    #[error("Cannot finalize a bill with no items")]
    EmptyBill,

    /// Mutation attempted on a finalized bill.
    #[error("Bill {bill_number} is already finalized")]
    AlreadyFinalized { bill_number: String },

    /// Referenced bill line does not exist in the bill being assembled.
    #[error("Line not found in bill: {0}")]
    LineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These cover the `InvalidArgument`/`InvalidQuantity` class of failures:
/// a negative or zero value where a positive one is required, or an
/// out-of-range percentage. Used for early validation before business
/// logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive (> 0).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
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
    fn test_insufficient_stock_message_names_the_item() {
        let err = CoreError::InsufficientStock {
            name: "Laptop".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Laptop: available 3, requested 5"
        );
    }

    #[test]
    fn test_empty_bill_message_is_distinct_from_stock_failure() {
        let empty = CoreError::EmptyBill.to_string();
        let stock = CoreError::InsufficientStock {
            name: "Laptop".to_string(),
            available: 0,
            requested: 1,
        }
        .to_string();
        assert_ne!(empty, stock);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
