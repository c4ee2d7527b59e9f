//! # Validation Module
//!
//! Field-level input validation, run before business logic.
//!
//! These checks catch the `InvalidArgument` class of failures early:
//! non-positive quantities, negative prices, out-of-range percentages.
//! Business-rule checks (stock sufficiency, bill state) stay with their
//! components.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a sale or restock quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `cap` when one is configured (the per-line cap is a
///   deployment policy; `None` means unlimited)
///
/// ```rust
/// use emporos_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5, None).is_ok());
/// assert!(validate_quantity(0, None).is_err());
/// assert!(validate_quantity(101, Some(100)).is_err());
/// ```
pub fn validate_quantity(qty: i64, cap: Option<i64>) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if let Some(max) = cap {
        if qty > max {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max,
            });
        }
    }

    Ok(())
}

/// Validates a price in cents.
///
/// Zero is allowed (free items); negative is not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount rate in basis points.
///
/// A discount is a percentage of the subtotal, so it must fall in
/// [0%, 100%] inclusive, i.e. 0 to 10000 bps. (Tax rates have no upper
/// bound and need no check: basis points are unsigned.)
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_unlimited() {
        assert!(validate_quantity(1, None).is_ok());
        assert!(validate_quantity(100_000, None).is_ok());

        assert!(validate_quantity(0, None).is_err());
        assert!(validate_quantity(-1, None).is_err());
    }

    #[test]
    fn test_validate_quantity_with_cap() {
        assert!(validate_quantity(100, Some(100)).is_ok());
        assert!(validate_quantity(101, Some(100)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(10000).is_ok());
        assert!(validate_discount_bps(10001).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Laptop").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }
}
