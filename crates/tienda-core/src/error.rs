//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tienda-core errors (this file)                                        │
//! │  ├── CoreError        - Strict coupon lookups, wrapped validation      │
//! │  └── ValidationError  - Input / discount table validation failures     │
//! │                                                                         │
//! │  tienda-cli errors (separate crate)                                    │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI boundary)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails: an unknown coupon simply means no discount.
//! These errors only come from parsing, validation and strict lookups.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Coupon code is not in the discount table.
    ///
    /// ## When This Occurs
    /// Only from [`DiscountTable::require`](crate::coupon::DiscountTable::require).
    /// The regular pricing path ignores unknown coupons instead.
    #[error("Unknown coupon: {0}")]
    UnknownCoupon(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing caller input or building a discount table.
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., "12.3.4" as a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same coupon code twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
        let err = CoreError::UnknownCoupon("INVALIDO".to_string());
        assert_eq!(err.to_string(), "Unknown coupon: INVALIDO");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "coupon code".to_string(),
        };
        assert_eq!(err.to_string(), "coupon code is required");

        let err = ValidationError::OutOfRange {
            field: "discount_bps".to_string(),
            min: 0,
            max: 9999,
        };
        assert_eq!(err.to_string(), "discount_bps must be between 0 and 9999");

        let err = ValidationError::Duplicate {
            field: "coupon code".to_string(),
            value: "SUPER20".to_string(),
        };
        assert_eq!(err.to_string(), "coupon code 'SUPER20' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
