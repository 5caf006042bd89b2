//! # Validation Module
//!
//! Input validation for callers of the pricing calculator.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Caller (CLI / web handler)                                            │
//! │  ├── Parse text into Money / TaxRate                                   │
//! │  └── validate_price, validate_tax_rate  ← THIS MODULE                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pricing (apply_coupon, compute_final_price)                           │
//! │  └── NO validation: unknown coupons mean "no discount"                 │
//! │                                                                         │
//! │  Discount table construction                                           │
//! │  └── validate_coupon_code for every key  ← THIS MODULE                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::money::Money;
//! use tienda_core::validation::validate_price;
//!
//! assert!(validate_price(Money::from_cents(10000)).is_ok());
//! assert!(validate_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{TaxRate, BPS_SCALE};
use crate::MAX_COUPON_CODE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`Money::MAX`], so the taxed total cannot overflow
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if price > Money::MAX {
        return Err(ValidationError::OutOfRange {
            field: "price_cents".to_string(),
            min: 0,
            max: Money::MAX.cents(),
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0 and 10000 bps (0% to 100%)
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate_bps".to_string(),
            min: 0,
            max: i64::from(BPS_SCALE),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code used as a discount table key.
///
/// Caller-supplied coupons are never validated; they are only normalized.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_COUPON_CODE_LEN`] characters
/// - ASCII letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use tienda_core::validation::validate_coupon_code;
///
/// assert!(validate_coupon_code("BIENVENIDA").is_ok());
/// assert!(validate_coupon_code(" super-20 ").is_ok());
/// assert!(validate_coupon_code("two words").is_err());
/// ```
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
