//! # Domain Types
//!
//! Rates and coupon codes used by the pricing calculator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DiscountRate   │   │   CouponCode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  bps (u32)      │   │  trimmed        │       │
//! │  │  1900 = 19%     │   │  0 ≤ bps < 10000│   │  UPPER CASE     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Basis Points?
//! 1 basis point = 0.01% = 1/10000. Rates stay integers, so `Money` math
//! never touches floating point. Fractions like `0.19` are converted once, at
//! the edge.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

/// Basis points in 100%.
pub const BPS_SCALE: u32 = 10_000;

/// Tolerance for float noise when converting a fraction: `0.19 * 10000` is
/// `1900.0000000000002`.
const BPS_EPSILON: f64 = 1e-6;

/// Converts a fraction (`0.19`) to basis points.
///
/// Rejects NaN, infinities, negative values, and fractions finer than one
/// basis point (`0.12345`), which would otherwise be rounded silently.
fn fraction_to_bps(field: &str, fraction: f64) -> Result<u32, ValidationError> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("{fraction} is not a non-negative number"),
        });
    }
    let scaled = fraction * f64::from(BPS_SCALE);
    let bps = scaled.round();
    if bps > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(u32::MAX / BPS_SCALE),
        });
    }
    if (scaled - bps).abs() > BPS_EPSILON {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("{fraction} is finer than one basis point (0.0001)"),
        });
    }
    Ok(bps as u32)
}

/// Formats basis points as a percentage without trailing zeros: `19%`, `8.25%`.
fn fmt_bps_percent(bps: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let whole = bps / 100;
    let frac = bps % 100;
    if frac == 0 {
        write!(f, "{whole}%")
    } else if frac % 10 == 0 {
        write!(f, "{whole}.{}%", frac / 10)
    } else {
        write!(f, "{whole}.{frac:02}%")
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1900 bps = 19%, the default rate applied by
/// [`compute_final_price_default`](crate::pricing::compute_final_price_default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction (`0.19` → 1900 bps).
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::try_from_fraction(0.19).unwrap().bps(), 1900);
    /// assert!(TaxRate::try_from_fraction(-0.19).is_err());
    /// ```
    pub fn try_from_fraction(fraction: f64) -> Result<Self, ValidationError> {
        fraction_to_bps("tax_rate", fraction).map(TaxRate)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps_percent(self.0, f)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount fraction in basis points, always in `[0, 10000)`.
///
/// A 100% discount is not representable: a coupon can never make an item free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u32", into = "u32")]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Largest valid discount (99.99%).
    pub const MAX_BPS: u32 = BPS_SCALE - 1;

    /// Creates a discount rate from basis points.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::new(1000).unwrap().bps(), 1000);
    /// assert!(DiscountRate::new(10_000).is_err());
    /// ```
    pub fn new(bps: u32) -> Result<Self, ValidationError> {
        if bps > Self::MAX_BPS {
            return Err(ValidationError::OutOfRange {
                field: "discount_bps".to_string(),
                min: 0,
                max: i64::from(Self::MAX_BPS),
            });
        }
        Ok(DiscountRate(bps))
    }

    /// Creates a discount rate from a fraction (`0.15` → 1500 bps).
    pub fn try_from_fraction(fraction: f64) -> Result<Self, ValidationError> {
        Self::new(fraction_to_bps("discount", fraction)?)
    }

    /// Builds a rate from a literal the crate already knows is in range.
    pub(crate) const fn from_bps_unchecked(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Returns the discount in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Basis points of the price the customer still pays (`10000 - bps`).
    #[inline]
    pub const fn remaining_bps(&self) -> u32 {
        BPS_SCALE - self.0
    }
}

impl TryFrom<u32> for DiscountRate {
    type Error = ValidationError;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        DiscountRate::new(bps)
    }
}

impl From<DiscountRate> for u32 {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bps_percent(self.0, f)
    }
}

// =============================================================================
// Coupon Code
// =============================================================================

/// A coupon code in canonical form: trimmed and upper-cased.
///
/// Lookups are case- and whitespace-insensitive because both the table keys
/// and caller input go through [`CouponCode::normalize`]. Deserializing goes
/// through it as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct CouponCode(String);

impl CouponCode {
    /// Normalizes raw input, returning `None` when nothing is left after
    /// trimming.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::types::CouponCode;
    ///
    /// let code = CouponCode::normalize("  oferta10 ").unwrap();
    /// assert_eq!(code.as_str(), "OFERTA10");
    /// assert!(CouponCode::normalize("   ").is_none());
    /// ```
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(CouponCode(trimmed.to_uppercase()))
    }

    /// Wraps a code that is already trimmed and upper-case.
    pub(crate) fn from_canonical(code: &str) -> Self {
        CouponCode(code.to_string())
    }

    /// Returns the canonical code.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        CouponCode::normalize(&raw).ok_or_else(|| ValidationError::Required {
            field: "coupon code".to_string(),
        })
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert_eq!(rate, TaxRate::try_from_fraction(0.0825).unwrap());
    }

    #[test]
    fn test_tax_rate_from_fraction() {
        assert_eq!(TaxRate::try_from_fraction(0.19).unwrap().bps(), 1900);
        assert_eq!(TaxRate::try_from_fraction(0.0825).unwrap().bps(), 825);
        assert_eq!(TaxRate::try_from_fraction(0.0).unwrap(), TaxRate::zero());
        assert!(TaxRate::try_from_fraction(-0.01).is_err());
        assert!(TaxRate::try_from_fraction(f64::NAN).is_err());
        assert!(TaxRate::try_from_fraction(f64::INFINITY).is_err());
    }

    #[test]
    fn test_fraction_finer_than_a_basis_point_is_rejected() {
        for bad in [0.12345, 0.190_01, 0.000_05] {
            assert!(
                matches!(TaxRate::try_from_fraction(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
        assert!(DiscountRate::try_from_fraction(0.15005).is_err());
        assert_eq!(TaxRate::try_from_fraction(0.2125).unwrap().bps(), 2125);
    }

    #[test]
    fn test_tax_rate_default_is_nineteen_percent() {
        assert_eq!(TaxRate::default().bps(), 1900);
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(TaxRate::from_bps(1900).to_string(), "19%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(1050).to_string(), "10.5%");
        assert_eq!(DiscountRate::new(1000).unwrap().to_string(), "10%");
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert!(DiscountRate::new(0).is_ok());
        assert!(DiscountRate::new(9999).is_ok());
        assert!(matches!(
            DiscountRate::new(10_000),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(DiscountRate::try_from_fraction(1.0).is_err());
        assert_eq!(DiscountRate::try_from_fraction(0.15).unwrap().bps(), 1500);
    }

    #[test]
    fn test_discount_rate_remaining() {
        assert_eq!(DiscountRate::new(2000).unwrap().remaining_bps(), 8000);
        assert_eq!(DiscountRate::zero().remaining_bps(), BPS_SCALE);
    }

    #[test]
    fn test_discount_rate_deserialize_checks_range() {
        let ok: DiscountRate = serde_json::from_str("2000").unwrap();
        assert_eq!(ok.bps(), 2000);
        assert!(serde_json::from_str::<DiscountRate>("10000").is_err());
    }

    #[test]
    fn test_coupon_code_normalize() {
        assert_eq!(CouponCode::normalize("super20").unwrap().as_str(), "SUPER20");
        assert_eq!(CouponCode::normalize("\tOferta10\n").unwrap().as_str(), "OFERTA10");
        assert!(CouponCode::normalize("").is_none());
        assert!(CouponCode::normalize(" \t ").is_none());
    }

    #[test]
    fn test_coupon_code_deserialize_normalizes() {
        let code: CouponCode = serde_json::from_str("\" oferta10 \"").unwrap();
        assert_eq!(code.as_str(), "OFERTA10");
        assert!(serde_json::from_str::<CouponCode>("\"   \"").is_err());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"OFERTA10\"");
    }
}
