//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    100 * (1 - 0.1) * 1.19 = 107.10000000000001  ❌                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10000 cents × 9000 bps = 9000 cents                                  │
//! │    9000 cents + tax(1900 bps) = 10710 cents = 107.10  ✅                │
//! │                                                                         │
//! │  Every price is a whole number of cents, so every result is already   │
//! │  "rounded to two decimals".                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tienda_core::money::Money;
//!
//! let price: Money = "99.99".parse().unwrap();
//! assert_eq!(price.cents(), 9999);
//! assert_eq!(price.to_string(), "99.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{DiscountRate, TaxRate, BPS_SCALE};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts can be represented, even though
///   pricing only ever produces them from negative input
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency**: every amount in a calculation shares one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted as a price.
    ///
    /// Half of `i64::MAX` cents, so the amount plus up to 100% tax still fits.
    pub const MAX: Money = Money(i64::MAX / 2);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let price = Money::from_cents(10710);
    /// assert_eq!(price.to_string(), "107.10");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates the tax owed on this amount.
    ///
    /// ## Rounding
    /// `amount × bps / 10000`, rounded half away from zero to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    /// use tienda_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(9000);  // 90.00
    /// let rate = TaxRate::from_bps(1900);   // 19%
    /// assert_eq!(price.calculate_tax(rate).cents(), 1710);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(scale_bps(self.0, i64::from(rate.bps())))
    }

    /// Returns this amount with tax added on top.
    ///
    /// Saturates at `i64::MAX` cents instead of wrapping; amounts up to
    /// [`Money::MAX`] with a rate of at most 100% never reach it.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    /// use tienda_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(10000);
    /// assert_eq!(price.with_tax(TaxRate::from_bps(1900)).cents(), 11900);
    /// ```
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_add(self.calculate_tax(rate).0))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Rounding
    /// `amount × (10000 − bps) / 10000`, rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    /// use tienda_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(10000);
    /// let rate = DiscountRate::new(1000).unwrap(); // 10% off
    /// assert_eq!(subtotal.apply_discount(rate).cents(), 9000);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        Money(scale_bps(self.0, i64::from(rate.remaining_bps())))
    }
}

/// Multiplies `cents` by `bps / 10000`, rounding half away from zero.
///
/// i128 keeps `i64::MAX × u32::MAX` from overflowing. Results outside the i64
/// range saturate.
fn scale_bps(cents: i64, bps: i64) -> i64 {
    let scale = i128::from(BPS_SCALE);
    let product = i128::from(cents) * i128::from(bps);
    let half = scale / 2;
    let rounded = if product >= 0 {
        (product + half) / scale
    } else {
        (product - half) / scale
    };
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `"100"`, `"99.99"` or `"-5.5"`.
///
/// Prices are whole cents, so more than two fraction digits (`"12.345"`) are
/// rejected rather than rounded. Amounts beyond [`Money::MAX`] are rejected
/// too.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid_amount(s, "expected digits with an optional decimal point"));
        }

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| invalid_amount(s, "amount is too large"))?
        };

        if fraction.len() > 2 {
            return Err(invalid_amount(s, "at most two decimal places are allowed"));
        }
        let fraction = fraction.as_bytes();
        let digit = |i: usize| fraction.get(i).map_or(0, |b| i64::from(b - b'0'));
        let minor = digit(0) * 10 + digit(1);

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .filter(|&c| c <= Money::MAX.0)
            .ok_or_else(|| invalid_amount(s, "amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

fn invalid_amount(input: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: format!("'{input}': {reason}"),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering, e.g. `107.10` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(10710).to_string(), "107.10");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_plain_amounts() {
        assert_eq!("100".parse::<Money>().unwrap().cents(), 10000);
        assert_eq!("99.99".parse::<Money>().unwrap().cents(), 9999);
        assert_eq!("107.1".parse::<Money>().unwrap().cents(), 10710);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("  +12.00 ".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("-5.5".parse::<Money>().unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_rejects_sub_cent_precision() {
        for bad in ["12.345", "12.340", "0.999", "-12.345", ".001"] {
            assert!(
                matches!(bad.parse::<Money>(), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        for bad in [".", "abc", "1.2.3", "1,50", "--1", "1e3", "99999999999999999999"] {
            assert!(
                matches!(bad.parse::<Money>(), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_upper_bound() {
        assert_eq!("46116860184273879.03".parse::<Money>().unwrap(), Money::MAX);
        assert_eq!("-46116860184273879.03".parse::<Money>().unwrap().cents(), -Money::MAX.cents());
        for bad in ["46116860184273879.04", "92233720368547758", "92233720368547758.07"] {
            assert!(
                matches!(bad.parse::<Money>(), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_with_tax_at_max_amount() {
        assert_eq!(Money::MAX.with_tax(TaxRate::from_bps(10_000)).cents(), i64::MAX - 1);
        assert!(!Money::MAX.with_tax(TaxRate::from_bps(1900)).is_negative());
    }

    #[test]
    fn test_out_of_range_rate_saturates() {
        let huge = TaxRate::from_bps(u32::MAX);
        assert_eq!(Money::MAX.calculate_tax(huge).cents(), i64::MAX);
        assert_eq!(Money::MAX.with_tax(huge).cents(), i64::MAX);
        assert_eq!(Money::from_cents(-Money::MAX.cents()).calculate_tax(huge).cents(), i64::MIN);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c.cents(), 1400);
    }

    #[test]
    fn test_tax_calculation() {
        let rate = TaxRate::from_bps(1900);
        assert_eq!(Money::from_cents(9000).calculate_tax(rate).cents(), 1710);
        // 0.05 × 19% = 0.0095 → 0.01
        assert_eq!(Money::from_cents(5).calculate_tax(rate).cents(), 1);
        assert_eq!(Money::from_cents(10000).with_tax(rate).cents(), 11900);
    }

    #[test]
    fn test_discount() {
        let ten = DiscountRate::new(1000).unwrap();
        let twenty = DiscountRate::new(2000).unwrap();
        assert_eq!(Money::from_cents(10000).apply_discount(ten).cents(), 9000);
        assert_eq!(Money::from_cents(10000).apply_discount(twenty).cents(), 8000);
        // 0.05 × 90% = 0.045 → 0.05 (half away from zero)
        assert_eq!(Money::from_cents(5).apply_discount(ten).cents(), 5);
        assert_eq!(Money::from_cents(999).apply_discount(ten).cents(), 899);
    }

    #[test]
    fn test_zero_discount_is_identity() {
        let none = DiscountRate::new(0).unwrap();
        assert_eq!(Money::from_cents(1234).apply_discount(none).cents(), 1234);
    }

    #[test]
    fn test_negative_rounding_is_symmetric() {
        let rate = TaxRate::from_bps(1900);
        assert_eq!(Money::from_cents(-5).calculate_tax(rate).cents(), -1);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(10710)).unwrap();
        assert_eq!(json, "10710");
    }
}
