//! # Pricing Module
//!
//! Coupon discount followed by tax.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base_price: 100.00       coupon: "oferta10"       tax_rate: 19%        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_coupon ─── OFERTA10 = 10% ──► 90.00                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  + tax (19% of 90.00 = 17.10) ─────► 107.10                             │
//! │                                                                         │
//! │  Each step rounds to the cent, half away from zero.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions use [`DiscountTable::standard`]. The methods on
//! [`DiscountTable`] do the same against any table.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::DiscountTable;
use crate::money::Money;
use crate::types::{CouponCode, DiscountRate, TaxRate};
use crate::DEFAULT_TAX_RATE;

// =============================================================================
// Price Quote
// =============================================================================

/// Full breakdown of a priced item.
///
/// `total` always equals what `compute_final_price` returns for the same
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    /// Price before discount and tax.
    pub base_price: Money,
    /// Canonical code of the coupon that matched, if any.
    pub coupon: Option<CouponCode>,
    /// Discount applied (zero when no coupon matched).
    pub discount_rate: DiscountRate,
    /// `base_price - discounted_price`.
    pub discount: Money,
    /// Price after discount, before tax.
    pub discounted_price: Money,
    pub tax_rate: TaxRate,
    /// Tax on the discounted price.
    pub tax: Money,
    /// Discounted price plus tax.
    pub total: Money,
}

// =============================================================================
// Table-Scoped Pricing
// =============================================================================

impl DiscountTable {
    /// Applies a coupon to `price`.
    ///
    /// Absent, blank and unknown coupons leave the price unchanged.
    pub fn apply_coupon(&self, price: Money, coupon: Option<&str>) -> Money {
        match self.resolve(coupon) {
            Some((_, rate)) => price.apply_discount(rate),
            None => price,
        }
    }

    /// Applies a coupon, then adds tax on the discounted price.
    pub fn compute_final_price(&self, base_price: Money, coupon: Option<&str>, tax_rate: TaxRate) -> Money {
        self.apply_coupon(base_price, coupon).with_tax(tax_rate)
    }

    /// Same calculation as [`compute_final_price`](Self::compute_final_price),
    /// with every intermediate amount kept.
    pub fn quote(&self, base_price: Money, coupon: Option<&str>, tax_rate: TaxRate) -> PriceQuote {
        let (coupon, discount_rate) = match self.resolve(coupon) {
            Some((code, rate)) => (Some(code), rate),
            None => (None, DiscountRate::zero()),
        };

        let discounted_price = base_price.apply_discount(discount_rate);
        let tax = discounted_price.calculate_tax(tax_rate);

        PriceQuote {
            base_price,
            coupon,
            discount_rate,
            discount: base_price - discounted_price,
            discounted_price,
            tax_rate,
            tax,
            total: discounted_price.with_tax(tax_rate),
        }
    }
}

// =============================================================================
// Standard-Table Pricing
// =============================================================================

/// Applies a coupon from the standard table.
///
/// ## Example
/// ```rust
/// use tienda_core::money::Money;
/// use tienda_core::pricing::apply_coupon;
///
/// let price = Money::from_cents(10000);
/// assert_eq!(apply_coupon(price, Some("OFERTA10")).cents(), 9000);
/// assert_eq!(apply_coupon(price, Some(" super20 ")).cents(), 8000);
/// assert_eq!(apply_coupon(price, Some("INVALIDO")), price);
/// assert_eq!(apply_coupon(price, None), price);
/// ```
pub fn apply_coupon(price: Money, coupon: Option<&str>) -> Money {
    DiscountTable::standard().apply_coupon(price, coupon)
}

/// Discount from the standard table, then tax at `tax_rate`.
///
/// ## Example
/// ```rust
/// use tienda_core::money::Money;
/// use tienda_core::pricing::compute_final_price;
/// use tienda_core::types::TaxRate;
///
/// let base = Money::from_cents(10000);
/// let total = compute_final_price(base, Some("OFERTA10"), TaxRate::from_bps(1900));
/// assert_eq!(total.to_string(), "107.10");
/// ```
pub fn compute_final_price(base_price: Money, coupon: Option<&str>, tax_rate: TaxRate) -> Money {
    DiscountTable::standard().compute_final_price(base_price, coupon, tax_rate)
}

/// [`compute_final_price`] at [`DEFAULT_TAX_RATE`] (19%).
pub fn compute_final_price_default(base_price: Money, coupon: Option<&str>) -> Money {
    compute_final_price(base_price, coupon, DEFAULT_TAX_RATE)
}

/// Breakdown of [`compute_final_price`] against the standard table.
pub fn quote(base_price: Money, coupon: Option<&str>, tax_rate: TaxRate) -> PriceQuote {
    DiscountTable::standard().quote(base_price, coupon, tax_rate)
}

// =============================================================================
// Unit Tests
// =============================================================================
