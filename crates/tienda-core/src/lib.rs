//! # tienda-core: Pure Pricing Logic for Tienda
//!
//! Coupon discounts and tax, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tienda Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Callers                                      │   │
//! │  │    tienda-cli (quote, coupons) · any web request handler       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ price, coupon?, tax rate?              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tienda-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │  coupon   │  │  pricing  │  │   │
//! │  │   │   Money   │  │  TaxRate  │  │ Discount  │  │ apply_    │  │   │
//! │  │   │  (cents)  │  │ Discount  │  │   Table   │  │  coupon   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO ENV • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Tax rates, discount rates, coupon codes
//! - [`coupon`] - The discount table
//! - [`pricing`] - `apply_coupon`, `compute_final_price`, `quote`
//! - [`validation`] - Checks for caller input and table keys
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::{compute_final_price, Money, TaxRate};
//!
//! let base: Money = "100".parse().unwrap();
//! let total = compute_final_price(base, Some("OFERTA10"), TaxRate::from_bps(1900));
//!
//! // 100.00 - 10% = 90.00, + 19% tax = 107.10
//! assert_eq!(total.to_string(), "107.10");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::DiscountTable;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{apply_coupon, compute_final_price, compute_final_price_default, quote, PriceQuote};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate applied when the caller does not supply one (19%).
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1_900);

/// Maximum length of a coupon code in the discount table.
pub const MAX_COUPON_CODE_LEN: usize = 32;
