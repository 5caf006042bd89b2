//! # Coupon Module
//!
//! The discount table: an immutable mapping from coupon code to discount.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller input: Some("  oferta10 ")                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CouponCode::normalize ──► None? ──► no discount                        │
//! │       │                                                                 │
//! │       ▼  "OFERTA10"                                                     │
//! │  DiscountTable::lookup ──► None? ──► no discount (never an error)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DiscountRate(1000 bps)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The standard table is built once per process and never mutated. Extra
//! coupons are added by building a new table with
//! [`DiscountTable::with_entries`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CouponCode, DiscountRate};
use crate::validation::{validate_coupon_code, ValidationResult};

/// Coupons every process starts with, in basis points.
///
/// New codes go here; keys must already be upper-case.
pub const STANDARD_COUPONS: &[(&str, u32)] = &[
    ("OFERTA10", 1_000), // 10%
    ("SUPER20", 2_000),  // 20%
];

/// Mapping from canonical coupon code to discount.
///
/// Keys are unique by construction. Iteration is ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountTable {
    entries: BTreeMap<CouponCode, DiscountRate>,
}

impl DiscountTable {
    /// The process-wide standard table ([`STANDARD_COUPONS`]).
    pub fn standard() -> &'static DiscountTable {
        static STANDARD: OnceLock<DiscountTable> = OnceLock::new();
        STANDARD.get_or_init(|| DiscountTable {
            entries: STANDARD_COUPONS
                .iter()
                .map(|&(code, bps)| {
                    (
                        CouponCode::from_canonical(code),
                        DiscountRate::from_bps_unchecked(bps),
                    )
                })
                .collect(),
        })
    }

    /// Builds a table from `(code, discount)` pairs.
    ///
    /// ## Errors
    /// - A code fails [`validate_coupon_code`]
    /// - Two codes normalize to the same key (`"vip"` and `"VIP"`)
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::coupon::DiscountTable;
    /// use tienda_core::types::DiscountRate;
    ///
    /// let table = DiscountTable::from_entries([
    ///     ("bienvenida", DiscountRate::new(1500).unwrap()),
    /// ]).unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_entries<I, S>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (S, DiscountRate)>,
        S: AsRef<str>,
    {
        let mut table = DiscountTable::default();
        table.insert_all(entries)?;
        Ok(table)
    }

    /// Returns a copy of this table with more entries added.
    ///
    /// Codes already present are rejected as duplicates rather than
    /// overriding the existing discount.
    pub fn with_entries<I, S>(&self, entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (S, DiscountRate)>,
        S: AsRef<str>,
    {
        let mut table = self.clone();
        table.insert_all(entries)?;
        Ok(table)
    }

    fn insert_all<I, S>(&mut self, entries: I) -> ValidationResult<()>
    where
        I: IntoIterator<Item = (S, DiscountRate)>,
        S: AsRef<str>,
    {
        for (raw, rate) in entries {
            let raw = raw.as_ref();
            validate_coupon_code(raw)?;
            let code = CouponCode::normalize(raw).ok_or_else(|| ValidationError::Required {
                field: "coupon code".to_string(),
            })?;
            if self.entries.contains_key(&code) {
                return Err(ValidationError::Duplicate {
                    field: "coupon code".to_string(),
                    value: code.to_string(),
                });
            }
            self.entries.insert(code, rate);
        }
        Ok(())
    }

    /// Looks up a canonical code.
    pub fn lookup(&self, code: &CouponCode) -> Option<DiscountRate> {
        self.entries.get(code).copied()
    }

    /// Normalizes raw caller input and looks it up.
    ///
    /// Absent, blank and unknown coupons all give `None`.
    pub fn resolve(&self, coupon: Option<&str>) -> Option<(CouponCode, DiscountRate)> {
        let code = CouponCode::normalize(coupon?)?;
        let rate = self.lookup(&code)?;
        Some((code, rate))
    }

    /// Strict lookup for callers that want unknown coupons reported.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::coupon::DiscountTable;
    ///
    /// let table = DiscountTable::standard();
    /// assert_eq!(table.require(" super20 ").unwrap().bps(), 2000);
    /// assert!(table.require("INVALIDO").is_err());
    /// ```
    pub fn require(&self, coupon: &str) -> CoreResult<DiscountRate> {
        let code = CouponCode::normalize(coupon).ok_or_else(|| ValidationError::Required {
            field: "coupon code".to_string(),
        })?;
        self.lookup(&code)
            .ok_or_else(|| CoreError::UnknownCoupon(code.to_string()))
    }

    /// Checks whether raw input names a known coupon.
    pub fn contains(&self, coupon: &str) -> bool {
        self.resolve(Some(coupon)).is_some()
    }

    /// Iterates entries ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (&CouponCode, DiscountRate)> {
        self.entries.iter().map(|(code, rate)| (code, *rate))
    }

    /// Number of coupons in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no coupons.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
