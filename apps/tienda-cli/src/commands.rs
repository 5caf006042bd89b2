//! Command implementations.
//!
//! Each command returns the text to print, so `main` owns stdout.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use tienda_core::validation::{validate_price, validate_tax_rate};
use tienda_core::{CouponCode, DiscountTable, PriceQuote, TaxRate};

use crate::cli::{OutputFormat, QuoteArgs};
use crate::config::TiendaConfig;

/// `tienda quote`
pub fn quote(args: &QuoteArgs, table: &DiscountTable, config: &TiendaConfig, format: OutputFormat) -> Result<String> {
    validate_price(args.price)?;

    let tax_rate = match args.tax_rate {
        Some(fraction) => {
            let rate = TaxRate::try_from_fraction(fraction)?;
            validate_tax_rate(rate)?;
            rate
        }
        None => config.default_tax_rate,
    };

    let coupon = args.coupon.as_deref();
    if let Some(raw) = coupon {
        if args.strict {
            table.require(raw)?;
        } else if let Some(code) = CouponCode::normalize(raw) {
            if table.lookup(&code).is_none() {
                warn!(coupon = %code, "Unknown coupon ignored");
            }
        }
    }

    let quote = table.quote(args.price, coupon, tax_rate);
    debug!(
        base = %quote.base_price,
        discount = %quote.discount,
        tax = %quote.tax,
        total = %quote.total,
        "Quote computed"
    );

    match format {
        OutputFormat::Text => Ok(render_quote(&quote)),
        OutputFormat::Json => serde_json::to_string_pretty(&quote).context("serializing quote"),
    }
}

/// One row of `tienda coupons --format json`.
#[derive(Debug, Serialize)]
struct CouponEntry<'a> {
    code: &'a str,
    discount_bps: u32,
    discount: String,
}

/// `tienda coupons`
pub fn coupons(table: &DiscountTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_coupons(table)),
        OutputFormat::Json => {
            let entries: Vec<CouponEntry<'_>> = table
                .iter()
                .map(|(code, rate)| CouponEntry {
                    code: code.as_str(),
                    discount_bps: rate.bps(),
                    discount: rate.to_string(),
                })
                .collect();
            serde_json::to_string_pretty(&entries).context("serializing coupons")
        }
    }
}

fn render_quote(quote: &PriceQuote) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: String| {
        out.push_str(&format!("{label:<12}{value:>12}\n"));
    };

    line("Base price", quote.base_price.to_string());
    if let Some(code) = &quote.coupon {
        line("Coupon", format!("{code} (-{})", quote.discount_rate));
        line("Discount", format!("-{}", quote.discount));
    }
    line("Subtotal", quote.discounted_price.to_string());
    line(&format!("Tax ({})", quote.tax_rate), quote.tax.to_string());
    line("Total", quote.total.to_string());
    out
}

fn render_coupons(table: &DiscountTable) -> String {
    if table.is_empty() {
        return "No coupons.\n".to_string();
    }

    let mut out = String::new();
    for (code, rate) in table.iter() {
        out.push_str(&format!("{:<16}{:>8}\n", code.as_str(), rate.to_string()));
    }
    out
}
