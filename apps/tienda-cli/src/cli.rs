//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use tienda_core::Money;

/// Tienda - coupon discounts and tax for a base price
#[derive(Debug, Parser)]
#[command(name = "tienda")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price an item: apply a coupon, then tax
    Quote(QuoteArgs),

    /// List the active coupons
    Coupons,
}

/// Arguments for `tienda quote`.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Base price with at most two decimals, e.g. 100 or 99.99
    #[arg(short, long, allow_hyphen_values = true)]
    pub price: Money,

    /// Coupon code (case and surrounding spaces are ignored)
    #[arg(short, long)]
    pub coupon: Option<String>,

    /// Tax rate as a fraction, e.g. 0.19 [default: TIENDA_TAX_RATE or 0.19]
    #[arg(short, long, allow_hyphen_values = true)]
    pub tax_rate: Option<f64>,

    /// Fail on unknown coupons instead of ignoring them
    #[arg(long)]
    pub strict: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_quote_arguments() {
        let cli = Cli::try_parse_from([
            "tienda", "quote", "--price", "100", "--coupon", " oferta10 ", "--tax-rate", "0.21",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Text);
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert_eq!(args.price, Money::from_cents(10000));
        assert_eq!(args.coupon.as_deref(), Some(" oferta10 "));
        assert_eq!(args.tax_rate, Some(0.21));
        assert!(!args.strict);
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::try_parse_from(["tienda", "coupons", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Coupons));
    }

    #[test]
    fn rejects_unparseable_price() {
        assert!(Cli::try_parse_from(["tienda", "quote", "--price", "diez"]).is_err());
    }

    #[test]
    fn rejects_price_that_would_overflow() {
        assert!(Cli::try_parse_from(["tienda", "quote", "--price", "92233720368547758"]).is_err());
        assert!(Cli::try_parse_from(["tienda", "quote", "--price", "46116860184273879.03"]).is_ok());
    }

    #[test]
    fn rejects_sub_cent_price() {
        assert!(Cli::try_parse_from(["tienda", "quote", "--price", "12.345"]).is_err());
    }

    #[test]
    fn negative_price_reaches_validation() {
        let cli = Cli::try_parse_from(["tienda", "quote", "--price", "-5"]).unwrap();
        let Commands::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert!(args.price.is_negative());
    }
}
