//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` loads an optional `.env` file first, so values there
//! behave like real environment variables.

use std::env;

use tienda_core::validation::validate_tax_rate;
use tienda_core::{DiscountRate, DiscountTable, TaxRate, ValidationError, DEFAULT_TAX_RATE};

/// Default tax rate, as a fraction (`0.19`).
pub const TAX_RATE_VAR: &str = "TIENDA_TAX_RATE";

/// Extra coupons, `CODE=FRACTION` separated by commas.
pub const EXTRA_COUPONS_VAR: &str = "TIENDA_EXTRA_COUPONS";

/// Log filter directive (takes precedence over `RUST_LOG`).
pub const LOG_VAR: &str = "TIENDA_LOG";

/// Tienda CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TiendaConfig {
    /// Tax rate used when `--tax-rate` is not given
    pub default_tax_rate: TaxRate,

    /// Coupons added on top of the standard table
    pub extra_coupons: Vec<(String, DiscountRate)>,
}

impl Default for TiendaConfig {
    fn default() -> Self {
        TiendaConfig {
            default_tax_rate: DEFAULT_TAX_RATE,
            extra_coupons: Vec::new(),
        }
    }
}

impl TiendaConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_tax_rate = match lookup(TAX_RATE_VAR) {
            Some(raw) => parse_tax_rate(&raw)?,
            None => DEFAULT_TAX_RATE,
        };

        let extra_coupons = match lookup(EXTRA_COUPONS_VAR) {
            Some(raw) => parse_extra_coupons(&raw)?,
            None => Vec::new(),
        };

        Ok(TiendaConfig {
            default_tax_rate,
            extra_coupons,
        })
    }

    /// The standard discount table plus any configured extra coupons.
    pub fn discount_table(&self) -> Result<DiscountTable, ConfigError> {
        DiscountTable::standard()
            .with_entries(
                self.extra_coupons
                    .iter()
                    .map(|(code, rate)| (code.as_str(), *rate)),
            )
            .map_err(ConfigError::Coupons)
    }
}

fn parse_tax_rate(raw: &str) -> Result<TaxRate, ConfigError> {
    let invalid = || ConfigError::InvalidValue(TAX_RATE_VAR.to_string());
    let fraction: f64 = raw.trim().parse().map_err(|_| invalid())?;
    let rate = TaxRate::try_from_fraction(fraction).map_err(|_| invalid())?;
    validate_tax_rate(rate).map_err(|_| invalid())?;
    Ok(rate)
}

fn parse_extra_coupons(raw: &str) -> Result<Vec<(String, DiscountRate)>, ConfigError> {
    let invalid = || ConfigError::InvalidValue(EXTRA_COUPONS_VAR.to_string());

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<(String, DiscountRate), ConfigError> {
            let (code, fraction) = entry.split_once('=').ok_or_else(invalid)?;
            let fraction: f64 = fraction.trim().parse().map_err(|_| invalid())?;
            let rate = DiscountRate::try_from_fraction(fraction).map_err(|_| invalid())?;
            Ok((code.trim().to_string(), rate))
        })
        .collect()
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid extra coupons: {0}")]
    Coupons(#[source] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = TiendaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, TiendaConfig::default());
        assert_eq!(config.default_tax_rate.bps(), 1900);
        assert_eq!(config.discount_table().unwrap().len(), 2);
    }

    #[test]
    fn reads_tax_rate_fraction() {
        let config = TiendaConfig::from_lookup(lookup(&[(TAX_RATE_VAR, " 0.21 ")])).unwrap();
        assert_eq!(config.default_tax_rate.bps(), 2100);
    }

    #[test]
    fn rejects_bad_tax_rate() {
        for bad in ["abc", "-0.1", "1.5", ""] {
            let err = TiendaConfig::from_lookup(lookup(&[(TAX_RATE_VAR, bad)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(ref name) if name == TAX_RATE_VAR),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn reads_extra_coupons() {
        let config = TiendaConfig::from_lookup(lookup(&[(
            EXTRA_COUPONS_VAR,
            "bienvenida=0.15, VIP=0.3,",
        )]))
        .unwrap();
        assert_eq!(config.extra_coupons.len(), 2);

        let table = config.discount_table().unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.require("BIENVENIDA").unwrap().bps(), 1500);
        assert_eq!(table.require("vip").unwrap().bps(), 3000);
    }

    #[test]
    fn rejects_malformed_extra_coupons() {
        for bad in ["BIENVENIDA", "BIENVENIDA=x", "GRATIS=1.0", "NEG=-0.1"] {
            let err = TiendaConfig::from_lookup(lookup(&[(EXTRA_COUPONS_VAR, bad)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(_)), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn duplicate_extra_coupon_fails_when_building_table() {
        let config =
            TiendaConfig::from_lookup(lookup(&[(EXTRA_COUPONS_VAR, "oferta10=0.5")])).unwrap();
        assert!(matches!(
            config.discount_table(),
            Err(ConfigError::Coupons(ValidationError::Duplicate { .. }))
        ));
    }
}
