//! # Tienda CLI
//!
//! Command-line front end for the tienda-core pricing calculator.
//!
//! ## Usage
//!
//! ```bash
//! # 100.00 with OFERTA10 at the default 19% tax → 107.10
//! tienda quote --price 100 --coupon oferta10
//!
//! # Explicit tax rate, JSON output
//! tienda --format json quote --price 49.90 --tax-rate 0.21
//!
//! # Active coupons (standard table + TIENDA_EXTRA_COUPONS)
//! tienda coupons
//! ```
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. .env (dotenvy) ──► 2. tracing (stderr) ──► 3. TiendaConfig::load   │
//! │                                                        │                │
//! │  5. print result ◄── 4. command(quote | coupons) ◄─────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;

use std::env;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::{TiendaConfig, LOG_VAR};

fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    init_logging();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }

    let cli = Cli::parse();

    let config = TiendaConfig::load()?;
    let table = config.discount_table()?;
    info!(
        default_tax_rate = %config.default_tax_rate,
        coupons = table.len(),
        "Configuration loaded"
    );

    let output = match &cli.command {
        Commands::Quote(args) => commands::quote(args, &table, &config, cli.format)?,
        Commands::Coupons => commands::coupons(&table, cli.format)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only the result.
///
/// `TIENDA_LOG` wins over `RUST_LOG`. The default only shows warnings, such
/// as ignored coupons; `TIENDA_LOG=tienda=debug` shows each quote.
fn init_logging() {
    let filter = env::var(LOG_VAR)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
