//! # ParkFee CLI
//!
//! Command-line front end for the fee calculator.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  parkfee quote --entry .. --exit .. --carpark harbour                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ParkFeeConfig::load ──► FeeCalculator ──► FeeQuote ──► text / JSON     │
//! │                                                                         │
//! │  Results go to stdout, logs to stderr.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;

use clap::Parser;
use parkfee_config::ParkFeeConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ParkFeeConfig::load(args.config.clone())?;

    let output = match &args.command {
        Command::Quote {
            entry,
            exit,
            carpark,
            vehicle,
            json,
        } => commands::quote(&config, entry, exit, carpark, *vehicle, *json)?,
        Command::Segments {
            entry,
            exit,
            holidays,
        } => commands::segments(&config, entry, exit, holidays.as_deref())?,
        Command::Carparks => commands::carparks(&config)?,
    };

    println!("{}", output);
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - Default: INFO, or DEBUG with `--verbose`
/// - `RUST_LOG` replaces the default when `--verbose` is not given
/// - Rule matches are logged under `parkfee::calc` when
///   `calculator.trace_rules` is on
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
