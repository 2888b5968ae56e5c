//! mcprice - Monte Carlo European Option Pricer CLI
//!
//! This is the operational entry point for the Monte Carlo pricing engine.
//!
//! # Commands
//!
//! - `mcprice price` - Price the configured option by Monte Carlo
//! - `mcprice compare` - Compare the Monte Carlo price with Black-Scholes
//! - `mcprice check` - Validate and print the resolved configuration
//!
//! # Configuration
//!
//! Settings are read from `mcprice.toml` (or `--config`) when present, then
//! overridden by `MCPRICE_*` environment variables and finally by flags.
//! Logs go to stderr; `RUST_LOG` takes precedence over the configured level.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::SimulationArgs;
use config::AppConfig;

/// Monte Carlo European option pricer
#[derive(Parser)]
#[command(name = "mcprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "mcprice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the configured option by Monte Carlo simulation
    Price(SimulationArgs),

    /// Compare the Monte Carlo price with the Black-Scholes closed form
    Compare(SimulationArgs),

    /// Check configuration and execution environment
    Check,
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{}'", level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .and_then(AppConfig::with_env_override)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    let config = match &cli.command {
        Commands::Price(args) | Commands::Compare(args) => args.apply(config),
        Commands::Check => config,
    };

    let level = match (&cli.command, config.tracing_level(cli.verbose)) {
        (_, Ok(level)) => level,
        // check reports the bad level with the rest of the configuration
        (Commands::Check, Err(_)) => "info",
        (_, Err(e)) => return Err(e).context("invalid logging configuration"),
    };
    init_tracing(level)?;

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price(_) => commands::price::run(&config)?,
        Commands::Compare(_) => commands::compare::run(&config)?,
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }

    Ok(())
}
