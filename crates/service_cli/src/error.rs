//! Error types for the mcprice CLI.

use pricer_core::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or override error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Monte Carlo settings rejected by the engine
    #[error("Invalid simulation settings: {0}")]
    Settings(#[from] pricer_pricing::mc::ConfigError),

    /// Pricing failure
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
