//! Error types for Monte Carlo configuration.
//!
//! Configuration errors occur while building a [`MonteCarloConfig`](super::MonteCarloConfig);
//! they convert into [`PricingError::InvalidParameters`] so pricing entry
//! points expose a single error type.

use pricer_core::PricingError;
use thiserror::Error;

use super::config::{MAX_SIMULATIONS, MAX_STEPS, MIN_STEPS};

/// Configuration error for the Monte Carlo pricer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Simulation count outside valid range [1, 10_000_000].
    #[error("Invalid simulation count {0}: must be in range [1, {max}]", max = MAX_SIMULATIONS)]
    InvalidSimulationCount(usize),
    /// Step count outside valid range [2, 10_000].
    #[error(
        "Invalid step count {0}: must be in range [{min}, {max}]",
        min = MIN_STEPS,
        max = MAX_STEPS
    )]
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidSimulationCount(_) => {
                PricingError::invalid_parameters("n_simulations", err.to_string())
            }
            ConfigError::InvalidStepCount(_) => {
                PricingError::invalid_parameters("n_steps", err.to_string())
            }
            ConfigError::InvalidParameter { name, value } => {
                PricingError::invalid_parameters(name, value)
            }
        }
    }
}
