//! # pricer_pricing: Monte Carlo Engine
//!
//! ## Layer Role
//!
//! pricer_pricing sits on top of pricer_core and provides:
//! - Random variate generation (`rng`): seeded uniform source and the
//!   Marsaglia polar standard normal generator
//! - Monte Carlo pricing (`mc`): GBM path simulation, payoff aggregation,
//!   sequential and rayon-parallel orchestration, cancellation
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::ScenarioParameters;
//! use pricer_pricing::mc::{ExecutionMode, MonteCarloConfig, MonteCarloPricer};
//!
//! // Reference scenario with the default seed
//! let price = pricer_pricing::price(20_000, 50).unwrap();
//! assert!(price.is_finite() && price > 0.0);
//!
//! // Explicit scenario and configuration
//! let config = MonteCarloConfig::builder()
//!     .n_simulations(20_000)
//!     .n_steps(50)
//!     .seed(7)
//!     .execution(ExecutionMode::Parallel)
//!     .build()
//!     .unwrap();
//! let scenario = ScenarioParameters::new(100.0, 95.0, 0.03, 0.25, 0.5, Default::default());
//! let result = MonteCarloPricer::new(config).unwrap().price(&scenario).unwrap();
//! println!("{:.4} +/- {:.4}", result.price, result.confidence_95());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

// Random number generation
pub mod rng;

// Monte Carlo pricing
pub mod mc;

pub use mc::{
    CancellationToken, ExecutionMode, MonteCarloConfig, MonteCarloPricer, PricingResult,
};
pub use pricer_core::{OptionType, PricingError, ScenarioParameters};

/// Prices the reference scenario with the default seed.
///
/// Simulates `n_simulations` paths of `n_steps` price points sequentially
/// and returns the discounted mean payoff.
///
/// # Errors
///
/// Returns `PricingError::InvalidParameters` if `n_simulations` is outside
/// [1, 10,000,000] or `n_steps` is outside [2, 10,000].
///
/// # Examples
///
/// ```rust
/// use pricer_core::PricingError;
///
/// assert!(pricer_pricing::price(1_000, 10).is_ok());
/// assert!(matches!(
///     pricer_pricing::price(1_000, 1),
///     Err(PricingError::InvalidParameters { .. })
/// ));
/// ```
pub fn price(n_simulations: usize, n_steps: usize) -> Result<f64, PricingError> {
    price_scenario(n_simulations, n_steps, &ScenarioParameters::default())
}

/// Prices an explicit scenario with the default seed.
///
/// # Errors
///
/// As [`price`], plus `PricingError::InvalidParameters` for an invalid
/// scenario.
pub fn price_scenario(
    n_simulations: usize,
    n_steps: usize,
    scenario: &ScenarioParameters,
) -> Result<f64, PricingError> {
    let config = MonteCarloConfig::builder()
        .n_simulations(n_simulations)
        .n_steps(n_steps)
        .build()?;
    let result = MonteCarloPricer::new(config)?.price(scenario)?;
    Ok(result.price)
}
