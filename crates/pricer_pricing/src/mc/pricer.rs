//! Monte Carlo pricing engine.
//!
//! This module provides the orchestration layer for Monte Carlo pricing.
//!
//! # Overview
//!
//! The [`MonteCarloPricer`] coordinates:
//! 1. Normal variate generation (via [`NormalVariateGenerator`])
//! 2. Path generation (via [`generate_gbm_paths`])
//! 3. Payoff aggregation (via [`PayoffAccumulator`])
//! 4. Normalisation and discounting
//!
//! # Chunking
//!
//! Runs are simulated in chunks of [`MonteCarloConfig::chunk_size`] paths so
//! memory stays bounded by one chunk per worker. In sequential mode every
//! chunk draws from the same generator, which makes the result identical to
//! simulating all runs as one batch. In parallel mode chunk `k` draws from
//! sub-stream `k` of the seed and partial sums are merged in chunk order, so
//! the result does not depend on the number of worker threads.

use std::sync::atomic::{AtomicUsize, Ordering};

use pricer_core::{PricingError, ScenarioParameters};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::cancel::CancellationToken;
use super::config::{ExecutionMode, MonteCarloConfig};
use super::error::ConfigError;
use super::paths::{generate_gbm_paths, GbmStepConstants};
use super::payoff::PayoffAccumulator;
use super::workspace::PathWorkspace;
use crate::rng::{NormalVariateGenerator, PricerRng};

/// Pricing result with sampling diagnostics.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PricingResult;
///
/// let result = PricingResult {
///     price: 4.3,
///     std_error: 0.02,
///     n_simulations: 100_000,
///     n_steps: 100,
/// };
///
/// println!("Price: {} +/- {}", result.price, result.confidence_95());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingResult {
    /// Present value of the option.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Number of simulated runs.
    pub n_simulations: usize,
    /// Number of price points per path.
    pub n_steps: usize,
}

impl PricingResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }
}

/// Monte Carlo pricing engine.
///
/// Stateless apart from its configuration: every call to
/// [`price`](Self::price) reseeds from the configured seed, so repeated calls
/// return identical results.
///
/// # Examples
///
/// ```rust
/// use pricer_core::ScenarioParameters;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
///
/// let config = MonteCarloConfig::builder()
///     .n_simulations(10_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let pricer = MonteCarloPricer::new(config).unwrap();
/// let result = pricer.price(&ScenarioParameters::default()).unwrap();
/// println!("Price: {} +/- {}", result.price, result.std_error);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a new pricer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration is invalid.
    pub fn new(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Prices a European option on the given scenario.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameters` for an invalid scenario and
    /// propagates `PricingError::GeneratorExhausted`.
    pub fn price(&self, scenario: &ScenarioParameters) -> Result<PricingResult, PricingError> {
        self.price_with_cancellation(scenario, &CancellationToken::new())
    }

    /// Prices a European option, stopping early once `token` is cancelled.
    ///
    /// The token is checked before each chunk; a chunk in flight always
    /// completes.
    ///
    /// # Errors
    ///
    /// As [`price`](Self::price), plus `PricingError::Cancelled` carrying the
    /// number of runs completed before cancellation was observed.
    pub fn price_with_cancellation(
        &self,
        scenario: &ScenarioParameters,
        token: &CancellationToken,
    ) -> Result<PricingResult, PricingError> {
        scenario.validate()?;
        let n_simulations = self.config.n_simulations();
        let n_steps = self.config.n_steps();
        let constants = GbmStepConstants::new(scenario, n_steps)?;

        debug!(
            n_simulations,
            n_steps,
            dt = constants.dt,
            drift = constants.drift,
            vol_sqrt_dt = constants.vol_sqrt_dt,
            execution = ?self.config.execution(),
            chunks = self.config.n_chunks(),
            "Starting Monte Carlo pricing"
        );

        let acc = match self.config.execution() {
            ExecutionMode::Sequential => self.run_sequential(scenario, &constants, token)?,
            ExecutionMode::Parallel => self.run_parallel(scenario, &constants, token)?,
        };

        let discount_factor = scenario.discount_factor();
        let result = PricingResult {
            price: acc.price(self.config.normalisation_divisor(), discount_factor),
            std_error: acc.std_error(self.config.normalisation_divisor(), discount_factor),
            n_simulations,
            n_steps,
        };

        info!(
            price = result.price,
            std_error = result.std_error,
            n_simulations,
            n_steps,
            "Monte Carlo pricing completed"
        );
        Ok(result)
    }

    /// Number of runs in chunk `chunk`.
    fn chunk_len(&self, chunk: usize) -> usize {
        let start = chunk * self.config.chunk_size();
        self.config
            .chunk_size()
            .min(self.config.n_simulations() - start)
    }

    fn run_sequential(
        &self,
        scenario: &ScenarioParameters,
        constants: &GbmStepConstants,
        token: &CancellationToken,
    ) -> Result<PayoffAccumulator, PricingError> {
        let n_steps = self.config.n_steps();
        let mut normals =
            NormalVariateGenerator::new(PricerRng::from_seed(self.config.effective_seed()));
        let mut workspace = PathWorkspace::new(self.chunk_len(0), n_steps);
        let mut acc = PayoffAccumulator::new();
        debug!(
            seed = self.config.effective_seed(),
            max_rejections = normals.max_rejections(),
            "Sequential run"
        );

        for chunk in 0..self.config.n_chunks() {
            if token.is_cancelled() {
                warn!(completed_runs = acc.count(), "Monte Carlo pricing cancelled");
                return Err(PricingError::Cancelled {
                    completed_runs: acc.count(),
                });
            }

            workspace.ensure_shape(self.chunk_len(chunk), n_steps);
            generate_gbm_paths(&mut workspace, scenario.spot, constants, &mut normals)?;
            acc.add_batch(workspace.batch(), scenario);

            debug!(chunk, completed_runs = acc.count(), "Chunk simulated");
        }

        Ok(acc)
    }

    fn run_parallel(
        &self,
        scenario: &ScenarioParameters,
        constants: &GbmStepConstants,
        token: &CancellationToken,
    ) -> Result<PayoffAccumulator, PricingError> {
        let n_steps = self.config.n_steps();
        let seed = self.config.effective_seed();
        let completed = AtomicUsize::new(0);

        let partials: Result<Vec<PayoffAccumulator>, PricingError> = (0..self.config.n_chunks())
            .into_par_iter()
            .map_init(PathWorkspace::default, |workspace, chunk| {
                if token.is_cancelled() {
                    return Err(PricingError::Cancelled {
                        completed_runs: completed.load(Ordering::SeqCst),
                    });
                }

                let stream = PricerRng::substream(seed, chunk as u64);
                let stream_seed = stream.seed();
                let mut normals = NormalVariateGenerator::new(stream);
                workspace.ensure_shape(self.chunk_len(chunk), n_steps);
                generate_gbm_paths(workspace, scenario.spot, constants, &mut normals)?;

                let mut acc = PayoffAccumulator::new();
                acc.add_batch(workspace.batch(), scenario);
                completed.fetch_add(acc.count(), Ordering::SeqCst);

                debug!(chunk, stream_seed, runs = acc.count(), "Chunk simulated");
                Ok(acc)
            })
            .collect();

        let partials = partials.inspect_err(|err| {
            if let PricingError::Cancelled { completed_runs } = err {
                warn!(completed_runs, "Monte Carlo pricing cancelled");
            }
        })?;

        // Merge in chunk order for thread-count independent rounding
        let mut acc = PayoffAccumulator::new();
        for partial in &partials {
            acc.merge(partial);
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::paths::simulate_paths;
    use crate::mc::payoff::price_batch;
    use approx::assert_relative_eq;
    use pricer_core::math::black_scholes_price;
    use pricer_core::OptionType;

    fn config(n_simulations: usize, n_steps: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_simulations(n_simulations)
            .n_steps(n_steps)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pricer_creation() {
        let pricer = MonteCarloPricer::new(config(1000, 10)).unwrap();
        assert_eq!(pricer.config().n_simulations(), 1000);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let pricer = MonteCarloPricer::new(config(5_000, 20)).unwrap();
        let scenario = ScenarioParameters::default();

        let a = pricer.price(&scenario).unwrap();
        let b = pricer.price(&scenario).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sequential_chunking_matches_single_batch() {
        let scenario = ScenarioParameters::default();
        let chunked = MonteCarloConfig::builder()
            .n_simulations(2_500)
            .n_steps(12)
            .seed(9)
            .chunk_size(300)
            .build()
            .unwrap();
        let result = MonteCarloPricer::new(chunked)
            .unwrap()
            .price(&scenario)
            .unwrap();

        let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(9));
        let batch = simulate_paths(2_500, 12, &scenario, &mut normals).unwrap();
        let direct = price_batch(&batch, &scenario, 2_500);

        assert_eq!(result.price, direct);
    }

    #[test]
    fn test_parallel_close_to_sequential() {
        let scenario = ScenarioParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call);
        let parallel = MonteCarloConfig::builder()
            .n_simulations(40_000)
            .n_steps(10)
            .seed(42)
            .execution(ExecutionMode::Parallel)
            .chunk_size(1_000)
            .build()
            .unwrap();

        let seq = MonteCarloPricer::new(config(40_000, 10))
            .unwrap()
            .price(&scenario)
            .unwrap();
        let par = MonteCarloPricer::new(parallel)
            .unwrap()
            .price(&scenario)
            .unwrap();

        let tolerance = 4.0 * (seq.std_error + par.std_error);
        assert!(
            (seq.price - par.price).abs() < tolerance,
            "sequential {} vs parallel {}",
            seq.price,
            par.price
        );
        assert_eq!(par.n_simulations, 40_000);
    }

    #[test]
    fn test_matches_closed_form() {
        let scenario = ScenarioParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call);
        let result = MonteCarloPricer::new(config(50_000, 2))
            .unwrap()
            .price(&scenario)
            .unwrap();

        let reference = black_scholes_price(&scenario);
        assert!(
            (result.price - reference).abs() < 4.0 * result.std_error,
            "MC {} +/- {} vs closed form {}",
            result.price,
            result.std_error,
            reference
        );
    }

    #[test]
    fn test_normalisation_divisor_scales_price() {
        let scenario = ScenarioParameters::default();
        let own = MonteCarloPricer::new(config(1_000, 5))
            .unwrap()
            .price(&scenario)
            .unwrap();

        let nominal_config = MonteCarloConfig::builder()
            .n_simulations(1_000)
            .n_steps(5)
            .seed(42)
            .normalisation_divisor(4_000)
            .build()
            .unwrap();
        let nominal = MonteCarloPricer::new(nominal_config)
            .unwrap()
            .price(&scenario)
            .unwrap();

        assert_relative_eq!(nominal.price * 4.0, own.price, max_relative = 1e-12);
        assert!(own.std_error > 0.0);
        assert_relative_eq!(nominal.std_error * 4.0, own.std_error, max_relative = 1e-12);
        // Confidence interval tracks the reported price
        assert_relative_eq!(
            nominal.confidence_95() * 4.0,
            own.confidence_95(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let pricer = MonteCarloPricer::new(config(100, 10)).unwrap();
        let mut scenario = ScenarioParameters::default();
        scenario.maturity = 0.0;

        assert!(matches!(
            pricer.price(&scenario),
            Err(PricingError::InvalidParameters {
                name: "maturity",
                ..
            })
        ));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let scenario = ScenarioParameters::default();

        for execution in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let config = MonteCarloConfig::builder()
                .n_simulations(1_000)
                .n_steps(10)
                .execution(execution)
                .build()
                .unwrap();
            let result = MonteCarloPricer::new(config)
                .unwrap()
                .price_with_cancellation(&scenario, &token);

            assert_eq!(result, Err(PricingError::Cancelled { completed_runs: 0 }));
        }
    }

    #[test]
    fn test_confidence_intervals() {
        let result = PricingResult {
            price: 10.0,
            std_error: 0.1,
            n_simulations: 1,
            n_steps: 2,
        };
        assert_relative_eq!(result.confidence_95(), 0.196, epsilon = 1e-12);
        assert_relative_eq!(result.confidence_99(), 0.2576, epsilon = 1e-12);
    }
}
