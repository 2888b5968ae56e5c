//! Monte Carlo simulation configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! pricing runs: simulation sizing, seeding, normalisation and execution mode.

use super::error::ConfigError;

/// Maximum number of simulation runs allowed.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Minimum number of time steps (price points) per path, initial spot included.
pub const MIN_STEPS: usize = 2;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Default number of runs simulated per work unit.
pub const DEFAULT_CHUNK_SIZE: usize = 4_096;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0;

/// How simulation runs are scheduled.
///
/// - `Sequential`: one generator, chunks processed in order; identical to a
///   single-batch simulation with the same seed
/// - `Parallel`: chunks spread over the rayon pool, each chunk owning an
///   independent sub-stream; reproducible for a given seed and chunk size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Single-threaded, single random stream.
    #[default]
    Sequential,
    /// Rayon data-parallel over chunks.
    Parallel,
}

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// `n_steps` counts price points per path including the initial spot, so a
/// path spans `n_steps - 1` time intervals of length `T / (n_steps - 1)`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{ExecutionMode, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder()
///     .n_simulations(100_000)
///     .n_steps(100)
///     .execution(ExecutionMode::Parallel)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simulations(), 100_000);
/// assert_eq!(config.n_steps(), 100);
/// assert_eq!(config.normalisation_divisor(), 100_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of simulation runs.
    n_simulations: usize,
    /// Number of price points per path.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Optional explicit divisor for the payoff mean.
    normalisation_divisor: Option<usize>,
    /// Scheduling of runs.
    execution: ExecutionMode,
    /// Runs per work unit.
    chunk_size: usize,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation runs.
    #[inline]
    pub fn n_simulations(&self) -> usize {
        self.n_simulations
    }

    /// Returns the number of price points per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the seed actually used by the pricer.
    #[inline]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Returns the divisor applied to the payoff sum.
    ///
    /// Defaults to the simulation count.
    #[inline]
    pub fn normalisation_divisor(&self) -> usize {
        self.normalisation_divisor.unwrap_or(self.n_simulations)
    }

    /// Returns the execution mode.
    #[inline]
    pub fn execution(&self) -> ExecutionMode {
        self.execution
    }

    /// Returns the number of runs per work unit.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of work units the runs are split into.
    #[inline]
    pub fn n_chunks(&self) -> usize {
        self.n_simulations.div_ceil(self.chunk_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_simulations` is 0 or greater than 10,000,000
    /// - `n_steps` is below 2 or greater than 10,000
    /// - `normalisation_divisor` or `chunk_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            return Err(ConfigError::InvalidSimulationCount(self.n_simulations));
        }
        if self.n_steps < MIN_STEPS || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.normalisation_divisor == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "normalisation_divisor",
                value: "must be positive".to_string(),
            });
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chunk_size",
                value: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Provides a fluent API for constructing Monte Carlo configurations
/// with validation at build time.
#[derive(Clone, Debug)]
pub struct MonteCarloConfigBuilder {
    n_simulations: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    normalisation_divisor: Option<usize>,
    execution: ExecutionMode,
    chunk_size: usize,
}

impl Default for MonteCarloConfigBuilder {
    fn default() -> Self {
        Self {
            n_simulations: None,
            n_steps: None,
            seed: None,
            normalisation_divisor: None,
            execution: ExecutionMode::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation runs, in [1, 10_000_000].
    #[inline]
    pub fn n_simulations(mut self, n_simulations: usize) -> Self {
        self.n_simulations = Some(n_simulations);
        self
    }

    /// Sets the number of price points per path, in [2, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an explicit divisor for the payoff mean.
    ///
    /// Only needed when the runs are one partition of a larger nominal
    /// simulation; otherwise the simulation count is used.
    #[inline]
    pub fn normalisation_divisor(mut self, divisor: usize) -> Self {
        self.normalisation_divisor = Some(divisor);
        self
    }

    /// Sets the execution mode.
    #[inline]
    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Sets the number of runs per work unit.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_simulations` not set or invalid
    /// - `n_steps` not set or invalid
    /// - `normalisation_divisor` or `chunk_size` is 0
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_simulations = self.n_simulations.ok_or(ConfigError::InvalidParameter {
            name: "n_simulations",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_simulations,
            n_steps,
            seed: self.seed,
            normalisation_divisor: self.normalisation_divisor,
            execution: self.execution,
            chunk_size: self.chunk_size,
        };

        config.validate()?;
        Ok(config)
    }
}
