//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! using the exact log-space discretisation:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - σ²/2)dt + σ√dt × Z)
//! ```
//!
//! A path of `n_steps` price points spans `n_steps - 1` intervals, so
//! `dt = T / (n_steps - 1)`.
//!
//! # Compounding
//!
//! Prices are compounded with the forward running product
//! `price[j] = price[j-1] × g[j]`. This yields, operation for operation, the
//! left-to-right product `S × g[1] × … × g[j]`, at O(n_steps) per run.

use pricer_core::{PricingError, ScenarioParameters};

use super::config::MIN_STEPS;
use super::workspace::{PathWorkspace, RandomShockTable, SimulationBatch};
use crate::rng::{NormalVariateGenerator, UniformSource};

/// Per-step constants of the GBM discretisation.
///
/// Computed once per pricing run; identical for every run and step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStepConstants {
    /// Interval length `T / (n_steps - 1)`.
    pub dt: f64,
    /// Log drift per interval `(r - σ²/2)·dt`.
    pub drift: f64,
    /// Log diffusion scale per interval `σ·√dt`.
    pub vol_sqrt_dt: f64,
}

impl GbmStepConstants {
    /// Precomputes the step constants for a scenario and path length.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameters` if `n_steps < 2` or the
    /// resulting `dt` is not finite and positive.
    pub fn new(scenario: &ScenarioParameters, n_steps: usize) -> Result<Self, PricingError> {
        if n_steps < MIN_STEPS {
            return Err(PricingError::invalid_parameters(
                "n_steps",
                format!("must be at least {}, got {}", MIN_STEPS, n_steps),
            ));
        }

        let dt = scenario.maturity / (n_steps - 1) as f64;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PricingError::invalid_parameters(
                "maturity",
                format!("time step {} must be finite and positive", dt),
            ));
        }

        let sigma = scenario.volatility;
        Ok(Self {
            dt,
            drift: (scenario.rate - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        })
    }

    /// Multiplicative growth over one interval for shock `z`.
    #[inline]
    pub fn growth_factor(&self, z: f64) -> f64 {
        (self.drift + self.vol_sqrt_dt * z).exp()
    }
}

/// Fills the shock table row by row, one standard normal per interval.
pub fn fill_shocks<S: UniformSource>(
    shocks: &mut RandomShockTable,
    normals: &mut NormalVariateGenerator<S>,
) -> Result<(), PricingError> {
    normals.fill_standard_normal(shocks.as_mut_slice())
}

/// Builds absolute prices from the shock table with the forward recurrence.
///
/// # Panics
///
/// Debug builds assert that the shock table and batch have matching shapes.
pub fn compound_paths(
    shocks: &RandomShockTable,
    constants: &GbmStepConstants,
    spot: f64,
    batch: &mut SimulationBatch,
) {
    debug_assert_eq!(shocks.n_runs(), batch.n_runs());
    debug_assert_eq!(shocks.n_intervals() + 1, batch.n_steps());

    for run in 0..batch.n_runs() {
        let path = batch.path_mut(run);
        path[0] = spot;

        for (interval, &z) in shocks.row(run).iter().enumerate() {
            path[interval + 1] = path[interval] * constants.growth_factor(z);
        }
    }
}

/// Simulates the workspace's current shape of runs in place.
///
/// Draws are consumed in run-major order: all shocks of run 0, then run 1,
/// and so on.
pub fn generate_gbm_paths<S: UniformSource>(
    workspace: &mut PathWorkspace,
    spot: f64,
    constants: &GbmStepConstants,
    normals: &mut NormalVariateGenerator<S>,
) -> Result<(), PricingError> {
    let (shocks, batch) = workspace.shocks_mut_and_batch_mut();
    fill_shocks(shocks, normals)?;
    compound_paths(shocks, constants, spot, batch);
    Ok(())
}

/// Simulates `n_simulations` GBM paths of `n_steps` price points.
///
/// # Errors
///
/// Returns `PricingError::InvalidParameters` if `n_simulations < 1`,
/// `n_steps < 2` or the scenario is invalid, and propagates
/// `PricingError::GeneratorExhausted` from the normal generator.
///
/// # Examples
///
/// ```rust
/// use pricer_core::ScenarioParameters;
/// use pricer_pricing::mc::simulate_paths;
/// use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
///
/// let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
/// let batch = simulate_paths(100, 12, &ScenarioParameters::default(), &mut normals).unwrap();
///
/// assert_eq!(batch.n_runs(), 100);
/// assert_eq!(batch.price(0, 0), 18.2);
/// ```
pub fn simulate_paths<S: UniformSource>(
    n_simulations: usize,
    n_steps: usize,
    scenario: &ScenarioParameters,
    normals: &mut NormalVariateGenerator<S>,
) -> Result<SimulationBatch, PricingError> {
    if n_simulations == 0 {
        return Err(PricingError::invalid_parameters(
            "n_simulations",
            "must be at least 1, got 0",
        ));
    }
    scenario.validate()?;
    let constants = GbmStepConstants::new(scenario, n_steps)?;

    let mut workspace = PathWorkspace::new(n_simulations, n_steps);
    generate_gbm_paths(&mut workspace, scenario.spot, &constants, normals)?;
    Ok(workspace.into_batch())
}
