//! Payoff evaluation and aggregation.
//!
//! European payoffs depend only on the terminal price of each path. Payoffs
//! are folded into a [`PayoffAccumulator`] so chunks simulated separately,
//! or on different threads, can be merged before the final normalisation
//! and discounting.

use pricer_core::ScenarioParameters;

use super::workspace::SimulationBatch;

/// Evaluates the payoff of every run in the batch, in run order.
pub fn compute_payoffs(batch: &SimulationBatch, scenario: &ScenarioParameters) -> Vec<f64> {
    batch
        .terminal_prices()
        .map(|terminal| scenario.payoff(terminal))
        .collect()
}

/// Running sums of payoffs over a set of runs.
///
/// `sum_sq` feeds the standard error estimate; `sum` alone determines the
/// price.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PayoffAccumulator {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl PayoffAccumulator {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one payoff.
    #[inline]
    pub fn add(&mut self, payoff: f64) {
        self.sum += payoff;
        self.sum_sq += payoff * payoff;
        self.count += 1;
    }

    /// Adds the payoff of every run in the batch, in run order.
    pub fn add_batch(&mut self, batch: &SimulationBatch, scenario: &ScenarioParameters) {
        for terminal in batch.terminal_prices() {
            self.add(scenario.payoff(terminal));
        }
    }

    /// Folds another accumulator into this one.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
    }

    /// Returns the payoff sum.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the number of payoffs added.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Present value: `sum / divisor × discount_factor`.
    #[inline]
    pub fn price(&self, divisor: usize, discount_factor: f64) -> f64 {
        self.sum / divisor as f64 * discount_factor
    }

    /// Discounted standard error of [`price`](Self::price) for the same
    /// `divisor`.
    ///
    /// The sample mean's standard error is scaled by `count / divisor`, so a
    /// partition of a larger nominal simulation reports the error of its own
    /// contribution. Uses the unbiased sample variance; zero with fewer than
    /// two payoffs.
    pub fn std_error(&self, divisor: usize, discount_factor: f64) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        // Clamp rounding noise on near-constant payoffs
        let variance = ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0);
        (variance / n).sqrt() * (n / divisor as f64) * discount_factor
    }
}

/// Prices a fully simulated batch.
///
/// Sums the terminal payoffs, divides by `divisor` and discounts with
/// `exp(-rT)`. Pass the batch's run count as `divisor` unless the batch is one
/// partition of a larger nominal simulation.
///
/// # Examples
///
/// ```rust
/// use pricer_core::ScenarioParameters;
/// use pricer_pricing::mc::{price_batch, simulate_paths};
/// use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
///
/// let scenario = ScenarioParameters::default();
/// let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(7));
/// let batch = simulate_paths(1_000, 10, &scenario, &mut normals).unwrap();
///
/// let price = price_batch(&batch, &scenario, batch.n_runs());
/// assert!(price.is_finite() && price >= 0.0);
/// ```
pub fn price_batch(batch: &SimulationBatch, scenario: &ScenarioParameters, divisor: usize) -> f64 {
    let mut acc = PayoffAccumulator::new();
    acc.add_batch(batch, scenario);
    acc.price(divisor, scenario.discount_factor())
}
