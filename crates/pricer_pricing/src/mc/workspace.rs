//! Dense simulation tables and the reusable workspace that owns them.
//!
//! # Memory Layout
//!
//! All tables use row-major contiguous layout for cache efficiency, one row
//! per simulation run:
//! - [`RandomShockTable`]: n_runs × (n_steps - 1) standard normal shocks
//! - [`SimulationBatch`]: n_runs × n_steps asset prices, column 0 is the spot
//!
//! [`PathWorkspace`] keeps both tables alive across chunks so a pricing run
//! allocates once per worker rather than once per chunk.

/// Standard normal shocks, one per run and time interval.
///
/// Column `j` drives the move from price point `j` to `j + 1`; there is no
/// shock for the initial price.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomShockTable {
    n_runs: usize,
    n_intervals: usize,
    shocks: Vec<f64>,
}

impl RandomShockTable {
    /// Creates a zeroed table for `n_runs` paths of `n_steps` price points.
    pub fn new(n_runs: usize, n_steps: usize) -> Self {
        let mut table = Self::default();
        table.resize(n_runs, n_steps);
        table
    }

    /// Reshapes the table, keeping the allocation when shrinking.
    pub fn resize(&mut self, n_runs: usize, n_steps: usize) {
        self.n_runs = n_runs;
        self.n_intervals = n_steps.saturating_sub(1);
        self.shocks.resize(n_runs * self.n_intervals, 0.0);
    }

    /// Returns the number of runs (rows).
    #[inline]
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// Returns the number of intervals (columns).
    #[inline]
    pub fn n_intervals(&self) -> usize {
        self.n_intervals
    }

    /// Returns the shocks of run `run`.
    #[inline]
    pub fn row(&self, run: usize) -> &[f64] {
        let start = run * self.n_intervals;
        &self.shocks[start..start + self.n_intervals]
    }

    /// Returns the shock of run `run` on interval `interval`.
    #[inline]
    pub fn get(&self, run: usize, interval: usize) -> f64 {
        self.shocks[run * self.n_intervals + interval]
    }

    /// Returns the whole table in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.shocks
    }

    /// Returns the whole table in row-major order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.shocks
    }
}

/// Simulated asset prices, one row per run.
///
/// `price(i, 0)` is the spot for every run and `price(i, n_steps - 1)` is the
/// terminal price the payoff is evaluated on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationBatch {
    n_runs: usize,
    n_steps: usize,
    prices: Vec<f64>,
}

impl SimulationBatch {
    /// Creates a zeroed batch of `n_runs` paths with `n_steps` price points.
    pub fn new(n_runs: usize, n_steps: usize) -> Self {
        let mut batch = Self::default();
        batch.resize(n_runs, n_steps);
        batch
    }

    /// Reshapes the batch, keeping the allocation when shrinking.
    pub fn resize(&mut self, n_runs: usize, n_steps: usize) {
        self.n_runs = n_runs;
        self.n_steps = n_steps;
        self.prices.resize(n_runs * n_steps, 0.0);
    }

    /// Returns the number of runs (rows).
    #[inline]
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// Returns the number of price points per path (columns).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the price of run `run` at step `step`.
    #[inline]
    pub fn price(&self, run: usize, step: usize) -> f64 {
        self.prices[run * self.n_steps + step]
    }

    /// Returns the full path of run `run`.
    #[inline]
    pub fn path(&self, run: usize) -> &[f64] {
        let start = run * self.n_steps;
        &self.prices[start..start + self.n_steps]
    }

    /// Returns the full path of run `run`, mutably.
    #[inline]
    pub fn path_mut(&mut self, run: usize) -> &mut [f64] {
        let start = run * self.n_steps;
        &mut self.prices[start..start + self.n_steps]
    }

    /// Returns the terminal price of run `run`.
    #[inline]
    pub fn terminal_price(&self, run: usize) -> f64 {
        self.price(run, self.n_steps - 1)
    }

    /// Iterates over terminal prices in run order.
    pub fn terminal_prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.prices
            .chunks_exact(self.n_steps.max(1))
            .take(self.n_runs)
            .map(|path| path[path.len() - 1])
    }

    /// Returns the whole batch in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }
}

/// Reusable buffers for simulating one chunk of runs.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathWorkspace;
///
/// let mut workspace = PathWorkspace::new(1000, 100);
/// assert_eq!(workspace.batch().n_runs(), 1000);
///
/// // The last chunk of a run is usually smaller
/// workspace.ensure_shape(250, 100);
/// assert_eq!(workspace.shocks().n_intervals(), 99);
/// assert_eq!(workspace.batch().n_runs(), 250);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathWorkspace {
    shocks: RandomShockTable,
    batch: SimulationBatch,
}

impl PathWorkspace {
    /// Creates a workspace shaped for `n_runs` paths of `n_steps` price points.
    pub fn new(n_runs: usize, n_steps: usize) -> Self {
        Self {
            shocks: RandomShockTable::new(n_runs, n_steps),
            batch: SimulationBatch::new(n_runs, n_steps),
        }
    }

    /// Reshapes both tables for the next chunk.
    pub fn ensure_shape(&mut self, n_runs: usize, n_steps: usize) {
        self.shocks.resize(n_runs, n_steps);
        self.batch.resize(n_runs, n_steps);
    }

    /// Returns the shock table.
    #[inline]
    pub fn shocks(&self) -> &RandomShockTable {
        &self.shocks
    }

    /// Returns the price table.
    #[inline]
    pub fn batch(&self) -> &SimulationBatch {
        &self.batch
    }

    /// Splits the workspace into the shock table (mutable) and price table (mutable).
    #[inline]
    pub fn shocks_mut_and_batch_mut(&mut self) -> (&mut RandomShockTable, &mut SimulationBatch) {
        (&mut self.shocks, &mut self.batch)
    }

    /// Consumes the workspace and returns the price table.
    #[inline]
    pub fn into_batch(self) -> SimulationBatch {
        self.batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shock_table_shape() {
        let table = RandomShockTable::new(10, 5);
        assert_eq!(table.n_runs(), 10);
        assert_eq!(table.n_intervals(), 4);
        assert_eq!(table.as_slice().len(), 40);
        assert_eq!(table.row(9).len(), 4);
    }

    #[test]
    fn test_batch_indexing() {
        let mut batch = SimulationBatch::new(3, 4);
        for run in 0..3 {
            for (step, value) in batch.path_mut(run).iter_mut().enumerate() {
                *value = (run * 10 + step) as f64;
            }
        }

        assert_eq!(batch.price(2, 1), 21.0);
        assert_eq!(batch.terminal_price(1), 13.0);
        assert_eq!(batch.path(0), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(batch.terminal_prices().collect::<Vec<_>>(), vec![3.0, 13.0, 23.0]);
    }

    #[test]
    fn test_workspace_shrinks_and_grows() {
        let mut ws = PathWorkspace::new(100, 10);
        ws.ensure_shape(7, 10);
        assert_eq!(ws.batch().as_slice().len(), 70);
        assert_eq!(ws.shocks().as_slice().len(), 63);
        assert_eq!(ws.batch().terminal_prices().count(), 7);

        ws.ensure_shape(200, 12);
        assert_eq!(ws.batch().as_slice().len(), 2400);
        assert_eq!(ws.shocks().n_intervals(), 11);
    }
}
