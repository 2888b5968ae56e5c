//! Monte Carlo pricing of European options under GBM.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig  (sizing, seed, divisor, execution mode)
//! ├── PathWorkspace     (reusable per-chunk buffers)
//! ├── NormalVariateGenerator<PricerRng>
//! └── Orchestration
//!     ├── generate_gbm_paths()
//!     ├── PayoffAccumulator::add_batch()
//!     └── normalisation and discounting
//! ```
//!
//! The building blocks are public so a single batch can be simulated and
//! priced without the orchestration layer:
//!
//! ```rust
//! use pricer_core::ScenarioParameters;
//! use pricer_pricing::mc::{price_batch, simulate_paths};
//! use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
//!
//! let scenario = ScenarioParameters::default();
//! let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
//!
//! let batch = simulate_paths(10_000, 100, &scenario, &mut normals).unwrap();
//! let price = price_batch(&batch, &scenario, 10_000);
//! assert!(price > 0.0);
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod paths;
pub mod payoff;
pub mod pricer;
pub mod workspace;

pub use cancel::CancellationToken;
pub use config::{
    ExecutionMode, MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_CHUNK_SIZE, DEFAULT_SEED,
    MAX_SIMULATIONS, MAX_STEPS, MIN_STEPS,
};
pub use error::ConfigError;
pub use paths::{compound_paths, fill_shocks, generate_gbm_paths, simulate_paths, GbmStepConstants};
pub use payoff::{compute_payoffs, price_batch, PayoffAccumulator};
pub use pricer::{MonteCarloPricer, PricingResult};
pub use workspace::{PathWorkspace, RandomShockTable, SimulationBatch};
