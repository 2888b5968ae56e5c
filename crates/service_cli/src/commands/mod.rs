//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use clap::Args;
use pricer_core::OptionType;

use crate::config::AppConfig;

pub mod check;
pub mod compare;
pub mod price;

/// Simulation flags shared by the pricing commands.
///
/// Flags left unset keep the value from the configuration file or environment.
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// Price points per path, spot included (minimum 2)
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run chunks on all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Price a put instead of the configured option
    #[arg(long)]
    pub put: bool,
}

impl SimulationArgs {
    /// Applies the flags on top of a loaded configuration.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(n) = self.simulations {
            config.simulation.n_simulations = n;
        }
        if let Some(n) = self.steps {
            config.simulation.n_steps = n;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if self.parallel {
            config.simulation.parallel = true;
        }
        if self.put {
            config.scenario.option_type = OptionType::Put;
        }
        config
    }
}
