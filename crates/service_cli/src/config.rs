//! CLI configuration management.
//!
//! Handles loading the pricing configuration from a TOML file with
//! environment variable override support. Precedence, lowest first:
//! built-in defaults, file, `MCPRICE_*` variables, command-line flags.

use std::path::Path;

use pricer_core::ScenarioParameters;
use pricer_pricing::mc::{
    ConfigError as MonteCarloConfigError, ExecutionMode, MonteCarloConfig, DEFAULT_CHUNK_SIZE,
    DEFAULT_SEED,
};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `simulation.n_simulations`.
pub const ENV_N_SIMULATIONS: &str = "MCPRICE_N_SIMULATIONS";
/// Environment variable overriding `simulation.n_steps`.
pub const ENV_N_STEPS: &str = "MCPRICE_N_STEPS";
/// Environment variable overriding `simulation.seed`.
pub const ENV_SEED: &str = "MCPRICE_SEED";
/// Environment variable overriding `simulation.parallel`.
pub const ENV_PARALLEL: &str = "MCPRICE_PARALLEL";
/// Environment variable overriding `simulation.log_level`.
pub const ENV_LOG_LEVEL: &str = "MCPRICE_LOG_LEVEL";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Simulation settings (`[simulation]` table).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    /// Number of simulated paths
    pub n_simulations: usize,
    /// Price points per path, spot included
    pub n_steps: usize,
    /// Random seed
    pub seed: u64,
    /// Spread chunks over the rayon pool
    pub parallel: bool,
    /// Paths per chunk
    pub chunk_size: usize,
    /// Default log level when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            n_simulations: 100_000,
            n_steps: 100,
            seed: DEFAULT_SEED,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationSettings {
    /// Execution mode selected by `parallel`.
    pub fn execution(&self) -> ExecutionMode {
        if self.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Market scenario and option
    pub scenario: ScenarioParameters,
    /// Simulation settings
    pub simulation: SimulationSettings,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `MCPRICE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_N_SIMULATIONS) {
            self.simulation.n_simulations = parse_var(ENV_N_SIMULATIONS, &value)?;
        }

        if let Some(value) = lookup(ENV_N_STEPS) {
            self.simulation.n_steps = parse_var(ENV_N_STEPS, &value)?;
        }

        if let Some(value) = lookup(ENV_SEED) {
            self.simulation.seed = parse_var(ENV_SEED, &value)?;
        }

        if let Some(value) = lookup(ENV_PARALLEL) {
            self.simulation.parallel = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Env {
                        name: ENV_PARALLEL,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.simulation.log_level = value;
        }

        Ok(self)
    }

    /// Build the engine configuration from the simulation settings
    pub fn monte_carlo_config(&self) -> Result<MonteCarloConfig, MonteCarloConfigError> {
        MonteCarloConfig::builder()
            .n_simulations(self.simulation.n_simulations)
            .n_steps(self.simulation.n_steps)
            .seed(self.simulation.seed)
            .execution(self.simulation.execution())
            .chunk_size(self.simulation.chunk_size)
            .build()
    }

    /// Level for the tracing filter: `debug` when verbose, otherwise the
    /// configured level, normalised to lowercase.
    ///
    /// Any other string would parse as a target directive and silence every
    /// event, so it is rejected here.
    pub fn tracing_level(&self, verbose: bool) -> Result<&'static str, ConfigError> {
        if verbose {
            return Ok("debug");
        }
        VALID_LOG_LEVELS
            .iter()
            .copied()
            .find(|level| level.eq_ignore_ascii_case(&self.simulation.log_level))
            .ok_or_else(|| ConfigError::Validation(vec![self.invalid_log_level()]))
    }

    fn invalid_log_level(&self) -> String {
        format!(
            "Invalid log_level '{}'. Valid values: {:?}",
            self.simulation.log_level, VALID_LOG_LEVELS
        )
    }

    /// Validate the configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.tracing_level(false).is_err() {
            errors.push(self.invalid_log_level());
        }

        if let Err(e) = self.scenario.validate() {
            errors.push(format!("scenario: {}", e));
        }

        if let Err(e) = self.monte_carlo_config() {
            errors.push(format!("simulation: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        name,
        value: value.to_string(),
    })
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {path}: {message}")]
    Io {
        /// File path
        path: String,
        /// Underlying error message
        message: String,
    },
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Unparsable environment override
    #[error("Invalid value '{value}' for {name}")]
    Env {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
