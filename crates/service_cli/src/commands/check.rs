//! Check command implementation
//!
//! Validates the resolved configuration and reports the execution environment.

use std::path::Path;

use tracing::info;

use crate::config::AppConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    info!("Checking configuration...");

    if config_path.exists() {
        println!("Config file:    {}", config_path.display());
    } else {
        println!("Config file:    {} (not found, defaults used)", config_path.display());
    }

    let scenario = &config.scenario;
    println!("[scenario]");
    println!("  spot          = {}", scenario.spot);
    println!("  strike        = {}", scenario.strike);
    println!("  rate          = {}", scenario.rate);
    println!("  volatility    = {}", scenario.volatility);
    println!("  maturity      = {}", scenario.maturity);
    println!("  option_type   = {:?}", scenario.option_type);

    let sim = &config.simulation;
    println!("[simulation]");
    println!("  n_simulations = {}", sim.n_simulations);
    println!("  n_steps       = {}", sim.n_steps);
    println!("  seed          = {}", sim.seed);
    println!("  parallel      = {}", sim.parallel);
    println!("  chunk_size    = {}", sim.chunk_size);
    println!("  log_level     = {}", sim.log_level);

    println!("Logical CPUs:   {}", num_cpus::get());
    println!("Rayon threads:  {}", rayon::current_num_threads());

    config.validate()?;
    println!("Configuration OK");

    info!("Check complete");
    Ok(())
}
