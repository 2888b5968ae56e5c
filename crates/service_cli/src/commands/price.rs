//! Price command implementation
//!
//! Prices the configured European option with the pricer_pricing engine.

use std::time::Instant;

use pricer_pricing::mc::{MonteCarloPricer, PricingResult};
use tracing::info;

use crate::config::AppConfig;
use crate::Result;

/// Run the Monte Carlo pricing for a configuration
pub fn simulate(config: &AppConfig) -> Result<PricingResult> {
    let mc_config = config.monte_carlo_config()?;
    let pricer = MonteCarloPricer::new(mc_config)?;
    Ok(pricer.price(&config.scenario)?)
}

/// Run the price command
pub fn run(config: &AppConfig) -> Result<()> {
    let scenario = &config.scenario;
    let sim = &config.simulation;

    info!("Starting pricing...");
    info!(
        "  Scenario: S={} K={} r={} sigma={} T={} {:?}",
        scenario.spot,
        scenario.strike,
        scenario.rate,
        scenario.volatility,
        scenario.maturity,
        scenario.option_type
    );
    info!(
        "  Simulations: {}, steps: {}, seed: {}, execution: {:?}",
        sim.n_simulations,
        sim.n_steps,
        sim.seed,
        sim.execution()
    );

    let start = Instant::now();
    let result = simulate(config)?;
    let elapsed = start.elapsed();

    println!("Price:          {:.6}", result.price);
    println!("Std error:      {:.6}", result.std_error);
    println!(
        "95% interval:   [{:.6}, {:.6}]",
        result.price - result.confidence_95(),
        result.price + result.confidence_95()
    );
    println!(
        "Paths x steps:  {} x {}",
        result.n_simulations, result.n_steps
    );

    info!("Pricing complete in {:.3}s", elapsed.as_secs_f64());
    Ok(())
}
