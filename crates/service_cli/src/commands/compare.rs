//! Compare command implementation
//!
//! Prices the configured option by Monte Carlo and reports it next to the
//! Black-Scholes closed form.

use pricer_core::math::black_scholes_price;
use tracing::{info, warn};

use super::price::simulate;
use crate::config::AppConfig;
use crate::Result;

/// Monte Carlo estimate against its closed-form reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Monte Carlo price
    pub monte_carlo: f64,
    /// Monte Carlo standard error
    pub std_error: f64,
    /// Black-Scholes price
    pub closed_form: f64,
}

impl Comparison {
    /// Signed difference, Monte Carlo minus closed form
    pub fn difference(&self) -> f64 {
        self.monte_carlo - self.closed_form
    }

    /// Relative difference against the closed form
    pub fn relative_difference(&self) -> f64 {
        if self.closed_form == 0.0 {
            return self.difference().abs();
        }
        self.difference() / self.closed_form
    }

    /// Difference in units of the standard error
    pub fn z_score(&self) -> f64 {
        if self.std_error == 0.0 {
            return 0.0;
        }
        self.difference() / self.std_error
    }
}

/// Price by Monte Carlo and by the closed form
pub fn compare(config: &AppConfig) -> Result<Comparison> {
    let result = simulate(config)?;
    Ok(Comparison {
        monte_carlo: result.price,
        std_error: result.std_error,
        closed_form: black_scholes_price(&config.scenario),
    })
}

/// Run the compare command
pub fn run(config: &AppConfig) -> Result<()> {
    info!("Comparing Monte Carlo against Black-Scholes...");
    let comparison = compare(config)?;

    println!("Monte Carlo:    {:.6} +/- {:.6}", comparison.monte_carlo, comparison.std_error);
    println!("Black-Scholes:  {:.6}", comparison.closed_form);
    println!(
        "Difference:     {:+.6} ({:+.3}%, {:+.2} s.e.)",
        comparison.difference(),
        100.0 * comparison.relative_difference(),
        comparison.z_score()
    );

    if comparison.z_score().abs() > 4.0 {
        warn!(
            "Monte Carlo estimate is {:.1} standard errors from the closed form",
            comparison.z_score().abs()
        );
    }

    info!("Comparison complete");
    Ok(())
}
