//! Black-Scholes prices for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! With zero volatility the terminal price is the forward `S·e^(rT)` and both
//! prices collapse to the discounted intrinsic value of the forward.

use super::distributions::norm_cdf;
use crate::types::{OptionType, ScenarioParameters};

/// Below this total standard deviation σ√T the deterministic limit is used.
const MIN_TOTAL_STD_DEV: f64 = 1e-12;

#[inline]
fn d1_d2(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> (f64, f64) {
    let std_dev = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / std_dev;
    (d1, d1 - std_dev)
}

/// European call price.
///
/// # Examples
/// ```
/// use pricer_core::math::{black_scholes_call, black_scholes_put};
///
/// let call = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
/// let put = black_scholes_put(100.0, 100.0, 0.05, 0.2, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
pub fn black_scholes_call(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    let discount = (-rate * maturity).exp();
    if volatility * maturity.sqrt() < MIN_TOTAL_STD_DEV {
        return discount * (spot * (rate * maturity).exp() - strike).max(0.0);
    }

    let (d1, d2) = d1_d2(spot, strike, rate, volatility, maturity);
    spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
}

/// European put price.
pub fn black_scholes_put(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    let discount = (-rate * maturity).exp();
    if volatility * maturity.sqrt() < MIN_TOTAL_STD_DEV {
        return discount * (strike - spot * (rate * maturity).exp()).max(0.0);
    }

    let (d1, d2) = d1_d2(spot, strike, rate, volatility, maturity);
    strike * discount * norm_cdf(-d2) - spot * norm_cdf(-d1)
}

/// Closed-form price of the scenario's option.
pub fn black_scholes_price(scenario: &ScenarioParameters) -> f64 {
    let ScenarioParameters {
        spot,
        strike,
        rate,
        volatility,
        maturity,
        option_type,
    } = *scenario;

    match option_type {
        OptionType::Call => black_scholes_call(spot, strike, rate, volatility, maturity),
        OptionType::Put => black_scholes_put(spot, strike, rate, volatility, maturity),
    }
}
