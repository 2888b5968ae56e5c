//! Closed-form references for validating Monte Carlo estimates.
//!
//! - `distributions`: Standard normal CDF
//! - `black_scholes`: European call/put prices under lognormal dynamics

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{black_scholes_call, black_scholes_price, black_scholes_put};
pub use distributions::norm_cdf;
