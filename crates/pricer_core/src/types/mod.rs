//! Scenario and error types shared across the pricing layers.
//!
//! This module provides:
//! - `scenario`: Market parameters of a single European option pricing run
//! - `error`: Structured error type for every failure the engine can report
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`ScenarioParameters`], [`OptionType`] from `scenario`
//! - [`PricingError`] from `error`

pub mod error;
pub mod scenario;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use scenario::{OptionType, ScenarioParameters};
