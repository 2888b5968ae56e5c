//! # pricer_core: Foundation for Monte Carlo Option Pricing
//!
//! ## Layer Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Scenario description: [`ScenarioParameters`], [`OptionType`] (`types::scenario`)
//! - Error taxonomy: [`PricingError`] (`types::error`)
//! - Closed-form Black-Scholes reference prices (`math`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Scenario (de)serialisation for configuration files
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::black_scholes_price;
//! use pricer_core::types::{OptionType, ScenarioParameters};
//!
//! let scenario = ScenarioParameters::default();
//! scenario.validate().unwrap();
//! assert_eq!(scenario.option_type, OptionType::Call);
//!
//! let reference = black_scholes_price(&scenario);
//! assert!(reference > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{OptionType, PricingError, ScenarioParameters};
