//! # Random Number Generation Infrastructure
//!
//! This module provides the random variate pipeline for Monte Carlo
//! simulations: a seeded uniform source and a standard normal generator
//! built on top of it with the Marsaglia polar method.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded explicitly; no global state
//! - **Explicit ownership**: Generators are passed by `&mut` through every call
//! - **Independence**: Parallel work units derive their own sub-stream seeds
//! - **Static dispatch**: [`NormalVariateGenerator`] is generic over its
//!   [`UniformSource`]; no `Box<dyn Trait>` in hot paths
//!
//! ## Module Structure
//!
//! - [`prng`]: [`UniformSource`] trait and the [`PricerRng`] seeded source
//! - [`polar`]: [`NormalVariateGenerator`] (Marsaglia polar rejection sampling)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalVariateGenerator, PricerRng, UniformSource};
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Uniform draw on an arbitrary interval [a, b)
//! let u = rng.sample(-1.0, 1.0).unwrap();
//! assert!((-1.0..1.0).contains(&u));
//!
//! // Standard normal variates
//! let mut normals = NormalVariateGenerator::new(rng);
//! let z = normals.next_standard_normal().unwrap();
//! assert!(z.is_finite());
//! ```

pub mod polar;
pub mod prng;

// Public re-exports
pub use polar::{NormalVariateGenerator, PolarDraw, MAX_REJECTIONS};
pub use prng::{PricerRng, UniformSource};
