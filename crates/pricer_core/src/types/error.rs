//! Error types for structured error handling.
//!
//! Every failure of the pricing pipeline is reported synchronously through
//! [`PricingError`]; no partial result is ever returned alongside an error.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameters`: Simulation bounds or scenario constants violate their invariants
/// - `InvalidRange`: A uniform sampling interval is empty or not finite
/// - `GeneratorExhausted`: Rejection sampling failed to accept within its bound
/// - `Cancelled`: The run was cancelled cooperatively before completion
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameters("n_steps", "must be at least 2, got 1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'n_steps': must be at least 2, got 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A simulation bound or scenario constant violates its invariant.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameters {
        /// Parameter name
        name: &'static str,
        /// Description of the violation
        reason: String,
    },

    /// Uniform sampling interval `[low, high)` is empty or not finite.
    #[error("Invalid sampling range [{low}, {high})")]
    InvalidRange {
        /// Lower bound (inclusive)
        low: f64,
        /// Upper bound (exclusive)
        high: f64,
    },

    /// The underlying uniform source never produced an acceptable pair.
    #[error("Normal generator exhausted after {attempts} rejected draws")]
    GeneratorExhausted {
        /// Number of rejected candidate pairs
        attempts: usize,
    },

    /// The pricing run was cancelled between simulation chunks.
    #[error("Pricing cancelled after {completed_runs} simulation runs")]
    Cancelled {
        /// Runs fully simulated before cancellation was observed
        completed_runs: usize,
    },
}

impl PricingError {
    /// Create an invalid parameters error
    pub fn invalid_parameters(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error was caused by caller input rather than the
    /// random source or cancellation.
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidParameters { .. } | Self::InvalidRange { .. })
    }
}
