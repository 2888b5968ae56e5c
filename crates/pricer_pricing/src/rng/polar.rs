//! Standard normal variates via the Marsaglia polar method.
//!
//! # Algorithm
//!
//! 1. Draw `x, y` independently from uniform `[-1, 1)`
//! 2. Compute `d = x² + y²`
//! 3. Reject when `d == 0` or `d >= 1` and draw again
//! 4. Accept: `x·√(-2·ln(d)/d)` and `y·√(-2·ln(d)/d)` are independent N(0, 1)
//!
//! The acceptance region (unit disk minus the origin) has probability π/4, so a
//! variate costs about 1.27 candidate pairs on average. A degenerate uniform
//! source is caught by a hard bound of [`MAX_REJECTIONS`] rejected pairs.
//!
//! # References
//!
//! - Marsaglia, G. & Bray, T. A. (1964). "A Convenient Method for Generating
//!   Normal Variables". SIAM Review, 6(3), 260-264.

use pricer_core::PricingError;

use super::prng::{PricerRng, UniformSource};

/// Rejected candidate pairs tolerated before the source is declared broken.
pub const MAX_REJECTIONS: usize = 10_000;

/// Outcome of one polar candidate pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PolarDraw {
    /// The pair landed inside the punctured unit disk.
    Accepted {
        /// Variate built from the `x` coordinate.
        first: f64,
        /// Variate built from the `y` coordinate.
        second: f64,
    },
    /// The pair landed outside the disk or on the origin.
    Rejected,
}

/// Standard normal generator owning its uniform source.
///
/// The pricing path consumes one variate per accepted pair through
/// [`next_standard_normal`](Self::next_standard_normal), discarding the
/// second polar variate. [`next_pair`](Self::next_pair) exposes both for
/// callers that can use them.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{NormalVariateGenerator, PricerRng};
///
/// let mut normals = NormalVariateGenerator::new(PricerRng::from_seed(42));
/// let z = normals.next_standard_normal().unwrap();
/// let (a, b) = normals.next_pair().unwrap();
/// assert!(z.is_finite() && a.is_finite() && b.is_finite());
/// ```
#[derive(Clone, Debug)]
pub struct NormalVariateGenerator<S: UniformSource = PricerRng> {
    source: S,
    max_rejections: usize,
}

impl<S: UniformSource> NormalVariateGenerator<S> {
    /// Creates a generator over `source` with the default rejection bound.
    #[inline]
    pub fn new(source: S) -> Self {
        Self::with_max_rejections(source, MAX_REJECTIONS)
    }

    /// Creates a generator with a custom rejection bound (at least 1).
    #[inline]
    pub fn with_max_rejections(source: S, max_rejections: usize) -> Self {
        Self {
            source,
            max_rejections: max_rejections.max(1),
        }
    }

    /// Returns the rejection bound.
    #[inline]
    pub fn max_rejections(&self) -> usize {
        self.max_rejections
    }

    /// Draws one candidate pair and applies the polar transform.
    ///
    /// # Errors
    ///
    /// Propagates `PricingError::InvalidRange` from the uniform source.
    #[inline]
    pub fn polar_candidate(&mut self) -> Result<PolarDraw, PricingError> {
        let x = self.source.sample(-1.0, 1.0)?;
        let y = self.source.sample(-1.0, 1.0)?;
        let d = x * x + y * y;

        if d == 0.0 || d >= 1.0 {
            return Ok(PolarDraw::Rejected);
        }

        let factor = (-2.0 * d.ln() / d).sqrt();
        Ok(PolarDraw::Accepted {
            first: x * factor,
            second: y * factor,
        })
    }

    /// Returns both independent variates of the next accepted pair.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::GeneratorExhausted` if no pair is accepted
    /// within the rejection bound.
    pub fn next_pair(&mut self) -> Result<(f64, f64), PricingError> {
        for _ in 0..self.max_rejections {
            if let PolarDraw::Accepted { first, second } = self.polar_candidate()? {
                return Ok((first, second));
            }
        }
        Err(PricingError::GeneratorExhausted {
            attempts: self.max_rejections,
        })
    }

    /// Returns one standard normal variate.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::GeneratorExhausted` if no pair is accepted
    /// within the rejection bound.
    #[inline]
    pub fn next_standard_normal(&mut self) -> Result<f64, PricingError> {
        self.next_pair().map(|(first, _)| first)
    }

    /// Fills the buffer with standard normal variates, one per accepted pair.
    ///
    /// Produces exactly the sequence of repeated
    /// [`next_standard_normal`](Self::next_standard_normal) calls.
    pub fn fill_standard_normal(&mut self, buffer: &mut [f64]) -> Result<(), PricingError> {
        for value in buffer.iter_mut() {
            *value = self.next_standard_normal()?;
        }
        Ok(())
    }
}
