//! Market scenario for European option pricing.
//!
//! A [`ScenarioParameters`] value carries every market constant of a pricing
//! run: spot, strike, risk-free rate, volatility, maturity and the call/put
//! flag. Simulation sizing (`n_simulations`, `n_steps`) lives in the Monte
//! Carlo configuration of the pricing layer.

use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// European option exercise payoff direction.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!(OptionType::Call.payoff(20.0, 18.0), 2.0);
/// assert_eq!(OptionType::Put.payoff(20.0, 18.0), 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call: max(S_T - K, 0)
    #[default]
    Call,
    /// Put: max(K - S_T, 0)
    Put,
}

impl OptionType {
    /// Builds the option type from the reference boolean flag (`true` = call).
    #[inline]
    pub fn from_call_flag(call: bool) -> Self {
        if call {
            Self::Call
        } else {
            Self::Put
        }
    }

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, Self::Call)
    }

    /// Terminal payoff for a given terminal price and strike, clamped at zero.
    #[inline]
    pub fn payoff(self, terminal: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (terminal - strike).max(0.0),
            Self::Put => (strike - terminal).max(0.0),
        }
    }
}

/// Market constants of one pricing scenario.
///
/// The default is the reference scenario: S=18.2, K=18, r=0.0001, σ=0.34,
/// T=3 years, call.
///
/// # Invariants
///
/// Checked by [`validate`](Self::validate):
/// - `spot > 0`, `strike > 0`, `maturity > 0`
/// - `volatility >= 0`
/// - every field finite
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionType, ScenarioParameters};
///
/// let scenario = ScenarioParameters {
///     spot: 100.0,
///     strike: 95.0,
///     rate: 0.05,
///     volatility: 0.2,
///     maturity: 1.0,
///     option_type: OptionType::Put,
/// };
/// assert!(scenario.validate().is_ok());
/// assert!((scenario.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioParameters {
    /// Initial spot price (S).
    pub spot: f64,
    /// Strike price (K).
    pub strike: f64,
    /// Risk-free rate (r), annualised, continuously compounded.
    pub rate: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
    /// Call or put.
    pub option_type: OptionType,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            spot: 18.2,
            strike: 18.0,
            rate: 0.0001,
            volatility: 0.34,
            maturity: 3.0,
            option_type: OptionType::Call,
        }
    }
}

impl ScenarioParameters {
    /// Creates a new scenario.
    ///
    /// # Arguments
    ///
    /// * `spot` - Initial spot price
    /// * `strike` - Strike price
    /// * `rate` - Risk-free rate (annualised)
    /// * `volatility` - Volatility (annualised)
    /// * `maturity` - Time to maturity (years)
    /// * `option_type` - Call or put
    #[inline]
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
            option_type,
        }
    }

    /// Returns a copy with a different option type.
    #[inline]
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Returns a copy with a different volatility.
    #[inline]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Validates the scenario constants.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidParameters` naming the first field that
    /// violates its invariant.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot.is_finite() && self.spot > 0.0) {
            return Err(PricingError::invalid_parameters(
                "spot",
                format!("must be finite and positive, got {}", self.spot),
            ));
        }
        if !(self.strike.is_finite() && self.strike > 0.0) {
            return Err(PricingError::invalid_parameters(
                "strike",
                format!("must be finite and positive, got {}", self.strike),
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameters(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(PricingError::invalid_parameters(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        if !(self.maturity.is_finite() && self.maturity > 0.0) {
            return Err(PricingError::invalid_parameters(
                "maturity",
                format!("must be finite and positive, got {}", self.maturity),
            ));
        }
        Ok(())
    }

    /// Discount factor `exp(-r·T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Risk-neutral forward `S·exp(r·T)`.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.spot * (self.rate * self.maturity).exp()
    }

    /// Terminal payoff of this scenario's option for a terminal price.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        self.option_type.payoff(terminal, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_reference_scenario() {
        let s = ScenarioParameters::default();
        assert_eq!(s.spot, 18.2);
        assert_eq!(s.strike, 18.0);
        assert_eq!(s.rate, 0.0001);
        assert_eq!(s.volatility, 0.34);
        assert_eq!(s.maturity, 3.0);
        assert_eq!(s.option_type, OptionType::Call);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_option_type_from_flag() {
        assert_eq!(OptionType::from_call_flag(true), OptionType::Call);
        assert_eq!(OptionType::from_call_flag(false), OptionType::Put);
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Put.is_call());
    }

    #[test]
    fn test_payoff_clamped_at_zero() {
        assert_eq!(OptionType::Call.payoff(17.0, 18.0), 0.0);
        assert_eq!(OptionType::Put.payoff(17.0, 18.0), 1.0);
        assert_eq!(OptionType::Call.payoff(18.0, 18.0), 0.0);
        assert_eq!(OptionType::Put.payoff(18.0, 18.0), 0.0);
    }

    #[test]
    fn test_validation_rejects_each_field() {
        let base = ScenarioParameters::default();
        let cases = [
            ("spot", ScenarioParameters { spot: 0.0, ..base }),
            ("strike", ScenarioParameters { strike: -1.0, ..base }),
            ("rate", ScenarioParameters { rate: f64::NAN, ..base }),
            ("volatility", ScenarioParameters { volatility: -0.1, ..base }),
            ("maturity", ScenarioParameters { maturity: 0.0, ..base }),
            ("maturity", ScenarioParameters { maturity: f64::INFINITY, ..base }),
        ];

        for (field, scenario) in cases {
            match scenario.validate() {
                Err(PricingError::InvalidParameters { name, .. }) => assert_eq!(name, field),
                other => panic!("expected InvalidParameters for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        let s = ScenarioParameters::default().with_volatility(0.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_discount_and_forward() {
        let s = ScenarioParameters::new(100.0, 100.0, 0.05, 0.2, 2.0, OptionType::Call);
        assert_relative_eq!(s.discount_factor(), (-0.1_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(s.forward() * s.discount_factor(), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deserialise_partial_table() {
        let s: ScenarioParameters = toml::from_str("strike = 20.0\noption_type = \"put\"\n").unwrap();
        assert_eq!(s.strike, 20.0);
        assert_eq!(s.option_type, OptionType::Put);
        assert_eq!(s.spot, 18.2);
    }

    #[test]
    fn test_deserialise_rejects_misspelt_field() {
        let result = toml::from_str::<ScenarioParameters>("volatilty = 0.9
");
        assert!(result.is_err());
    }
}
