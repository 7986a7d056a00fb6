use crate::error::{BeliefError, Result};
use statrs::distribution::{Beta, ContinuousCDF};

/// Beta cumulative distribution function and its inverse.
///
/// Every probability and quantile in this crate goes through this trait. `BetaBelief`'s
/// `cdf_in`, `quantile_in` and `credible_interval_in` and the elicitation solver's
/// `from_quantiles_in` take the backend explicitly; the plain forms use `StatrsBeta`.
pub trait BetaCdf {
    /// P(X <= x) for X ~ Beta(alpha, beta). Values of `x` outside [0, 1] saturate.
    fn cdf(&self, x: f64, alpha: f64, beta: f64) -> Result<f64>;

    /// The `p` quantile of Beta(alpha, beta), for `p` in [0, 1].
    fn inverse_cdf(&self, p: f64, alpha: f64, beta: f64) -> Result<f64>;
}

/// `BetaCdf` backed by `statrs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatrsBeta;

impl StatrsBeta {
    fn distribution(alpha: f64, beta: f64) -> Result<Beta> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(BeliefError::invalid("alpha", alpha, "must be positive and finite"));
        }
        if !(beta.is_finite() && beta > 0.0) {
            return Err(BeliefError::invalid("beta", beta, "must be positive and finite"));
        }
        Beta::new(alpha, beta)
            .map_err(|_| BeliefError::invalid("alpha", alpha, "rejected by Beta distribution"))
    }
}

impl BetaCdf for StatrsBeta {
    fn cdf(&self, x: f64, alpha: f64, beta: f64) -> Result<f64> {
        if x.is_nan() {
            return Err(BeliefError::invalid("x", x, "must be a number"));
        }
        let distribution = Self::distribution(alpha, beta)?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        if x >= 1.0 {
            return Ok(1.0);
        }
        Ok(distribution.cdf(x))
    }

    fn inverse_cdf(&self, p: f64, alpha: f64, beta: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BeliefError::invalid("probability", p, "must be within [0, 1]"));
        }
        let distribution = Self::distribution(alpha, beta)?;
        Ok(distribution.inverse_cdf(p))
    }
}
