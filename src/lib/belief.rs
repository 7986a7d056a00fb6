use crate::distribution::{BetaCdf, StatrsBeta};
use crate::error::{BeliefError, Result};
use crate::observation::TrialObservation;
use serde::{Deserialize, Serialize};
use statrs::function::beta::ln_beta;
use statrs::function::factorial::ln_binomial;
use statrs::function::gamma::ln_gamma;
use std::fmt;

/// A Beta(alpha, beta) belief about a success probability.
///
/// Both shape parameters are positive and finite for every value of this type; the
/// only way to build one is through a validating constructor or an operation on
/// existing beliefs. Operations never mutate, they return a new belief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BetaParams", into = "BetaParams")]
pub struct BetaBelief {
    alpha: f64,
    beta: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BetaParams {
    alpha: f64,
    beta: f64,
}

impl TryFrom<BetaParams> for BetaBelief {
    type Error = BeliefError;

    fn try_from(params: BetaParams) -> Result<Self> {
        BetaBelief::new(params.alpha, params.beta)
    }
}

impl From<BetaBelief> for BetaParams {
    fn from(belief: BetaBelief) -> Self {
        BetaParams {
            alpha: belief.alpha,
            beta: belief.beta,
        }
    }
}

impl BetaBelief {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(BeliefError::invalid("alpha", alpha, "must be positive and finite"));
        }
        if !(beta.is_finite() && beta > 0.0) {
            return Err(BeliefError::invalid("beta", beta, "must be positive and finite"));
        }
        Ok(Self { alpha, beta })
    }

    /// Beta(1, 1), the uninformative state.
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Beta(0.5, 0.5)
    pub fn jeffreys() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.5,
        }
    }

    /// Read a past experiment's likelihood as a prior: Beta(y + 1, n - y + 1).
    pub fn from_likelihood(observation: TrialObservation) -> Self {
        Self::uniform().update(observation)
    }

    /// Method-of-moments fit from a target mean and variance.
    pub fn from_moments(mean: f64, variance: f64) -> Result<Self> {
        if !(mean > 0.0 && mean < 1.0) {
            return Err(BeliefError::invalid("mean", mean, "must be within (0, 1)"));
        }
        if !(variance > 0.0) {
            return Err(BeliefError::invalid("variance", variance, "must be positive"));
        }
        let common = mean * (1.0 - mean) / variance - 1.0;
        if common <= 0.0 {
            return Err(BeliefError::invalid(
                "variance",
                variance,
                "must be smaller than mean * (1 - mean)",
            ));
        }
        Self::new(mean * common, (1.0 - mean) * common)
    }

    /// Method-of-moments fit over observed proportions, each within [0, 1].
    pub fn from_proportions(proportions: &[f64]) -> Result<Self> {
        if proportions.len() < 2 {
            return Err(BeliefError::invalid(
                "proportions",
                proportions.len() as f64,
                "need at least two values",
            ));
        }
        if let Some(&bad) = proportions.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(BeliefError::invalid("proportion", bad, "must be within [0, 1]"));
        }
        let count = proportions.len() as f64;
        let mean = proportions.iter().sum::<f64>() / count;
        let variance = proportions.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count;
        Self::from_moments(mean, variance)
    }

    pub(crate) fn from_positive(alpha: f64, beta: f64) -> Self {
        debug_assert!(alpha > 0.0 && beta > 0.0);
        Self { alpha, beta }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn is_uniform(&self) -> bool {
        self.alpha == 1.0 && self.beta == 1.0
    }

    /// alpha + beta, the number of pseudo-trials the belief is worth.
    pub fn effective_sample_size(&self) -> f64 {
        self.alpha + self.beta
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn variance(&self) -> f64 {
        let numerator = self.alpha * self.beta;
        let denominator = (self.alpha + self.beta).powf(2.0) * (self.alpha + self.beta + 1.0);
        numerator / denominator
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Interior mode, defined only when both shape parameters exceed one.
    pub fn mode(&self) -> Option<f64> {
        if self.alpha > 1.0 && self.beta > 1.0 {
            Some((self.alpha - 1.0) / (self.alpha + self.beta - 2.0))
        } else {
            None
        }
    }

    pub fn log_beta(&self) -> f64 {
        ln_gamma(self.alpha) + ln_gamma(self.beta) - ln_gamma(self.alpha + self.beta)
    }

    /// Log density on the open unit interval, negative infinity elsewhere.
    pub fn log_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return f64::NEG_INFINITY;
        }
        (self.alpha - 1.0) * x.ln() + (self.beta - 1.0) * (1.0 - x).ln() - self.log_beta()
    }

    pub fn pdf(&self, x: f64) -> f64 {
        self.log_pdf(x).exp()
    }

    pub fn cdf(&self, x: f64) -> Result<f64> {
        self.cdf_in(&StatrsBeta, x)
    }

    pub fn cdf_in<C: BetaCdf>(&self, cdf: &C, x: f64) -> Result<f64> {
        cdf.cdf(x, self.alpha, self.beta)
    }

    pub fn probability_below(&self, x: f64) -> Result<f64> {
        self.cdf(x)
    }

    /// Tail probability P(pi > x).
    pub fn probability_above(&self, x: f64) -> Result<f64> {
        Ok(1.0 - self.cdf(x)?)
    }

    pub fn quantile(&self, p: f64) -> Result<f64> {
        self.quantile_in(&StatrsBeta, p)
    }

    pub fn quantile_in<C: BetaCdf>(&self, cdf: &C, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(BeliefError::invalid("probability", p, "must be within (0, 1)"));
        }
        cdf.inverse_cdf(p, self.alpha, self.beta)
    }

    /// Equal-tailed interval holding `confidence` of the probability mass.
    pub fn credible_interval(&self, confidence: f64) -> Result<CredibleInterval> {
        self.credible_interval_in(&StatrsBeta, confidence)
    }

    pub fn credible_interval_in<C: BetaCdf>(
        &self,
        cdf: &C,
        confidence: f64,
    ) -> Result<CredibleInterval> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(BeliefError::invalid(
                "confidence",
                confidence,
                "must be within (0, 1)",
            ));
        }
        let tail = (1.0 - confidence) / 2.0;
        Ok(CredibleInterval {
            lower: self.quantile_in(cdf, tail)?,
            upper: self.quantile_in(cdf, 1.0 - tail)?,
            confidence,
        })
    }

    /// Beta-binomial probability of `successes` in `trials` future trials.
    pub fn posterior_predictive(&self, successes: u64, trials: u64) -> f64 {
        if successes > trials {
            return 0.0;
        }
        let failures = (trials - successes) as f64;
        let log_p = ln_binomial(trials, successes)
            + ln_beta(self.alpha + successes as f64, self.beta + failures)
            - ln_beta(self.alpha, self.beta);
        log_p.exp()
    }

    pub fn update(&self, observation: TrialObservation) -> BetaBelief {
        crate::updater::update(self, observation)
    }
}

impl Default for BetaBelief {
    fn default() -> Self {
        Self::uniform()
    }
}

impl fmt::Display for BetaBelief {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Beta({}, {})", self.alpha, self.beta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibleInterval {
    pub lower: f64,
    pub upper: f64,
    pub confidence: f64,
}

impl CredibleInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}
