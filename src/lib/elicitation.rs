//! Beta priors from elicited quantiles.
//!
//! Given two statements "P(pi <= x1) = p1" and "P(pi <= x2) = p2", find the Beta
//! distribution that satisfies both. The search is a nested bisection:
//!
//! * the outer loop bisects the log concentration `s = alpha + beta`;
//! * for a fixed `s` the inner loop bisects `alpha`, which moves the first quantile
//!   monotonically, until the first statement holds;
//! * the outer residual is the error on the second statement. Raising the
//!   concentration at a pinned first quantile pulls mass below `x2`, so the sign of
//!   the residual tells which half to keep.

use crate::belief::BetaBelief;
use crate::distribution::{BetaCdf, StatrsBeta};
use crate::error::{BeliefError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElicitationConfig {
    /// Iteration ceiling, applied to the outer and to each inner search.
    pub max_iterations: usize,
    /// Accepted absolute error on the second quantile's probability.
    pub tolerance: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for ElicitationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-10,
            lower_bound: 1e-3,
            upper_bound: 1e4,
        }
    }
}

impl ElicitationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ElicitationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(BeliefError::invalid(
                "max_iterations",
                0.0,
                "must be at least one",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(BeliefError::invalid(
                "tolerance",
                self.tolerance,
                "must be positive and finite",
            ));
        }
        if !(self.lower_bound.is_finite() && self.lower_bound > 0.0) {
            return Err(BeliefError::invalid(
                "lower_bound",
                self.lower_bound,
                "must be positive and finite",
            ));
        }
        if !(self.upper_bound.is_finite() && self.upper_bound > self.lower_bound) {
            return Err(BeliefError::invalid(
                "upper_bound",
                self.upper_bound,
                "must be finite and above lower_bound",
            ));
        }
        Ok(())
    }
}

/// "The probability that pi is at most `value` is `probability`."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantile {
    pub probability: f64,
    pub value: f64,
}

impl Quantile {
    pub fn new(probability: f64, value: f64) -> Self {
        Self { probability, value }
    }
}

impl From<(f64, f64)> for Quantile {
    fn from((probability, value): (f64, f64)) -> Self {
        Self { probability, value }
    }
}

fn validate_quantiles(first: &Quantile, second: &Quantile) -> Result<()> {
    for quantile in [first, second] {
        if !(quantile.probability > 0.0 && quantile.probability < 1.0) {
            return Err(BeliefError::invalid(
                "quantile probability",
                quantile.probability,
                "must be within (0, 1)",
            ));
        }
        if !(quantile.value > 0.0 && quantile.value < 1.0) {
            return Err(BeliefError::invalid(
                "quantile value",
                quantile.value,
                "must be within (0, 1)",
            ));
        }
    }
    if first.probability >= second.probability {
        return Err(BeliefError::invalid(
            "quantile probability",
            second.probability,
            "must increase from the first to the second quantile",
        ));
    }
    if first.value >= second.value {
        return Err(BeliefError::invalid(
            "quantile value",
            second.value,
            "must increase from the first to the second quantile",
        ));
    }
    Ok(())
}

/// Outcome of pinning the first quantile at a fixed concentration.
enum Placement {
    Placed(f64),
    TooDiffuse,
    TooConcentrated,
}

fn unreachable_at(concentration: f64, config: &ElicitationConfig) -> Placement {
    if concentration <= config.upper_bound {
        Placement::TooDiffuse
    } else {
        Placement::TooConcentrated
    }
}

/// Find `alpha` such that Beta(alpha, concentration - alpha) puts `quantile.probability`
/// below `quantile.value`, with both shapes inside the configured bounds.
fn place_quantile<C: BetaCdf>(
    cdf: &C,
    config: &ElicitationConfig,
    concentration: f64,
    quantile: &Quantile,
) -> Result<Placement> {
    let mut low = config.lower_bound.max(concentration - config.upper_bound);
    let mut high = config.upper_bound.min(concentration - config.lower_bound);
    if low >= high {
        return Ok(unreachable_at(concentration, config));
    }

    // The cdf at a fixed point falls as alpha grows.
    let at = |alpha: f64| cdf.cdf(quantile.value, alpha, concentration - alpha);
    if at(low)? < quantile.probability || at(high)? > quantile.probability {
        return Ok(unreachable_at(concentration, config));
    }

    for _ in 0..config.max_iterations {
        let mid = 0.5 * (low + high);
        if mid <= low || mid >= high {
            break;
        }
        if at(mid)? > quantile.probability {
            low = mid;
        } else {
            high = mid;
        }
    }
    Ok(Placement::Placed(0.5 * (low + high)))
}

pub fn from_quantiles(
    first: impl Into<Quantile>,
    second: impl Into<Quantile>,
) -> Result<BetaBelief> {
    from_quantiles_with(&ElicitationConfig::default(), first, second)
}

pub fn from_quantiles_with(
    config: &ElicitationConfig,
    first: impl Into<Quantile>,
    second: impl Into<Quantile>,
) -> Result<BetaBelief> {
    from_quantiles_in(&StatrsBeta, config, first.into(), second.into())
}

pub fn from_quantiles_in<C: BetaCdf>(
    cdf: &C,
    config: &ElicitationConfig,
    first: Quantile,
    second: Quantile,
) -> Result<BetaBelief> {
    config.validate()?;
    validate_quantiles(&first, &second)?;
    debug!(
        "Eliciting Beta prior from P(pi <= {}) = {} and P(pi <= {}) = {}",
        first.value, first.probability, second.value, second.probability
    );

    let mut low = (2.0 * config.lower_bound).ln();
    let mut high = (2.0 * config.upper_bound).ln();
    let (mut alpha, mut beta, mut residual) = (f64::NAN, f64::NAN, f64::NAN);
    let mut iterations = 0;

    while iterations < config.max_iterations {
        let mid = 0.5 * (low + high);
        if mid <= low || mid >= high {
            debug!("Concentration bracket collapsed at s = {}", mid.exp());
            break;
        }
        iterations += 1;
        let concentration = mid.exp();
        match place_quantile(cdf, config, concentration, &first)? {
            Placement::TooDiffuse => low = mid,
            Placement::TooConcentrated => high = mid,
            Placement::Placed(placed) => {
                alpha = placed;
                beta = concentration - placed;
                residual = cdf.cdf(second.value, alpha, beta)? - second.probability;
                if residual.abs() < config.tolerance {
                    let belief = BetaBelief::new(alpha, beta)?;
                    debug!("Elicited {} after {} iterations", belief, iterations);
                    return Ok(belief);
                }
                if residual < 0.0 {
                    low = mid;
                } else {
                    high = mid;
                }
            }
        }
    }

    warn!(
        "Quantile elicitation stopped after {} iterations: alpha = {}, beta = {}, residual = {}",
        iterations, alpha, beta, residual
    );
    Err(BeliefError::NoConvergence {
        alpha,
        beta,
        residual,
        iterations,
    })
}
