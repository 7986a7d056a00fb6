use crate::belief::BetaBelief;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BeliefError>;

#[derive(Debug, Error)]
pub enum BeliefError {
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The uniform reference correction pushed a shape parameter to zero or below.
    #[error(
        "Combining {left} and {right} gives non-positive shape parameters (alpha = {alpha}, beta = {beta})"
    )]
    DegenerateCombination {
        left: BetaBelief,
        right: BetaBelief,
        alpha: f64,
        beta: f64,
    },

    /// Quantile elicitation gave up. `alpha`, `beta` and `residual` describe the last
    /// iterate and are NaN when no concentration could place the first quantile.
    #[error(
        "Quantile elicitation did not converge after {iterations} iterations (alpha = {alpha}, beta = {beta}, residual = {residual})"
    )]
    NoConvergence {
        alpha: f64,
        beta: f64,
        residual: f64,
        iterations: usize,
    },

    #[error("Could not parse elicitation config: {0}")]
    Config(#[from] serde_json::Error),
}

impl BeliefError {
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        BeliefError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
