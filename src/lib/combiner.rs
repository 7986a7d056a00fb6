//! Merging independent Beta beliefs.
//!
//! A Beta(alpha, beta) belief is read as an unnormalised likelihood
//! pi^(alpha - 1) (1 - pi)^(beta - 1). Multiplying two of them sums the shape
//! parameters, and since each one already carries the Beta(1, 1) reference measure
//! one copy of it is taken back out. This only holds when both beliefs were built
//! against that same uniform reference, so the rule is kept under its own name
//! instead of being treated as a general law.

use crate::belief::BetaBelief;
use crate::error::{BeliefError, Result};
use log::{debug, warn};

/// Product of two beliefs that share the Beta(1, 1) reference measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformReferenceCombination;

impl UniformReferenceCombination {
    pub fn combine(&self, left: &BetaBelief, right: &BetaBelief) -> Result<BetaBelief> {
        let alpha = left.alpha() + right.alpha() - 1.0;
        let beta = left.beta() + right.beta() - 1.0;
        if !(alpha > 0.0 && beta > 0.0) {
            warn!(
                "Degenerate combination of {} and {}: alpha = {}, beta = {}",
                left, right, alpha, beta
            );
            return Err(BeliefError::DegenerateCombination {
                left: *left,
                right: *right,
                alpha,
                beta,
            });
        }
        let combined = BetaBelief::new(alpha, beta)?;
        debug!("Combined {} and {} into {}", left, right, combined);
        Ok(combined)
    }

    /// Left fold over `beliefs`; fails on an empty slice.
    pub fn combine_all(&self, beliefs: &[BetaBelief]) -> Result<BetaBelief> {
        let (first, rest) = beliefs.split_first().ok_or_else(|| {
            BeliefError::invalid("beliefs", 0.0, "need at least one belief to combine")
        })?;
        rest.iter().try_fold(*first, |combined, belief| self.combine(&combined, belief))
    }
}

pub fn combine_independent(left: &BetaBelief, right: &BetaBelief) -> Result<BetaBelief> {
    UniformReferenceCombination.combine(left, right)
}

pub fn combine_all(beliefs: &[BetaBelief]) -> Result<BetaBelief> {
    UniformReferenceCombination.combine_all(beliefs)
}
