use crate::belief::{BetaBelief, CredibleInterval};
use crate::error::Result;
use crate::observation::TrialObservation;
use crate::updater::update;
use log::debug;
use serde::Serialize;

/// Point and interval statistics of a belief, ready to be tabulated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosteriorSummary {
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    pub variance: f64,
    pub standard_deviation: f64,
    pub mode: Option<f64>,
    pub credible_interval: CredibleInterval,
}

impl BetaBelief {
    pub fn summary(&self, confidence: f64) -> Result<PosteriorSummary> {
        Ok(PosteriorSummary {
            alpha: self.alpha(),
            beta: self.beta(),
            mean: self.mean(),
            variance: self.variance(),
            standard_deviation: self.standard_deviation(),
            mode: self.mode(),
            credible_interval: self.credible_interval(confidence)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorComparison {
    pub label: String,
    pub prior: BetaBelief,
    pub posterior: PosteriorSummary,
}

/// Update every labelled prior with the same observation and summarise each posterior.
pub fn compare_priors<S: AsRef<str>>(
    priors: &[(S, BetaBelief)],
    observation: TrialObservation,
    confidence: f64,
) -> Result<Vec<PriorComparison>> {
    priors
        .iter()
        .map(|(label, prior)| {
            let posterior = update(prior, observation);
            debug!("{}: {} -> {}", label.as_ref(), prior, posterior);
            Ok(PriorComparison {
                label: label.as_ref().to_string(),
                prior: *prior,
                posterior: posterior.summary(confidence)?,
            })
        })
        .collect()
}
