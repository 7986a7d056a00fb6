pub mod belief;
pub mod combiner;
pub mod distribution;
pub mod elicitation;
pub mod error;
pub mod observation;
pub mod summary;
pub mod updater;

pub use belief::{BetaBelief, CredibleInterval};
pub use combiner::{UniformReferenceCombination, combine_all, combine_independent};
pub use distribution::{BetaCdf, StatrsBeta};
pub use elicitation::{
    ElicitationConfig, Quantile, from_quantiles, from_quantiles_in, from_quantiles_with,
};
pub use error::{BeliefError, Result};
pub use observation::TrialObservation;
pub use summary::{PosteriorSummary, PriorComparison, compare_priors};
pub use updater::{update, update_all, update_bernoulli};
