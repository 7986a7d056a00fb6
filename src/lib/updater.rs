use crate::belief::BetaBelief;
use crate::observation::TrialObservation;
use log::debug;

/// Conjugate Beta-Binomial update: Beta(alpha + y, beta + n - y).
pub fn update(prior: &BetaBelief, observation: TrialObservation) -> BetaBelief {
    BetaBelief::from_positive(
        prior.alpha() + observation.successes() as f64,
        prior.beta() + observation.failures() as f64,
    )
}

/// Update with each observation in turn.
pub fn update_all<I>(prior: &BetaBelief, observations: I) -> BetaBelief
where
    I: IntoIterator<Item = TrialObservation>,
{
    let mut posterior = *prior;
    for observation in observations {
        posterior = update(&posterior, observation);
    }
    debug!("Sequential update {} -> {}", prior, posterior);
    posterior
}

/// Update with individual Bernoulli outcomes, `true` counting as a success.
pub fn update_bernoulli(prior: &BetaBelief, outcomes: &[bool]) -> BetaBelief {
    update(prior, TrialObservation::from_outcomes(outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_update_expert_prior() {
        let prior = BetaBelief::new(20.96, 145.74).unwrap();
        let posterior = update(&prior, TrialObservation::new(10, 50).unwrap());
        assert!(close(posterior.alpha(), 30.96));
        assert!(close(posterior.beta(), 185.74));
    }

    #[test]
    fn test_update_likelihood_prior() {
        let prior = BetaBelief::from_likelihood(TrialObservation::new(8, 100).unwrap());
        assert_eq!(prior, BetaBelief::new(9.0, 93.0).unwrap());
        let posterior = prior.update(TrialObservation::new(10, 50).unwrap());
        assert_eq!(posterior, BetaBelief::new(19.0, 133.0).unwrap());
    }

    #[test]
    fn test_update_does_not_touch_prior() {
        let prior = BetaBelief::new(2.0, 3.0).unwrap();
        let _ = update(&prior, TrialObservation::new(4, 9).unwrap());
        assert_eq!(prior, BetaBelief::new(2.0, 3.0).unwrap());
    }

    #[test]
    fn test_zero_observation() {
        for prior in vec![
            BetaBelief::uniform(),
            BetaBelief::jeffreys(),
            BetaBelief::new(20.96, 145.74).unwrap(),
        ] {
            assert_eq!(update(&prior, TrialObservation::default()), prior);
        }
    }

    #[test]
    fn test_update_all() {
        let prior = BetaBelief::uniform();
        let observations = vec![
            TrialObservation::new(2, 5).unwrap(),
            TrialObservation::new(0, 3).unwrap(),
            TrialObservation::new(4, 4).unwrap(),
        ];
        let posterior = update_all(&prior, observations.clone());
        assert_eq!(posterior, BetaBelief::new(7.0, 7.0).unwrap());
        let total: TrialObservation = observations.into_iter().sum();
        assert_eq!(update(&prior, total), posterior);
        assert_eq!(update_all(&prior, Vec::new()), prior);
    }

    #[test]
    fn test_update_bernoulli() {
        let posterior = update_bernoulli(&BetaBelief::uniform(), &[true, true, false]);
        assert_eq!(posterior, BetaBelief::new(3.0, 2.0).unwrap());
    }

    fn observation() -> impl Strategy<Value = TrialObservation> {
        (0u64..10_000)
            .prop_flat_map(|n| (0..=n, Just(n)))
            .prop_map(|(y, n)| TrialObservation::new(y, n).unwrap())
    }

    proptest! {
        #[test]
        fn prop_update_adds_counts(
            alpha in 0.01f64..1000.0,
            beta in 0.01f64..1000.0,
            obs in observation(),
        ) {
            let prior = BetaBelief::new(alpha, beta).unwrap();
            let posterior = update(&prior, obs);
            prop_assert_eq!(posterior.alpha(), alpha + obs.successes() as f64);
            prop_assert_eq!(posterior.beta(), beta + (obs.trials() - obs.successes()) as f64);
        }

        // Integer-valued shapes keep the sums exact, so order cannot matter.
        #[test]
        fn prop_sequential_updates_commute(
            alpha in 1u32..500,
            beta in 1u32..500,
            first in observation(),
            second in observation(),
        ) {
            let prior = BetaBelief::new(alpha as f64, beta as f64).unwrap();
            let forward = update(&update(&prior, first), second);
            let backward = update(&update(&prior, second), first);
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward, update(&prior, first + second));
        }
    }
}
