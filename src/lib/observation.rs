use crate::error::{BeliefError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// `successes` out of `trials` Bernoulli trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "TrialCounts", into = "TrialCounts")]
pub struct TrialObservation {
    successes: u64,
    trials: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TrialCounts {
    successes: u64,
    trials: u64,
}

impl TryFrom<TrialCounts> for TrialObservation {
    type Error = BeliefError;

    fn try_from(counts: TrialCounts) -> Result<Self> {
        TrialObservation::new(counts.successes, counts.trials)
    }
}

impl From<TrialObservation> for TrialCounts {
    fn from(observation: TrialObservation) -> Self {
        TrialCounts {
            successes: observation.successes,
            trials: observation.trials,
        }
    }
}

impl TrialObservation {
    pub fn new(successes: u64, trials: u64) -> Result<Self> {
        if successes > trials {
            return Err(BeliefError::invalid(
                "successes",
                successes as f64,
                "cannot exceed the number of trials",
            ));
        }
        Ok(Self { successes, trials })
    }

    pub fn from_outcomes(outcomes: &[bool]) -> Self {
        let successes = outcomes.iter().filter(|&&outcome| outcome).count() as u64;
        Self {
            successes,
            trials: outcomes.len() as u64,
        }
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn failures(&self) -> u64 {
        self.trials - self.successes
    }

    pub fn is_empty(&self) -> bool {
        self.trials == 0
    }

    /// Observed success proportion, `None` without trials.
    pub fn proportion(&self) -> Option<f64> {
        if self.trials == 0 {
            return None;
        }
        Some(self.successes as f64 / self.trials as f64)
    }

    /// Componentwise sum, failing when either count would overflow.
    pub fn try_add(self, other: TrialObservation) -> Result<TrialObservation> {
        let trials = self.trials.checked_add(other.trials).ok_or_else(|| {
            BeliefError::invalid("trials", other.trials as f64, "sum overflows u64")
        })?;
        // successes <= trials, so this cannot overflow once trials did not
        let successes = self.successes + other.successes;
        Ok(TrialObservation { successes, trials })
    }
}

impl Add for TrialObservation {
    type Output = TrialObservation;

    /// Saturating componentwise sum. Both counts clamp at `u64::MAX`, which keeps
    /// `successes <= trials`; `try_add` reports the overflow instead.
    fn add(self, other: TrialObservation) -> TrialObservation {
        TrialObservation {
            successes: self.successes.saturating_add(other.successes),
            trials: self.trials.saturating_add(other.trials),
        }
    }
}

impl Sum for TrialObservation {
    fn sum<I: Iterator<Item = TrialObservation>>(iter: I) -> Self {
        iter.fold(TrialObservation::default(), Add::add)
    }
}

impl fmt::Display for TrialObservation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.successes, self.trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let observation = TrialObservation::new(10, 50).unwrap();
        assert_eq!(observation.successes(), 10);
        assert_eq!(observation.trials(), 50);
        assert_eq!(observation.failures(), 40);
        assert_eq!(observation.proportion(), Some(0.2));

        for (successes, trials) in vec![(0, 0), (0, 5), (5, 5)] {
            assert!(TrialObservation::new(successes, trials).is_ok());
        }
        assert!(matches!(
            TrialObservation::new(6, 5),
            Err(BeliefError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty() {
        let observation = TrialObservation::default();
        assert!(observation.is_empty());
        assert_eq!(observation.proportion(), None);
    }

    #[test]
    fn test_from_outcomes() {
        let observation = TrialObservation::from_outcomes(&[true, false, true, true, false]);
        assert_eq!(observation, TrialObservation::new(3, 5).unwrap());
        assert!(TrialObservation::from_outcomes(&[]).is_empty());
    }

    #[test]
    fn test_sum() {
        let observations = vec![
            TrialObservation::new(1, 4).unwrap(),
            TrialObservation::new(3, 3).unwrap(),
            TrialObservation::new(0, 2).unwrap(),
        ];
        let total: TrialObservation = observations.into_iter().sum();
        assert_eq!(total, TrialObservation::new(4, 9).unwrap());
    }

    #[test]
    fn test_add_at_u64_boundary() {
        let large = TrialObservation::new(0, u64::MAX).unwrap();
        let one = TrialObservation::new(1, 1).unwrap();

        let saturated = large + one;
        assert_eq!(saturated.trials(), u64::MAX);
        assert_eq!(saturated.successes(), 1);
        assert!(saturated.successes() <= saturated.trials());
        assert_eq!(saturated.failures(), u64::MAX - 1);

        assert!(matches!(
            large.try_add(one),
            Err(BeliefError::InvalidParameter { .. })
        ));
        let all = TrialObservation::new(u64::MAX, u64::MAX).unwrap();
        let saturated = all + all;
        assert_eq!(saturated, all);
        assert!(all.try_add(all).is_err());

        let sum = TrialObservation::new(2, 5)
            .unwrap()
            .try_add(TrialObservation::new(1, 1).unwrap())
            .unwrap();
        assert_eq!(sum, TrialObservation::new(3, 6).unwrap());
    }

    #[test]
    fn test_serde() {
        let observation = TrialObservation::new(10, 50).unwrap();
        let json = serde_json::to_string(&observation).unwrap();
        assert_eq!(json, r#"{"successes":10,"trials":50}"#);
        assert!(serde_json::from_str::<TrialObservation>(r#"{"successes":7,"trials":3}"#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TrialObservation::new(8, 100).unwrap()), "8/100");
    }
}
