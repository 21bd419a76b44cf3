use crate::errors::ConfigurationError;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Reward distribution of a single arm: a family plus its current
/// parameters. The mean is the only parameter the non-stationary random
/// walk moves; scales never change after construction.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ArmDistribution {
    Normal { mean: f64, std_dev: f64 },
    Degenerate { value: f64 },
}

impl ArmDistribution {
    pub fn mean(&self) -> f64 {
        match self {
            Self::Normal { mean, .. } => *mean,
            Self::Degenerate { value } => *value,
        }
    }

    pub(super) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Normal { mean, std_dev } => {
                let noise: f64 = rng.sample(StandardNormal);
                mean + std_dev * noise
            }
            Self::Degenerate { value } => *value,
        }
    }

    pub(super) fn shift_mean(&mut self, delta: f64) {
        match self {
            Self::Normal { mean, .. } => *mean += delta,
            Self::Degenerate { value } => *value += delta,
        }
    }

    pub(super) fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            Self::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(ConfigurationError::InvalidParameter {
                        name: "mean",
                        value: mean,
                    });
                }
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(ConfigurationError::InvalidParameter {
                        name: "std_dev",
                        value: std_dev,
                    });
                }
                Ok(())
            }
            Self::Degenerate { value } => {
                if value.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigurationError::InvalidParameter {
                        name: "value",
                        value,
                    })
                }
            }
        }
    }
}

pub(super) fn validate_arms(
    arms: usize,
    distributions: &[ArmDistribution],
) -> Result<(), ConfigurationError> {
    if arms == 0 {
        return Err(ConfigurationError::NoArms);
    }
    if distributions.len() != arms {
        return Err(ConfigurationError::ArmCountMismatch {
            expected: arms,
            actual: distributions.len(),
        });
    }
    distributions
        .iter()
        .try_for_each(ArmDistribution::validate)
}

/// Arm with the highest current mean, lowest index on ties.
pub(super) fn best_arm_index(distributions: &[ArmDistribution]) -> usize {
    let mut best = 0;
    for (index, distribution) in distributions.iter().enumerate().skip(1) {
        if distribution.mean() > distributions[best].mean() {
            best = index;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn degenerate_arms_sample_their_value() {
        let mut rng = seeded_rng(Some(1));
        let distribution = ArmDistribution::Degenerate { value: 5.0 };
        assert_eq!(distribution.sample(&mut rng), 5.0);
    }

    #[test]
    fn shifting_moves_only_the_mean() {
        let mut distribution = ArmDistribution::Normal {
            mean: 1.0,
            std_dev: 2.0,
        };
        distribution.shift_mean(0.5);
        assert_eq!(
            distribution,
            ArmDistribution::Normal {
                mean: 1.5,
                std_dev: 2.0
            }
        );
    }

    #[test]
    fn best_arm_ties_go_to_the_lowest_index() {
        let distributions = [
            ArmDistribution::Degenerate { value: 0.5 },
            ArmDistribution::Normal {
                mean: 1.0,
                std_dev: 1.0,
            },
            ArmDistribution::Degenerate { value: 1.0 },
        ];
        assert_eq!(best_arm_index(&distributions), 1);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(ArmDistribution::Normal {
            mean: f64::INFINITY,
            std_dev: 1.0
        }
        .validate()
        .is_err());
        assert!(ArmDistribution::Normal {
            mean: 0.0,
            std_dev: -1.0
        }
        .validate()
        .is_err());
        assert!(ArmDistribution::Degenerate { value: f64::NAN }
            .validate()
            .is_err());
        assert!(ArmDistribution::Normal {
            mean: 0.0,
            std_dev: 0.0
        }
        .validate()
        .is_ok());
    }
}
