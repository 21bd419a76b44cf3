use super::arm::{Arm, StepSize};
use super::epsilon_greedy::EpsilonGreedy;
use super::gradient::GradientBandit;
use super::ucb::Ucb;
use crate::errors::ConfigurationError;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Action-selection policy with incremental estimates. `select_action` and
/// `update` are total once construction has succeeded; the trial loop calls
/// them in strict select/update pairs.
pub trait Policy {
    fn arms(&self) -> usize;
    fn select_action(&mut self) -> usize;
    fn update(&mut self, arm: usize, reward: f64);
    fn stats(&self) -> PolicyStats;
}

/// Policy selector plus its hyperparameters, one variant per policy so each
/// carries exactly the state it needs.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    EpsilonGreedy {
        epsilon: f64,
        #[serde(default)]
        step_size: StepSize,
        #[serde(default)]
        initial_values: Option<Vec<f64>>,
        #[serde(default)]
        seed: Option<u64>,
    },
    Ucb {
        c: f64,
        #[serde(default)]
        step_size: StepSize,
        #[serde(default)]
        initial_values: Option<Vec<f64>>,
        #[serde(default)]
        seed: Option<u64>,
    },
    GradientBandit {
        alpha: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl PolicyType {
    pub fn build(self, arms: usize) -> Result<Box<dyn Policy + Send>, ConfigurationError> {
        let policy: Box<dyn Policy + Send> = match self {
            PolicyType::EpsilonGreedy {
                epsilon,
                step_size,
                initial_values,
                seed,
            } => Box::new(EpsilonGreedy::new(
                arms,
                epsilon,
                step_size,
                initial_values,
                seed,
            )?),
            PolicyType::Ucb {
                c,
                step_size,
                initial_values,
                seed,
            } => Box::new(Ucb::new(arms, c, step_size, initial_values, seed)?),
            PolicyType::GradientBandit { alpha, seed } => {
                Box::new(GradientBandit::new(arms, alpha, seed)?)
            }
        };

        Ok(policy)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub estimate: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct PolicyStats {
    pub arms: Vec<ArmStats>,
}

pub(super) fn initial_arms(
    arms: usize,
    initial_values: Option<Vec<f64>>,
) -> Result<Vec<Arm>, ConfigurationError> {
    if arms == 0 {
        return Err(ConfigurationError::NoArms);
    }
    let values = match initial_values {
        Some(values) if values.len() != arms => {
            return Err(ConfigurationError::ArmCountMismatch {
                expected: arms,
                actual: values.len(),
            })
        }
        Some(values) => values,
        None => vec![0.0; arms],
    };

    Ok(values.into_iter().map(Arm::new).collect())
}

/// Index of the maximal score, ties broken uniformly at random among all
/// maximizers. Infinite scores are legal and compare equal to each other.
pub(super) fn argmax_random_tie<I, R>(scores: I, rng: &mut R) -> usize
where
    I: Iterator<Item = f64> + Clone,
    R: Rng + ?Sized,
{
    let best = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    scores
        .enumerate()
        .filter(|&(_, score)| score == best)
        .map(|(index, _)| index)
        .choose(rng)
        .expect("bandit has at least one arm")
}
