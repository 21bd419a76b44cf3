use super::arm::{Arm, StepSize};
use super::policy::{argmax_random_tie, initial_arms, ArmStats, Policy, PolicyStats};
use crate::errors::ConfigurationError;
use crate::rng::seeded_rng;

use rand::rngs::SmallRng;
use rand::Rng;

/// With probability epsilon pick an arm uniformly, otherwise pick a greedy
/// arm, ties broken uniformly among the maximizers.
pub struct EpsilonGreedy {
    epsilon: f64,
    step_size: StepSize,
    arms: Vec<Arm>,
    rng: SmallRng,
}

impl EpsilonGreedy {
    pub fn new(
        arms: usize,
        epsilon: f64,
        step_size: StepSize,
        initial_values: Option<Vec<f64>>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(ConfigurationError::InvalidParameter {
                name: "epsilon",
                value: epsilon,
            });
        }
        step_size.validate(arms)?;

        Ok(Self {
            epsilon,
            step_size,
            arms: initial_arms(arms, initial_values)?,
            rng: seeded_rng(seed),
        })
    }
}

impl Policy for EpsilonGreedy {
    fn arms(&self) -> usize {
        self.arms.len()
    }

    fn select_action(&mut self) -> usize {
        if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(0..self.arms.len())
        } else {
            argmax_random_tie(self.arms.iter().map(|arm| arm.value), &mut self.rng)
        }
    }

    fn update(&mut self, arm: usize, reward: f64) {
        self.arms[arm].update(arm, reward, &self.step_size);
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self
                .arms
                .iter()
                .map(|arm| ArmStats {
                    pulls: arm.pulls,
                    estimate: arm.value,
                })
                .collect(),
        }
    }
}
