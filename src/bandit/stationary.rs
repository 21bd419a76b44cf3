use super::distribution::{best_arm_index, validate_arms, ArmDistribution};
use super::source::RewardSource;
use crate::errors::ConfigurationError;
use crate::rng::seeded_rng;

use rand::rngs::SmallRng;

/// Bandit whose per-arm reward distributions are fixed for its lifetime.
pub struct StationaryBandit {
    arms: Vec<ArmDistribution>,
    best_arm: usize,
    rng: SmallRng,
}

impl StationaryBandit {
    pub fn new(
        arms: usize,
        distributions: Vec<ArmDistribution>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        validate_arms(arms, &distributions)?;

        Ok(Self {
            best_arm: best_arm_index(&distributions),
            arms: distributions,
            rng: seeded_rng(seed),
        })
    }
}

impl RewardSource for StationaryBandit {
    fn arms(&self) -> usize {
        self.arms.len()
    }

    fn get_reward(&mut self, arm: usize) -> f64 {
        self.arms[arm].sample(&mut self.rng)
    }

    fn best_arm(&self) -> usize {
        self.best_arm
    }
}
