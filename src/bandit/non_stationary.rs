use super::distribution::{best_arm_index, validate_arms, ArmDistribution};
use super::source::RewardSource;
use crate::errors::ConfigurationError;
use crate::rng::seeded_rng;

use rand::rngs::SmallRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Bandit whose arm means drift by an independent Gaussian random walk
/// after every draw. Scale parameters never move, so a slow walk gradually
/// reshuffles which arm is best while the noise level stays put.
pub struct NonStationaryBandit {
    arms: Vec<ArmDistribution>,
    best_arm: usize,
    random_walk_std: f64,
    rng: SmallRng,
    best_arm_history: Vec<usize>,
    mean_history: Option<Vec<Vec<f64>>>,
}

impl NonStationaryBandit {
    pub fn new(
        arms: usize,
        distributions: Vec<ArmDistribution>,
        random_walk_std: f64,
        record_means: bool,
        seed: Option<u64>,
    ) -> Result<Self, ConfigurationError> {
        validate_arms(arms, &distributions)?;
        if !random_walk_std.is_finite() || random_walk_std < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "random_walk_std",
                value: random_walk_std,
            });
        }

        Ok(Self {
            best_arm: best_arm_index(&distributions),
            arms: distributions,
            random_walk_std,
            rng: seeded_rng(seed),
            best_arm_history: Vec::new(),
            mean_history: record_means.then(Vec::new),
        })
    }

    /// Best arm as it stood before each draw, one entry per `get_reward`
    /// call. Lets the caller score "fraction optimal" per step.
    pub fn best_arm_history(&self) -> &[usize] {
        &self.best_arm_history
    }

    /// Pre-drift mean snapshots, one row per `get_reward` call, when
    /// recording was requested at construction.
    pub fn mean_history(&self) -> Option<&[Vec<f64>]> {
        self.mean_history.as_deref()
    }
}

impl RewardSource for NonStationaryBandit {
    fn arms(&self) -> usize {
        self.arms.len()
    }

    /// Draws from the pre-drift distribution, then walks every arm's mean.
    /// The ordering matters for reproducibility: the reward and the recorded
    /// histories both reflect the state the agent actually faced.
    fn get_reward(&mut self, arm: usize) -> f64 {
        self.best_arm_history.push(self.best_arm);
        if let Some(history) = self.mean_history.as_mut() {
            history.push(self.arms.iter().map(ArmDistribution::mean).collect());
        }

        let reward = self.arms[arm].sample(&mut self.rng);

        for distribution in &mut self.arms {
            let noise: f64 = self.rng.sample(StandardNormal);
            distribution.shift_mean(self.random_walk_std * noise);
        }
        self.best_arm = best_arm_index(&self.arms);

        reward
    }

    fn best_arm(&self) -> usize {
        self.best_arm
    }
}
