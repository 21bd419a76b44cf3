use super::policy::{ArmStats, Policy, PolicyStats};
use crate::errors::ConfigurationError;
use crate::rng::seeded_rng;

use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use rand_distr::Distribution;

/// Gradient bandit: numerical preferences per arm, turned into a softmax
/// action distribution. Preferences move against a running mean-reward
/// baseline rather than tracking values directly.
pub struct GradientBandit {
    alpha: f64,
    preferences: Vec<f64>,
    probabilities: Vec<f64>,
    pulls: Vec<u64>,
    baseline: f64,
    // 1-indexed step counter, bumped once per update.
    t: u64,
    rng: SmallRng,
}

impl GradientBandit {
    pub fn new(arms: usize, alpha: f64, seed: Option<u64>) -> Result<Self, ConfigurationError> {
        if arms == 0 {
            return Err(ConfigurationError::NoArms);
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }

        Ok(Self {
            alpha,
            preferences: vec![0.0; arms],
            probabilities: vec![1.0 / arms as f64; arms],
            pulls: vec![0; arms],
            baseline: 0.0,
            t: 1,
            rng: seeded_rng(seed),
        })
    }
}

impl Policy for GradientBandit {
    fn arms(&self) -> usize {
        self.preferences.len()
    }

    fn select_action(&mut self) -> usize {
        WeightedIndex::new(&self.probabilities)
            .expect("softmax probabilities are positive")
            .sample(&mut self.rng)
    }

    fn update(&mut self, arm: usize, reward: f64) {
        let advantage = reward - self.baseline;
        for (index, preference) in self.preferences.iter_mut().enumerate() {
            let indicator = if index == arm { 1.0 } else { 0.0 };
            *preference += self.alpha * advantage * (indicator - self.probabilities[index]);
        }
        self.probabilities = softmax(&self.preferences);
        self.baseline += advantage / self.t as f64;
        self.t += 1;
        self.pulls[arm] += 1;
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            arms: self
                .pulls
                .iter()
                .zip(&self.probabilities)
                .map(|(&pulls, &probability)| ArmStats {
                    pulls,
                    estimate: probability,
                })
                .collect(),
        }
    }
}

fn softmax(preferences: &[f64]) -> Vec<f64> {
    let max = preferences
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let exponentials: Vec<f64> = preferences
        .iter()
        .map(|&preference| (preference - max).exp())
        .collect();
    let total: f64 = exponentials.iter().sum();

    exponentials
        .into_iter()
        .map(|weight| weight / total)
        .collect()
}
