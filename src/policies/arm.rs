use crate::errors::ConfigurationError;

use serde::{Deserialize, Serialize};

/// Step-size schedule for incremental value updates.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSize {
    /// 1/N step, so the estimate is the running mean of observed rewards.
    SampleAverage,
    /// Fixed step, the same for every arm. Weighs recent rewards more.
    Constant(f64),
    /// Fixed step per arm.
    PerArm(Vec<f64>),
}

impl Default for StepSize {
    fn default() -> Self {
        Self::SampleAverage
    }
}

impl StepSize {
    pub(super) fn validate(&self, arms: usize) -> Result<(), ConfigurationError> {
        match self {
            Self::SampleAverage => Ok(()),
            Self::Constant(alpha) => validate_alpha(*alpha),
            Self::PerArm(alphas) => {
                if alphas.len() != arms {
                    return Err(ConfigurationError::ArmCountMismatch {
                        expected: arms,
                        actual: alphas.len(),
                    });
                }
                alphas.iter().try_for_each(|&alpha| validate_alpha(alpha))
            }
        }
    }

    fn step_for(&self, arm: usize, pulls: u64) -> f64 {
        match self {
            Self::SampleAverage => 1.0 / pulls as f64,
            Self::Constant(alpha) => *alpha,
            Self::PerArm(alphas) => alphas[arm],
        }
    }
}

fn validate_alpha(alpha: f64) -> Result<(), ConfigurationError> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter {
            name: "step_size",
            value: alpha,
        })
    }
}

/// Action-value estimate for a single arm.
#[derive(Clone, Debug, Serialize)]
pub(super) struct Arm {
    pub value: f64,
    pub pulls: u64,
}

impl Arm {
    pub fn new(value: f64) -> Self {
        Self { value, pulls: 0 }
    }

    /// One incremental update, Q += step * (R - Q). The step size is
    /// resolved after the pull is counted, so 1/N weighs the i-th reward
    /// of this arm by 1/i.
    pub fn update(&mut self, arm: usize, reward: f64, step_size: &StepSize) {
        self.pulls += 1;
        let step = step_size.step_for(arm, self.pulls);
        self.value += step * (reward - self.value);
    }
}
