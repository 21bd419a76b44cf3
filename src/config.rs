use bandit_testbed::errors::ConfigurationError;
use bandit_testbed::policies::{PolicyType, StepSize};

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExperimentSettings {
    pub runs: usize,
    pub steps: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BanditKind {
    Stationary,
    NonStationary,
}

#[derive(Debug, Deserialize)]
pub struct BanditSettings {
    pub kind: BanditKind,
    pub arms: usize,
    /// Each run samples the arm means from Normal(reward_mean, reward_std).
    pub reward_mean: f64,
    pub reward_std: f64,
    /// Reward noise around each arm's mean.
    pub arm_std: f64,
    pub random_walk_std: Option<f64>,
}

impl BanditSettings {
    pub fn random_walk_std(&self) -> Result<f64, ConfigurationError> {
        self.random_walk_std
            .ok_or(ConfigurationError::MissingParameter("random_walk_std"))
    }
}

/// Policy selection by name, with only the hyperparameters the chosen
/// policy needs filled in. Resolution into a [`PolicyType`] is where
/// unknown names and missing hyperparameters surface.
#[derive(Debug, Deserialize)]
pub struct AgentSettings {
    pub policy: String,
    pub epsilon: Option<f64>,
    pub c: Option<f64>,
    pub alpha: Option<f64>,
    /// Fixed step size for value-based policies; omitted means 1/N.
    pub step_size: Option<f64>,
    /// Initial value estimate, the same for every arm.
    pub initial_value: Option<f64>,
}

impl AgentSettings {
    pub fn policy_type(
        &self,
        arms: usize,
        seed: Option<u64>,
    ) -> Result<PolicyType, ConfigurationError> {
        let step_size = match self.step_size {
            Some(alpha) => StepSize::Constant(alpha),
            None => StepSize::SampleAverage,
        };
        let initial_values = self.initial_value.map(|value| vec![value; arms]);

        match self.policy.as_str() {
            "epsilon_greedy" => Ok(PolicyType::EpsilonGreedy {
                epsilon: required(self.epsilon, "epsilon")?,
                step_size,
                initial_values,
                seed,
            }),
            "ucb" => Ok(PolicyType::Ucb {
                c: required(self.c, "c")?,
                step_size,
                initial_values,
                seed,
            }),
            "gradient_bandit" => Ok(PolicyType::GradientBandit {
                alpha: required(self.alpha, "alpha")?,
                seed,
            }),
            unknown => Err(ConfigurationError::UnknownPolicy(unknown.to_string())),
        }
    }
}

fn required(value: Option<f64>, name: &'static str) -> Result<f64, ConfigurationError> {
    value.ok_or(ConfigurationError::MissingParameter(name))
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub experiment: ExperimentSettings,
    pub bandit: BanditSettings,
    pub agent: AgentSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        builder.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_settings(policy: &str) -> AgentSettings {
        AgentSettings {
            policy: policy.to_string(),
            epsilon: None,
            c: None,
            alpha: None,
            step_size: None,
            initial_value: None,
        }
    }

    #[test]
    fn unknown_policy_names_are_rejected() {
        assert!(matches!(
            agent_settings("thompson").policy_type(10, None),
            Err(ConfigurationError::UnknownPolicy(name)) if name == "thompson"
        ));
    }

    #[test]
    fn each_policy_requires_its_hyperparameter() {
        for (policy, parameter) in [
            ("epsilon_greedy", "epsilon"),
            ("ucb", "c"),
            ("gradient_bandit", "alpha"),
        ] {
            assert!(matches!(
                agent_settings(policy).policy_type(10, None),
                Err(ConfigurationError::MissingParameter(name)) if name == parameter
            ));
        }
    }

    #[test]
    fn step_size_defaults_to_sample_average() {
        let mut settings = agent_settings("epsilon_greedy");
        settings.epsilon = Some(0.1);

        let policy_type = settings.policy_type(10, None).unwrap();
        assert!(matches!(
            policy_type,
            PolicyType::EpsilonGreedy {
                step_size: StepSize::SampleAverage,
                ..
            }
        ));
    }

    #[test]
    fn initial_value_broadcasts_over_all_arms() {
        let mut settings = agent_settings("ucb");
        settings.c = Some(2.0);
        settings.initial_value = Some(5.0);

        let policy_type = settings.policy_type(3, None).unwrap();
        assert!(matches!(
            policy_type,
            PolicyType::Ucb { initial_values: Some(values), .. } if values == vec![5.0; 3]
        ));
    }

    #[test]
    fn non_stationary_settings_require_a_walk_scale() {
        let settings = BanditSettings {
            kind: BanditKind::NonStationary,
            arms: 10,
            reward_mean: 0.0,
            reward_std: 1.0,
            arm_std: 1.0,
            random_walk_std: None,
        };
        assert!(matches!(
            settings.random_walk_std(),
            Err(ConfigurationError::MissingParameter("random_walk_std"))
        ));
    }
}
