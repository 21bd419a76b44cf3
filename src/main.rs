mod config;

use crate::config::{AppConfig, BanditKind};

use bandit_testbed::bandit::{ArmDistribution, NonStationaryBandit, RewardSource, StationaryBandit};
use bandit_testbed::errors::ConfigurationError;
use bandit_testbed::trial::run;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = AppConfig::from_env().expect("Cannot read config");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    if let Err(err) = run_experiment(&config) {
        error!(%err, "Experiment aborted");
        std::process::exit(1);
    }
}

fn run_experiment(config: &AppConfig) -> Result<(), ConfigurationError> {
    let experiment = &config.experiment;
    if experiment.runs == 0 {
        return Err(ConfigurationError::InvalidParameter {
            name: "runs",
            value: 0.0,
        });
    }
    if experiment.steps == 0 {
        return Err(ConfigurationError::InvalidParameter {
            name: "steps",
            value: 0.0,
        });
    }

    let mut seed_rng = match experiment.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let arm_mean_prior = Normal::new(config.bandit.reward_mean, config.bandit.reward_std)
        .map_err(|_| ConfigurationError::InvalidParameter {
            name: "reward_std",
            value: config.bandit.reward_std,
        })?;

    info!(
        runs = experiment.runs,
        steps = experiment.steps,
        arms = config.bandit.arms,
        policy = %config.agent.policy,
        "Starting experiment"
    );

    let mut total_reward = 0.0;
    let mut total_optimal = 0.0;
    for run_index in 0..experiment.runs {
        // Derived per-run seeds keep runs independent but reproducible.
        let bandit_seed = experiment.seed.map(|_| seed_rng.random::<u64>());
        let agent_seed = experiment.seed.map(|_| seed_rng.random::<u64>());

        let distributions: Vec<ArmDistribution> = (0..config.bandit.arms)
            .map(|_| ArmDistribution::Normal {
                mean: arm_mean_prior.sample(&mut seed_rng),
                std_dev: config.bandit.arm_std,
            })
            .collect();

        let mut policy = config
            .agent
            .policy_type(config.bandit.arms, agent_seed)?
            .build(config.bandit.arms)?;

        let (records, best_arms) = match config.bandit.kind {
            BanditKind::Stationary => {
                let mut source =
                    StationaryBandit::new(config.bandit.arms, distributions, bandit_seed)?;
                let best_arm = source.best_arm();
                let records = run(policy.as_mut(), &mut source, experiment.steps);
                (records, vec![best_arm; experiment.steps])
            }
            BanditKind::NonStationary => {
                let mut source = NonStationaryBandit::new(
                    config.bandit.arms,
                    distributions,
                    config.bandit.random_walk_std()?,
                    false,
                    bandit_seed,
                )?;
                let records = run(policy.as_mut(), &mut source, experiment.steps);
                let best_arms = source.best_arm_history().to_vec();
                (records, best_arms)
            }
        };

        let mean_reward = records.iter().map(|record| record.reward).sum::<f64>()
            / experiment.steps as f64;
        let optimal_fraction = records
            .iter()
            .zip(&best_arms)
            .filter(|(record, best)| record.arm == **best)
            .count() as f64
            / experiment.steps as f64;

        debug!(
            run = run_index,
            mean_reward,
            optimal_fraction,
            stats = ?policy.stats(),
            "Run complete"
        );
        total_reward += mean_reward;
        total_optimal += optimal_fraction;
    }

    info!(
        mean_reward = total_reward / experiment.runs as f64,
        optimal_fraction = total_optimal / experiment.runs as f64,
        "Experiment complete"
    );

    Ok(())
}
