use crate::bandit::RewardSource;
use crate::policies::Policy;

use serde::Serialize;

/// One interaction of the trial loop. `step` is 0-indexed; the caller pairs
/// records with best-arm data when it wants fraction-optimal metrics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub arm: usize,
    pub reward: f64,
}

/// Finite, consumed-once iterator driving a policy against a reward source:
/// each step selects an arm, draws its reward and feeds the pair back into
/// the policy before yielding the record.
pub struct Trial<'a, P: ?Sized, S: ?Sized> {
    policy: &'a mut P,
    source: &'a mut S,
    steps: usize,
    step: usize,
}

impl<'a, P, S> Trial<'a, P, S>
where
    P: Policy + ?Sized,
    S: RewardSource + ?Sized,
{
    pub fn new(policy: &'a mut P, source: &'a mut S, steps: usize) -> Self {
        debug_assert_eq!(policy.arms(), source.arms());
        Self {
            policy,
            source,
            steps,
            step: 0,
        }
    }
}

impl<P, S> Iterator for Trial<'_, P, S>
where
    P: Policy + ?Sized,
    S: RewardSource + ?Sized,
{
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        if self.step >= self.steps {
            return None;
        }

        let arm = self.policy.select_action();
        let reward = self.source.get_reward(arm);
        self.policy.update(arm, reward);

        let record = StepRecord {
            step: self.step,
            arm,
            reward,
        };
        self.step += 1;

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.step;
        (remaining, Some(remaining))
    }
}

impl<P, S> ExactSizeIterator for Trial<'_, P, S>
where
    P: Policy + ?Sized,
    S: RewardSource + ?Sized,
{
}

/// Runs a full trial and collects the records.
pub fn run<P, S>(policy: &mut P, source: &mut S, steps: usize) -> Vec<StepRecord>
where
    P: Policy + ?Sized,
    S: RewardSource + ?Sized,
{
    Trial::new(policy, source, steps).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bandit::{ArmDistribution, StationaryBandit};
    use crate::policies::{EpsilonGreedy, StepSize};

    const SEED: u64 = 1234;

    fn two_armed_degenerate() -> StationaryBandit {
        StationaryBandit::new(
            2,
            vec![
                ArmDistribution::Degenerate { value: 1.0 },
                ArmDistribution::Degenerate { value: 0.0 },
            ],
            Some(SEED),
        )
        .unwrap()
    }

    #[test]
    fn records_every_step_in_order() {
        let mut policy =
            EpsilonGreedy::new(2, 0.1, StepSize::SampleAverage, None, Some(SEED)).unwrap();
        let mut source = two_armed_degenerate();

        let records = run(&mut policy, &mut source, 50);
        assert_eq!(records.len(), 50);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.step, index);
            assert!(record.arm < 2);
        }
    }

    #[test]
    fn greedy_agent_locks_onto_the_rewarding_arm() {
        // Two degenerate arms paying 1.0 and 0.0, pure greedy, sample
        // averages. Ties persist while only zero rewards have been seen;
        // from the first arm-0 pull on, arm 0 is the unique maximizer and
        // must be chosen at every subsequent step.
        let mut policy =
            EpsilonGreedy::new(2, 0.0, StepSize::SampleAverage, None, Some(SEED)).unwrap();
        let mut source = two_armed_degenerate();

        let records = run(&mut policy, &mut source, 100);
        let first_hit = records
            .iter()
            .position(|record| record.arm == 0)
            .expect("a tie-break eventually lands on arm 0");

        for record in &records[first_hit..] {
            assert_eq!(record.arm, 0);
            assert_eq!(record.reward, 1.0);
        }

        let stats = policy.stats();
        assert_eq!(stats.arms[0].estimate, 1.0);
        assert_eq!(stats.arms[1].estimate, 0.0);
    }

    #[test]
    fn trial_is_lazy_and_sized() {
        let mut policy =
            EpsilonGreedy::new(2, 0.0, StepSize::SampleAverage, None, Some(SEED)).unwrap();
        let mut source = two_armed_degenerate();

        let mut trial = Trial::new(&mut policy, &mut source, 10);
        assert_eq!(trial.len(), 10);
        trial.next();
        assert_eq!(trial.len(), 9);
    }
}
