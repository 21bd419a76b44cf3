/// Narrow seam between the environment and the trial loop: the harness only
/// ever asks for a reward and, for reporting, the currently best arm.
pub trait RewardSource {
    fn arms(&self) -> usize;
    /// One stochastic sample from the arm's current distribution.
    fn get_reward(&mut self, arm: usize) -> f64;
    /// Arm with the highest current mean, lowest index on ties.
    fn best_arm(&self) -> usize;
}
