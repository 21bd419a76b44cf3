use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Every agent and reward source owns its own generator so parallel trials
/// never share one. A seed makes the stream reproducible.
pub(crate) fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}
