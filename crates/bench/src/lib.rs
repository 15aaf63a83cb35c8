use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const RNG_SEED: u64 = 0x5EED_2026;

/// Criterion sampling settings for one tree size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeTier {
    pub sample_size: usize,
    pub warm_up_ms: u64,
    pub measure_ms: u64,
}

// Upper size bound (inclusive) of each tier; the last tier takes the rest.
const RUNTIME_TIERS: [(usize, RuntimeTier); 3] = [
    (
        1_000,
        RuntimeTier {
            sample_size: 15,
            warm_up_ms: 100,
            measure_ms: 200,
        },
    ),
    (
        4_000,
        RuntimeTier {
            sample_size: 15,
            warm_up_ms: 500,
            measure_ms: 1000,
        },
    ),
    (
        usize::MAX,
        RuntimeTier {
            sample_size: 10,
            warm_up_ms: 800,
            measure_ms: 1500,
        },
    ),
];

/// Tier for a benchmark whose iteration touches `size` elements.
pub fn runtime_tier(size: usize) -> RuntimeTier {
    RUNTIME_TIERS
        .iter()
        .find(|(max_size, _)| size <= *max_size)
        .map_or(RUNTIME_TIERS[RUNTIME_TIERS.len() - 1].1, |&(_, tier)| tier)
}

pub fn apply_runtime_config_for_size<M: Measurement>(
    size: usize,
    group: &mut BenchmarkGroup<'_, M>,
) {
    let tier = runtime_tier(size);
    group.sample_size(tier.sample_size);
    group.warm_up_time(Duration::from_millis(tier.warm_up_ms));
    group.measurement_time(Duration::from_millis(tier.measure_ms));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn ascending_keys(size: usize) -> Vec<u64> {
    (0..size as u64).collect()
}

/// `0..size` in random order.
pub fn shuffled_keys<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<u64> {
    let mut keys = ascending_keys(size);
    keys.shuffle(rng);
    keys
}

#[cfg(test)]
mod tests {
    use super::{ascending_keys, default_rng, runtime_tier, shuffled_keys};

    #[test]
    fn shuffled_keys_are_a_permutation() {
        let mut rng = default_rng();
        let mut keys = shuffled_keys(500, &mut rng);
        assert_ne!(keys, ascending_keys(500));
        keys.sort_unstable();
        assert_eq!(keys, ascending_keys(500));
    }

    #[test]
    fn runtime_tier_grows_with_size() {
        assert_eq!(runtime_tier(0), runtime_tier(1_000));
        assert_eq!(runtime_tier(1_000).measure_ms, 200);
        assert_eq!(runtime_tier(1_001).measure_ms, 1000);
        assert_eq!(runtime_tier(4_000).warm_up_ms, 500);
        assert_eq!(runtime_tier(16_000).sample_size, 10);
        assert_eq!(runtime_tier(usize::MAX).measure_ms, 1500);
    }

    #[test]
    fn default_rng_is_deterministic() {
        let a = shuffled_keys(64, &mut default_rng());
        let b = shuffled_keys(64, &mut default_rng());
        assert_eq!(a, b);
    }
}
