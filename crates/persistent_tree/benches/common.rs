use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{apply_runtime_config_for_size, ascending_keys, default_rng, shuffled_keys};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use persistent_tree::{BinaryTree, PersistentSet, RedBlackTree};

const SIZES: [usize; 4] = [250, 1_000, 4_000, 16_000];
// Sorted input turns the plain tree into a chain and its insert recursion
// into `n` frames.
const PLAIN_SORTED_MAX_SIZE: usize = 4_000;
const QUERIES_PER_ITER: usize = 200;
const HIT_RATE_PERCENT: u64 = 50;

#[derive(Clone, Copy, Debug)]
pub enum KeyOrder {
    Ascending,
    Shuffled,
}

fn keys_for(order: KeyOrder, size: usize) -> Vec<u64> {
    match order {
        KeyOrder::Ascending => ascending_keys(size),
        KeyOrder::Shuffled => shuffled_keys(size, &mut default_rng()),
    }
}

pub fn bench_build<S, T>(
    group: &mut BenchmarkGroup<'_, T>,
    label: &str,
    order: KeyOrder,
    max_size: usize,
) where
    T: Measurement<Value = Duration>,
    S: PersistentSet<Value = u64>,
{
    for &size in SIZES.iter().filter(|&&size| size <= max_size) {
        apply_runtime_config_for_size(size, group);
        let keys = keys_for(order, size);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter(|| {
                let mut set = S::new();
                for &key in &keys {
                    set.insert_mut(black_box(key));
                }
                set
            })
        });
    }
}

pub fn bench_contains<S, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    S: PersistentSet<Value = u64>,
{
    for &size in &SIZES {
        apply_runtime_config_for_size(size, group);
        let keys = keys_for(KeyOrder::Shuffled, size);
        let set: S = keys.iter().fold(S::new(), |set, &key| set.insert(key));

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = StdRng::seed_from_u64(seed_for_iter(size as u64, iter));
                    let queries = generate_queries(size, &mut rng);
                    let start = Instant::now();
                    for query in &queries {
                        black_box(set.contains(query));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

fn generate_queries(size: usize, rng: &mut StdRng) -> Vec<u64> {
    (0..QUERIES_PER_ITER)
        .map(|_| {
            if rng.random_range(0..100) < HIT_RATE_PERCENT {
                rng.random_range(0..size as u64)
            } else {
                rng.random_range(size as u64..2 * size as u64)
            }
        })
        .collect()
}

fn seed_for_iter(base: u64, iter: u64) -> u64 {
    mix_seed(base ^ iter.wrapping_mul(SEED_MIX))
}

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn bench_all_build<T>(group: &mut BenchmarkGroup<'_, T>, order: KeyOrder)
where
    T: Measurement<Value = Duration>,
{
    let plain_max = match order {
        KeyOrder::Ascending => PLAIN_SORTED_MAX_SIZE,
        KeyOrder::Shuffled => usize::MAX,
    };
    bench_build::<RedBlackTree<u64>, _>(group, "rb", order, usize::MAX);
    bench_build::<BinaryTree<u64>, _>(group, "plain", order, plain_max);
}

pub fn bench_all_contains<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_contains::<RedBlackTree<u64>, _>(group, "rb");
    bench_contains::<BinaryTree<u64>, _>(group, "plain");
}
