use core::hash::BuildHasherDefault;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use quadprobe::ProbingHashTable;
use quadprobe::TableConfig;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use siphasher::sip::SipHasher;

type Sip = BuildHasherDefault<SipHasher>;

const SIZES: &[usize] = &[(1 << 10), (1 << 12), (1 << 14), (1 << 16)];

const LOAD_FACTORS: &[f64] = &[0.45, 0.75];

fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::from_os_rng();
    (0..count).map(|_| rng.random()).collect()
}

fn probing_table(load_factor: f64) -> ProbingHashTable<u64, u64, Sip> {
    let config = TableConfig::default().with_load_factor(load_factor);
    ProbingHashTable::with_config_and_hasher(config, Sip::default()).expect("valid config")
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        for &load_factor in LOAD_FACTORS {
            group.bench_function(format!("quadprobe_lf{load_factor}/{size}"), |b| {
                b.iter_batched(
                    || {
                        let mut keys = keys.clone();
                        keys.shuffle(&mut SmallRng::from_os_rng());
                        keys
                    },
                    |keys| {
                        let mut table = probing_table(load_factor);
                        for key in keys {
                            black_box(table.insert(key, key));
                        }
                        black_box(table)
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = HashbrownMap::with_hasher(Sip::default());
                    for key in keys {
                        black_box(map.insert(key, key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = std::collections::HashMap::with_hasher(Sip::default());
                    for key in keys {
                        black_box(map.insert(key, key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys(size);
        let misses = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        let mut table = probing_table(0.45);
        let mut map = HashbrownMap::with_hasher(Sip::default());
        for &key in &keys {
            table.insert(key, key);
            map.insert(key, key);
        }

        group.bench_function(format!("quadprobe_hit/{size}"), |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(table.get(key));
                }
            })
        });
        group.bench_function(format!("quadprobe_peek_hit/{size}"), |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(table.peek(key));
                }
            })
        });
        group.bench_function(format!("quadprobe_miss/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(table.peek(key));
                }
            })
        });
        group.bench_function(format!("hashbrown_hit/{size}"), |b| {
            b.iter(|| {
                for key in &keys {
                    black_box(map.get(key));
                }
            })
        });
        group.bench_function(format!("hashbrown_miss/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(map.get(key));
                }
            })
        });
    }

    group.finish();
}

/// Removes half the keys, then re-inserts fresh ones, so lookups run through
/// tombstone-laden chains and relocate.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_reinsert");

    for &size in SIZES {
        let keys = random_keys(size);
        let replacements = random_keys(size / 2);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("quadprobe/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = probing_table(0.45);
                    for &key in &keys {
                        table.insert(key, key);
                    }
                    table
                },
                |mut table| {
                    for key in keys.iter().step_by(2) {
                        black_box(table.remove(key));
                    }
                    for &key in &replacements {
                        black_box(table.insert(key, key));
                    }
                    for key in keys.iter().skip(1).step_by(2) {
                        black_box(table.get(key));
                    }
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut map = HashbrownMap::with_hasher(Sip::default());
                    for &key in &keys {
                        map.insert(key, key);
                    }
                    map
                },
                |mut map| {
                    for key in keys.iter().step_by(2) {
                        black_box(map.remove(key));
                    }
                    for &key in &replacements {
                        black_box(map.insert(key, key));
                    }
                    for key in keys.iter().skip(1).step_by(2) {
                        black_box(map.get(key));
                    }
                    black_box(map)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_churn);
criterion_main!(benches);
