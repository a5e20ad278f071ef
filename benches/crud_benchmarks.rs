use avos_tree::OSAvlTree;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate value sequences ───────────────────────────

fn ordered_values(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_values(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

/// The std baseline for a multiset: a `BTreeMap` from value to occurrence
/// count.
fn counter_insert(counts: &mut BTreeMap<i64, usize>, value: i64) {
    *counts.entry(value).or_insert(0) += 1;
}

fn counter_remove(counts: &mut BTreeMap<i64, usize>, value: i64) {
    if let Some(count) = counts.get_mut(&value) {
        *count -= 1;
        if *count == 0 {
            counts.remove(&value);
        }
    }
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for i in 0..N as i64 {
                tree.insert(i);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts = BTreeMap::new();
            for i in 0..N as i64 {
                counter_insert(&mut counts, i);
            }
            counts
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for i in (0..N as i64).rev() {
                tree.insert(i);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts = BTreeMap::new();
            for i in (0..N as i64).rev() {
                counter_insert(&mut counts, i);
            }
            counts
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for &v in &values {
                tree.insert(v);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut counts = BTreeMap::new();
            for &v in &values {
                counter_insert(&mut counts, v);
            }
            counts
        });
    });

    group.bench_function(BenchmarkId::new("sorted Vec", N), |b| {
        b.iter(|| {
            let mut sorted = Vec::new();
            for &v in &values {
                let at = sorted.partition_point(|&x| x < v);
                sorted.insert(at, v);
            }
            sorted
        });
    });

    group.finish();
}

// ─── Select Benchmarks ──────────────────────────────────────────────────────

fn bench_select_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let mut sorted = values.clone();
    sorted.sort_unstable();
    let ranks: Vec<usize> = random_values(N).iter().map(|&v| v as usize % N).collect();

    let mut group = c.benchmark_group("select_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &ranks {
                if let Some(&v) = tree.get_by_rank(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("sorted Vec", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &ranks {
                if let Some(&v) = sorted.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_contains_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let counts: BTreeMap<i64, usize> = values.iter().map(|&v| (v, 1)).collect();

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &v in &values {
                if tree.contains(&v) {
                    count += 1;
                }
            }
            count
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &v in &values {
                if counts.contains_key(&v) {
                    count += 1;
                }
            }
            count
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_ordered(c: &mut Criterion) {
    let values = ordered_values(N);

    let mut group = c.benchmark_group("remove_ordered");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<OSAvlTree<i64>>(),
            |mut tree| {
                for &v in &values {
                    tree.remove(&v);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || values.iter().map(|&v| (v, 1usize)).collect::<BTreeMap<i64, usize>>(),
            |mut counts| {
                for &v in &values {
                    counter_remove(&mut counts, v);
                }
                counts
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_reverse(c: &mut Criterion) {
    let values = ordered_values(N);
    let reverse_values = reverse_ordered_values(N);

    let mut group = c.benchmark_group("remove_reverse");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<OSAvlTree<i64>>(),
            |mut tree| {
                for &v in &reverse_values {
                    tree.remove(&v);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || values.iter().map(|&v| (v, 1usize)).collect::<BTreeMap<i64, usize>>(),
            |mut counts| {
                for &v in &reverse_values {
                    counter_remove(&mut counts, v);
                }
                counts
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_random(c: &mut Criterion) {
    let values = random_values(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<OSAvlTree<i64>>(),
            |mut tree| {
                for &v in &values {
                    tree.remove(&v);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || values.iter().map(|&v| (v, 1usize)).collect::<BTreeMap<i64, usize>>(),
            |mut counts| {
                for &v in &values {
                    counter_remove(&mut counts, v);
                }
                counts
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(query_benches, bench_select_random, bench_contains_random,);

criterion_group!(remove_benches, bench_remove_ordered, bench_remove_reverse, bench_remove_random,);

criterion_main!(insert_benches, query_benches, remove_benches,);
