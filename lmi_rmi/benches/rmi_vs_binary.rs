//! Criterion benchmark: RMI lookup vs binary search vs BTreeMap
//! Criterion 基准测试：RMI 查找 vs 二分查找 vs BTreeMap

use std::{collections::BTreeMap, hint::black_box};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lmi_rmi::{Rmi, RmiConfig};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SAMPLE_SIZE: usize = 20;

fn linear_cfg(width: usize) -> RmiConfig {
  RmiConfig {
    stage_sizes: vec![1, width],
    num_hidden_layers: 0,
    ..RmiConfig::default()
  }
}

fn bench_lookups(c: &mut Criterion) {
  let mut group = c.benchmark_group("rmi_vs_binary");
  group.sample_size(SAMPLE_SIZE);

  for size in [10_000usize, 100_000, 1_000_000] {
    let keys: Vec<f64> = (0..size).map(|i| i as f64).collect();
    let mut rng = StdRng::seed_from_u64(42);
    let queries: Vec<f64> = (0..1000)
      .map(|_| rng.random_range(0..size as u64) as f64)
      .collect();

    group.throughput(Throughput::Elements(queries.len() as u64));

    group.bench_with_input(
      BenchmarkId::new("binary_search", size),
      &(&keys, &queries),
      |b, (keys, queries)| {
        b.iter(|| {
          for &q in queries.iter() {
            let _ = black_box(keys.partition_point(|&k| k < q));
          }
        })
      },
    );

    // Non-negative f64 bit patterns preserve order, so the map can
    // key on them
    // 非负 f64 的位模式保持顺序，可作为映射键
    let btree: BTreeMap<u64, usize> = keys
      .iter()
      .enumerate()
      .map(|(i, &k)| (k.to_bits(), i))
      .collect();
    group.bench_with_input(
      BenchmarkId::new("btreemap", size),
      &(&btree, &queries),
      |b, (map, queries)| {
        b.iter(|| {
          for &q in queries.iter() {
            let _ = black_box(map.range(q.to_bits()..).next());
          }
        })
      },
    );

    for width in [100usize, 1000] {
      let rmi = Rmi::build(linear_cfg(width), keys.iter().map(|&k| (k, 0)).collect()).unwrap();
      group.bench_with_input(
        BenchmarkId::new(format!("rmi_w{width}"), size),
        &(&rmi, &queries),
        |b, (rmi, queries)| {
          b.iter(|| {
            for &q in queries.iter() {
              let _ = black_box(rmi.lookup(q));
            }
          })
        },
      );
    }
  }
  group.finish();
}

fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build_time");
  group.sample_size(10);

  for size in [10_000usize, 100_000] {
    group.throughput(Throughput::Elements(size as u64));
    group.bench_with_input(BenchmarkId::new("rmi_linear", size), &size, |b, &size| {
      b.iter(|| {
        let data: Vec<(f64, u64)> = (0..size).map(|i| (i as f64, 0)).collect();
        let rmi = Rmi::build(linear_cfg(size / 100), data).unwrap();
        black_box(rmi);
      })
    });
  }
  group.finish();
}

criterion_group!(benches, bench_lookups, bench_build);
criterion_main!(benches);
