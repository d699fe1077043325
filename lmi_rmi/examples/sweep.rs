//! Stage-width sweep over a synthetic heavy-tailed dataset
//! 合成重尾数据集上的阶段宽度扫描
//!
//! Shows the speed↔memory↔accuracy tradeoff as the leaf stage widens.
//! 展示叶阶段变宽时速度、内存与精度的权衡。

use std::time::Instant;

use lmi_rmi::{Rmi, RmiConfig};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, LogNormal};

fn main() {
  const N: usize = 200_000;

  let mut rng = StdRng::seed_from_u64(42);
  let dist = LogNormal::new(0.0, 2.0).expect("valid lognormal");
  let data: Vec<(f64, u64)> = (0..N).map(|_| (dist.sample(&mut rng) * 1e9, 0)).collect();

  println!("=== RMI stage-width sweep ({N} lognormal keys) ===\n");

  for &width in &[100usize, 1_000, 10_000] {
    let cfg = RmiConfig {
      stage_sizes: vec![1, width],
      hidden_size: 8,
      num_hidden_layers: 1,
      ..RmiConfig::default()
    };

    let start = Instant::now();
    let rmi = Rmi::build(cfg, data.clone()).expect("build");
    let build = start.elapsed();

    println!("stages {{1, {width}}}:");
    println!("  build time: {build:?}");
    println!("  avg error:  {:.3} ranks", rmi.average_error());
    println!(
      "  size:       {:.2} MB",
      rmi.total_size_bytes() as f64 / 1024.0 / 1024.0
    );
  }
}
