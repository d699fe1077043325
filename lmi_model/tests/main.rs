//! Model tests / 模型测试

use lmi_model::{LinearModel, Model, NetModel, Regressor};

fn avg_abs_error(m: &impl Regressor, samples: &[(f64, u64)]) -> f64 {
  let total: f64 = samples
    .iter()
    .map(|&(k, p)| (m.predict(k) - p as f64).abs())
    .sum();
  total / samples.len() as f64
}

#[test]
fn linear_exact_fit() {
  // rank = (key - 10) / 2 over an affine key grid
  // 仿射键网格上 rank = (key - 10) / 2
  let samples: Vec<(f64, u64)> = (0..100).map(|i| (10.0 + 2.0 * f64::from(i), i as u64)).collect();
  let mut m = LinearModel::default();
  m.train(&samples);

  assert!((m.slope - 0.5).abs() < 1e-9, "slope={}", m.slope);
  assert!((m.intercept + 5.0).abs() < 1e-6, "intercept={}", m.intercept);
  for &(k, pos) in &samples {
    assert!((m.predict(k) - pos as f64).abs() < 1e-6, "key={k}");
  }
}

#[test]
fn linear_constant_keys() {
  let samples: Vec<(f64, u64)> = (0..50u64).map(|i| (7.0, i)).collect();
  let mut m = LinearModel::default();
  m.train(&samples);

  assert_eq!(m.slope, 0.0);
  assert!((m.intercept - 24.5).abs() < 1e-9);
}

#[test]
fn linear_single_sample_is_degenerate() {
  let mut m = LinearModel::default();
  m.train(&[(42.0, 0)]);

  assert_eq!(m.slope, 0.0);
  assert_eq!(m.predict(42.0), 0.0);
}

#[test]
fn linear_empty_stays_zero() {
  let mut m = LinearModel::default();
  m.train(&[]);

  assert_eq!(m.predict(123.0), 0.0);
  assert_eq!(m.size_bytes(), 16);
}

#[test]
fn net_fits_affine_cdf() {
  // Narrow key span keeps the log transform off
  // 窄键域不触发对数变换
  let samples: Vec<(f64, u64)> = (0..1000).map(|i| (1000.0 + f64::from(i), i as u64)).collect();
  let mut m = NetModel::new(8, 1);
  m.train(&samples);

  assert!(!m.use_log());
  let avg = avg_abs_error(&m, &samples);
  assert!(avg < 100.0, "avg={avg}");
}

#[test]
fn net_two_hidden_layers() {
  let samples: Vec<(f64, u64)> = (0..800).map(|i| (500.0 + f64::from(i), i as u64)).collect();
  let mut m = NetModel::new(16, 2);
  m.train(&samples);

  let avg = avg_abs_error(&m, &samples);
  assert!(avg < 160.0, "avg={avg}");
}

#[test]
fn net_log_transform_on_heavy_tail() {
  // Exponentially spread keys trip the spread-ratio check
  // 指数分布的键触发跨度比例检查
  let samples: Vec<(f64, u64)> =
    (0..1000).map(|i| ((f64::from(i) / 999.0 * 20.0).exp(), i as u64)).collect();
  let mut m = NetModel::new(8, 1);
  m.train(&samples);

  assert!(m.use_log());
  // ln(k + 1) makes the CDF near-affine again
  // ln(k + 1) 使 CDF 重新接近仿射
  let avg = avg_abs_error(&m, &samples);
  assert!(avg < 150.0, "avg={avg}");
}

#[test]
fn net_untrained_and_empty_predict_zero() {
  let m = NetModel::new(8, 2);
  assert_eq!(m.predict(123.0), 0.0);

  let mut m = NetModel::new(8, 1);
  m.train(&[]);
  assert_eq!(m.predict(5.0), 0.0);
}

#[test]
fn net_deterministic() {
  let samples: Vec<(f64, u64)> = (0..500).map(|i| (f64::from(i) * 3.0, i as u64)).collect();
  let mut a = NetModel::new(8, 1);
  let mut b = NetModel::new(8, 1);
  a.train(&samples);
  b.train(&samples);

  for &(k, _) in &samples {
    assert_eq!(a.predict(k).to_bits(), b.predict(k).to_bits(), "key={k}");
  }
}

#[test]
fn net_size_accounts_for_weights() {
  let m = NetModel::new(8, 1);
  // 1x8 + 8x1 weights, 8 + 1 biases
  // 1x8 + 8x1 权重，8 + 1 偏置
  assert!(m.size_bytes() >= 25 * 8);
}

#[test]
fn model_enum_dispatch() {
  let samples: Vec<(f64, u64)> = (0..100).map(|i| (f64::from(i), i as u64)).collect();

  let mut m = Model::Linear(LinearModel::default());
  m.train(&samples);
  assert!((m.predict(50.0) - 50.0).abs() < 1e-6);
  assert_eq!(m.size_bytes(), 16);

  let mut m = Model::Net(NetModel::new(4, 1));
  m.train(&samples);
  assert!(m.size_bytes() > 16);
}
