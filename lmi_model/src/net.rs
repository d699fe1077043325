//! Small feed-forward rank regressor
//! 小型前馈排名回归模型
//!
//! Scalar key in, scalar rank out: hidden ReLU layers plus a linear
//! output neuron, trained by mini-batch SGD on MSE. Normalization
//! parameters are recorded at train time and re-applied at inference.
//! 标量键入、标量排名出：隐藏 ReLU 层加线性输出神经元，
//! 以小批量 SGD 训练。归一化参数在训练时记录并在推理时复用。

#![allow(clippy::cast_precision_loss)]

use std::mem::size_of;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rand_distr::StandardNormal;

use crate::{
  Regressor, Sample,
  consts::{BATCH_SIZE, EPOCHS, LEARNING_RATE, LOG_RATIO, SEED},
};

/// Feed-forward network over one normalized input
/// 单个归一化输入上的前馈网络
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug)]
pub struct NetModel {
  hidden: usize,
  /// Weight layer count: hidden layers plus the output neuron
  /// 权重层数：隐藏层加输出神经元
  layers: usize,
  /// Layer `l` weights, flat `[in * out]`, index `i * out + j`
  /// 第 l 层权重，扁平 `[in * out]`，下标 `i * out + j`
  weights: Vec<Vec<f64>>,
  biases: Vec<Vec<f64>>,
  x_min: f64,
  x_max: f64,
  x_range: f64,
  y_max: f64,
  use_log: bool,
}

impl NetModel {
  /// Allocate an untrained network; it predicts a constant zero until
  /// trained
  /// 分配未训练网络；训练前恒预测零
  #[must_use]
  pub fn new(hidden_size: usize, num_hidden_layers: usize) -> Self {
    let hidden = hidden_size.max(1);
    let layers = num_hidden_layers + 1;
    let mut weights = Vec::with_capacity(layers);
    let mut biases = Vec::with_capacity(layers);
    for l in 0..layers {
      let (input, output) = layer_dims(hidden, layers, l);
      weights.push(vec![0.0; input * output]);
      biases.push(vec![0.0; output]);
    }

    Self {
      hidden,
      layers,
      weights,
      biases,
      x_min: 0.0,
      x_max: 1.0,
      x_range: 1.0,
      y_max: 1.0,
      use_log: false,
    }
  }

  /// Whether training enabled the heavy-tail log transform
  /// 训练是否启用了重尾对数变换
  #[inline]
  #[must_use]
  pub fn use_log(&self) -> bool {
    self.use_log
  }

  #[inline]
  fn transform(&self, key: f64) -> f64 {
    if self.use_log { (key + 1.0).ln() } else { key }
  }

  /// Forward pass on a normalized input, keeping per-layer activations
  /// for backprop. `acts[0]` is the input, `acts[l + 1]` the output of
  /// layer `l`.
  /// 归一化输入上的前向传播，保留各层激活供反向传播使用。
  fn forward_into(&self, x: f64, acts: &mut [Vec<f64>]) -> f64 {
    acts[0][0] = x;
    for l in 0..self.layers {
      let (input, output) = layer_dims(self.hidden, self.layers, l);
      let w = &self.weights[l];
      let b = &self.biases[l];
      let (prev, rest) = acts.split_at_mut(l + 1);
      let prev = &prev[l];
      let cur = &mut rest[0];
      for j in 0..output {
        let mut sum = b[j];
        for (i, &a) in prev.iter().enumerate().take(input) {
          sum += a * w[i * output + j];
        }
        // ReLU on hidden layers, identity on the output neuron
        // 隐藏层 ReLU，输出神经元恒等
        cur[j] = if l + 1 < self.layers { sum.max(0.0) } else { sum };
      }
    }
    acts[self.layers][0]
  }

  /// Activation buffers shaped for this network
  /// 与网络形状匹配的激活缓冲
  fn alloc_acts(&self) -> Vec<Vec<f64>> {
    let mut acts = Vec::with_capacity(self.layers + 1);
    acts.push(vec![0.0]);
    for l in 0..self.layers {
      let (_, output) = layer_dims(self.hidden, self.layers, l);
      acts.push(vec![0.0; output]);
    }
    acts
  }
}

impl Regressor for NetModel {
  /// Mini-batch SGD on MSE with He-normal init and a deterministic
  /// PRNG stream, so identical inputs give identical weights
  /// 小批量 SGD（MSE 损失），He 初始化与确定性随机流，
  /// 相同输入产生相同权重
  fn train(&mut self, samples: &[Sample]) {
    if samples.is_empty() {
      return;
    }

    let n = samples.len();
    let min_key = samples[0].0;
    let max_key = samples[n - 1].0;

    // Heavy-tailed key domains train on ln(k + 1)
    // 重尾键域在 ln(k + 1) 上训练
    self.use_log = max_key / (min_key + 1.0) > LOG_RATIO;
    self.x_min = self.transform(min_key);
    self.x_max = self.transform(max_key);
    self.x_range = (self.x_max - self.x_min).max(1.0);
    self.y_max = ((n - 1) as f64).max(1.0);

    let xs: Vec<f64> = samples
      .iter()
      .map(|&(k, _)| (self.transform(k) - self.x_min) / self.x_range)
      .collect();
    let ys: Vec<f64> = samples.iter().map(|&(_, p)| p as f64 / self.y_max).collect();

    // He-normal init, biases zero. The generator is local to this
    // build; concurrent builds never share a stream.
    // He 初始化，偏置为零。生成器为本次构建私有，并发构建互不干扰。
    let mut rng = StdRng::seed_from_u64(SEED);
    let std_dev = (2.0 / self.hidden as f64).sqrt();
    for w in &mut self.weights {
      for v in w.iter_mut() {
        let z: f64 = rng.sample(StandardNormal);
        *v = z * std_dev;
      }
    }
    for b in &mut self.biases {
      b.fill(0.0);
    }

    let mut weight_grads: Vec<Vec<f64>> =
      self.weights.iter().map(|w| vec![0.0; w.len()]).collect();
    let mut bias_grads: Vec<Vec<f64>> = self.biases.iter().map(|b| vec![0.0; b.len()]).collect();
    let mut acts = self.alloc_acts();
    let mut indices: Vec<usize> = (0..n).collect();

    for _epoch in 0..EPOCHS {
      indices.shuffle(&mut rng);

      for batch in indices.chunks(BATCH_SIZE) {
        for g in &mut weight_grads {
          g.fill(0.0);
        }
        for g in &mut bias_grads {
          g.fill(0.0);
        }

        for &idx in batch {
          let y_pred = self.forward_into(xs[idx], &mut acts);

          // MSE gradient at the linear output
          // 线性输出处的 MSE 梯度
          let mut delta = vec![2.0 * (y_pred - ys[idx])];

          for l in (0..self.layers).rev() {
            let (input, output) = layer_dims(self.hidden, self.layers, l);
            for j in 0..output {
              bias_grads[l][j] += delta[j];
              for i in 0..input {
                weight_grads[l][i * output + j] += acts[l][i] * delta[j];
              }
            }

            if l > 0 {
              // ReLU derivative masks dead units
              // ReLU 导数屏蔽未激活单元
              let mut prev = vec![0.0; input];
              for (i, p) in prev.iter_mut().enumerate() {
                if acts[l][i] > 0.0 {
                  let mut sum = 0.0;
                  for (j, &d) in delta.iter().enumerate().take(output) {
                    sum += self.weights[l][i * output + j] * d;
                  }
                  *p = sum;
                }
              }
              delta = prev;
            }
          }
        }

        let scale = LEARNING_RATE / batch.len() as f64;
        for l in 0..self.layers {
          for (w, g) in self.weights[l].iter_mut().zip(&weight_grads[l]) {
            *w -= scale * g;
          }
          for (b, g) in self.biases[l].iter_mut().zip(&bias_grads[l]) {
            *b -= scale * g;
          }
        }
      }
    }
  }

  fn predict(&self, key: f64) -> f64 {
    let x = (self.transform(key) - self.x_min) / self.x_range;
    let mut acts = self.alloc_acts();
    self.forward_into(x, &mut acts) * self.y_max
  }

  fn size_bytes(&self) -> usize {
    let heap: usize = self
      .weights
      .iter()
      .chain(self.biases.iter())
      .map(|v| v.len() * size_of::<f64>())
      .sum();
    size_of::<Self>() + heap
  }
}

/// `(input, output)` width of weight layer `l`
/// 第 l 个权重层的（输入，输出）宽度
#[inline]
fn layer_dims(hidden: usize, layers: usize, l: usize) -> (usize, usize) {
  let input = if l == 0 { 1 } else { hidden };
  let output = if l + 1 == layers { 1 } else { hidden };
  (input, output)
}
