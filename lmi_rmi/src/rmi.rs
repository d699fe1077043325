//! Recursive model index engine
//! 递归模型索引引擎

#![allow(
  clippy::cast_precision_loss,
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss
)]

use lmi_model::{Regressor, Sample};

use crate::{
  build::build_stages,
  config::RmiConfig,
  consts::AVG_ERROR_SAMPLES,
  error::Result,
  stage::Stage,
  store::SortedKeys,
};

/// Read-only learned index over sorted `f64` keys. Built once,
/// immutable thereafter; lookups are pure reads safe from any number
/// of concurrent readers.
/// 对有序 `f64` 键的只读学习型索引。一次构建后不可变；
/// 查找为纯读取，任意数量并发读者均安全。
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug)]
pub struct Rmi {
  config: RmiConfig,
  stages: Vec<Stage>,
  keys: SortedKeys,
  total_records: u64,
}

/// Index statistics / 索引统计信息
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug, Default)]
pub struct RmiStats {
  pub stages: usize,
  pub total_records: u64,
  pub size_bytes: usize,
  pub avg_error: f64,
}

impl Rmi {
  /// One-shot build: sorts the input, assigns ranks, bulk-loads the
  /// key store, then trains the stage hierarchy. Input positions are
  /// ignored and re-derived after the sort.
  /// 一次性构建：排序输入、赋予排名、批量装载键存储，再训练阶段层级。
  /// 输入中的位置被忽略并在排序后重新推导。
  ///
  /// # Errors
  /// Rejects invalid configurations, see [`RmiConfig::validate`].
  pub fn build(config: RmiConfig, mut data: Vec<Sample>) -> Result<Self> {
    config.validate()?;

    data.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (i, sample) in data.iter_mut().enumerate() {
      sample.1 = i as u64;
    }

    let keys = SortedKeys::new(data.iter().map(|&(k, _)| k).collect());
    let total_records = data.len() as u64;
    let stages = if data.is_empty() {
      Vec::new()
    } else {
      build_stages(&config, &data)
    };

    Ok(Self {
      config,
      stages,
      keys,
      total_records,
    })
  }

  /// Rank of the first key `>= key`; `len()` if none. One model per
  /// stage picks the next stage's model; the leaf prediction plus its
  /// residual bounds place a bounded search window over the store.
  /// 首个键 `>= key` 的排名；不存在则为 `len()`。每阶段一个模型
  /// 选择下一阶段的模型；叶预测与其残差边界确定存储上的有界查找窗口。
  #[must_use]
  pub fn lookup(&self, key: f64) -> u64 {
    let n = self.total_records;
    if n == 0 || self.stages.is_empty() {
      return 0;
    }
    let total = n as f64;

    let mut model_idx = 0usize;
    let mut prediction = 0.0f64;

    for (s, stage) in self.stages.iter().enumerate() {
      prediction = stage.models[model_idx].predict(key);
      if let Some(next) = self.stages.get(s + 1) {
        let w = next.width();
        let scaled = (prediction / total * w as f64).clamp(0.0, (w - 1) as f64);
        model_idx = scaled as usize;
      }
    }

    // model_idx now addresses the leaf stage the traversal ended in
    // model_idx 现指向遍历终止的叶阶段模型
    let leaf = &self.stages[self.stages.len() - 1];
    let est = prediction.clamp(0.0, total - 1.0).floor();
    let lo = (est + leaf.min_errors[model_idx]).clamp(0.0, total) as u64;
    let hi = (est + leaf.max_errors[model_idx] + 1.0).clamp(0.0, total) as u64;

    let found = self.keys.lower_bound(key, lo, hi);

    // A result pinned to either window edge can mean the window missed
    // the true rank; widen to the full range. Out-of-distribution
    // queries land here.
    // 结果贴在窗口任一边缘说明窗口可能未覆盖真实排名，退回全范围。
    // 分布外查询会落入此路径。
    let missed_right = found == hi && hi < n;
    let missed_left = found == lo && lo > 0 && self.keys.key(lo - 1) >= key;
    if missed_right || missed_left {
      return self.keys.lower_bound(key, 0, n);
    }
    found
  }

  /// Alias of [`Self::lookup`] under its standard name
  /// [`Self::lookup`] 的标准名称别名
  #[inline]
  #[must_use]
  pub fn lower_bound(&self, key: f64) -> u64 {
    self.lookup(key)
  }

  /// First rank whose key is strictly greater than `key`; advances
  /// over duplicates
  /// 首个键严格大于 `key` 的排名；跳过重复键
  #[must_use]
  pub fn upper_bound(&self, key: f64) -> u64 {
    let mut pos = self.lookup(key);
    while pos < self.total_records && self.keys.key(pos) <= key {
      pos += 1;
    }
    pos
  }

  /// Bytes owned by the index: keys, models, residual bounds
  /// 索引占用字节：键、模型与残差边界
  #[must_use]
  pub fn total_size_bytes(&self) -> usize {
    self.stages.iter().map(Stage::mem_usage).sum::<usize>() + self.keys.mem_usage()
  }

  /// Mean `|lookup(k) - rank|` over up to 10,000 evenly spaced
  /// training keys
  /// 至多 10,000 个等距训练键上的平均 `|lookup(k) - rank|`
  #[must_use]
  pub fn average_error(&self) -> f64 {
    let n = self.total_records;
    if n == 0 {
      return 0.0;
    }

    let step = (n / n.min(AVG_ERROR_SAMPLES)).max(1);
    let mut total = 0.0;
    let mut count = 0u64;
    let mut i = 0;
    while i < n {
      let found = self.lookup(self.keys.key(i));
      total += (found as f64 - i as f64).abs();
      count += 1;
      i += step;
    }
    total / count as f64
  }

  /// Snapshot of the index shape and accuracy
  /// 索引形态与精度快照
  #[must_use]
  pub fn stats(&self) -> RmiStats {
    RmiStats {
      stages: self.stages.len(),
      total_records: self.total_records,
      size_bytes: self.total_size_bytes(),
      avg_error: self.average_error(),
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  #[inline]
  #[must_use]
  pub fn stage_count(&self) -> usize {
    self.stages.len()
  }

  /// Sorted key view / 有序键视图
  #[inline]
  #[must_use]
  pub fn keys(&self) -> &[f64] {
    self.keys.as_slice()
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> &RmiConfig {
    &self.config
  }
}
