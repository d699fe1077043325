//! Stage arrays / 阶段数组

use std::mem::size_of;

use lmi_model::{Model, Regressor};

/// One RMI stage: a fixed-width model array plus parallel signed
/// residual bounds in rank units. Only the final stage's bounds drive
/// lookup windows; earlier bounds are diagnostics.
/// 一个 RMI 阶段：定宽模型数组与并行的有符号残差边界（排名单位）。
/// 仅末级阶段的边界决定查找窗口，其余仅作诊断。
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug, Default)]
pub struct Stage {
  pub models: Vec<Model>,
  /// Per-model min of `predict(k) - rank`
  /// 每模型 `predict(k) - rank` 的最小值
  pub min_errors: Vec<f64>,
  /// Per-model max of `predict(k) - rank`
  /// 每模型 `predict(k) - rank` 的最大值
  pub max_errors: Vec<f64>,
}

impl Stage {
  /// Stage with room for `width` models
  /// 预留 `width` 个模型的阶段
  #[must_use]
  pub fn with_width(width: usize) -> Self {
    Self {
      models: Vec::with_capacity(width),
      min_errors: Vec::with_capacity(width),
      max_errors: Vec::with_capacity(width),
    }
  }

  #[inline]
  #[must_use]
  pub fn width(&self) -> usize {
    self.models.len()
  }

  /// Bytes owned by models and bound arrays
  /// 模型与边界数组占用字节
  #[must_use]
  pub fn mem_usage(&self) -> usize {
    self.models.iter().map(Regressor::size_bytes).sum::<usize>()
      + (self.min_errors.len() + self.max_errors.len()) * size_of::<f64>()
  }
}
