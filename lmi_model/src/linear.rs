//! Closed-form least-squares linear model
//! 闭式最小二乘线性模型

#![allow(clippy::cast_precision_loss)]

use std::mem::size_of;

use crate::{Regressor, Sample, consts::DENOM_EPS};

/// Linear rank model: `rank = slope * key + intercept`
/// 线性排名模型
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearModel {
  pub slope: f64,
  pub intercept: f64,
}

impl Regressor for LinearModel {
  /// One-pass OLS of rank on key
  /// 单趟最小二乘拟合
  fn train(&mut self, samples: &[Sample]) {
    if samples.is_empty() {
      return;
    }

    let n = samples.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for &(key, pos) in samples {
      let y = pos as f64;
      sum_x += key;
      sum_y += y;
      sum_xy += key * y;
      sum_x2 += key * key;
    }

    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    // Constant-key segment collapses to the mean rank
    // 常量键段退化为平均排名
    let denom = sum_x2 - n * mean_x * mean_x;
    if denom.abs() < DENOM_EPS {
      self.slope = 0.0;
      self.intercept = mean_y;
    } else {
      self.slope = (sum_xy - n * mean_x * mean_y) / denom;
      self.intercept = mean_y - self.slope * mean_x;
    }
  }

  #[inline]
  fn predict(&self, key: f64) -> f64 {
    self.slope.mul_add(key, self.intercept)
  }

  #[inline]
  fn size_bytes(&self) -> usize {
    size_of::<Self>()
  }
}
