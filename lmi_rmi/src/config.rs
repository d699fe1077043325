//! Build configuration / 构建配置

use crate::error::{Error, Result};

/// RMI build configuration. Stage widths are fixed at build; the
/// structure is immutable thereafter.
/// RMI 构建配置。阶段宽度在构建时固定，结构此后不可变。
#[cfg_attr(feature = "bitcode", derive(bitcode::Encode, bitcode::Decode))]
#[derive(Clone, Debug)]
pub struct RmiConfig {
  /// Models per stage; the first stage holds exactly one model
  /// 每阶段模型数；第一阶段恰有一个模型
  pub stage_sizes: Vec<usize>,
  /// Hidden layer width of the root network
  /// 根网络隐藏层宽度
  pub hidden_size: usize,
  /// Hidden layer count; 0 selects a linear root
  /// 隐藏层数；0 表示线性根
  pub num_hidden_layers: usize,
  /// Reserved for hybrid per-leaf fallback; validated, never consulted
  /// by the lookup path
  /// 预留给混合回退；仅校验，查找路径不读取
  pub error_threshold: f64,
}

impl Default for RmiConfig {
  fn default() -> Self {
    Self {
      stage_sizes: vec![1, 1000],
      hidden_size: 8,
      num_hidden_layers: 1,
      error_threshold: 128.0,
    }
  }
}

impl RmiConfig {
  /// Reject configurations the build cannot honor
  /// 拒绝无法构建的配置
  ///
  /// # Errors
  /// `EmptyStages` for an empty `stage_sizes`, `RootWidth` when the
  /// first stage is not 1, `StageWidth` for a zero-width stage,
  /// `Threshold` for a non-positive `error_threshold`.
  pub fn validate(&self) -> Result<()> {
    let Some(&first) = self.stage_sizes.first() else {
      return Err(Error::EmptyStages);
    };
    if first != 1 {
      return Err(Error::RootWidth { provided: first });
    }
    if let Some(stage) = self.stage_sizes.iter().position(|&w| w == 0) {
      return Err(Error::StageWidth { stage });
    }
    if !(self.error_threshold > 0.0) {
      return Err(Error::Threshold {
        provided: self.error_threshold,
      });
    }
    Ok(())
  }
}
