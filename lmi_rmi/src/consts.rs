//! Constants / 常量

/// Sample cap for average-error estimation
/// 平均误差估算的采样上限
pub(crate) const AVG_ERROR_SAMPLES: u64 = 10_000;
